//! Configuration management for docsort using the prefer crate.
//!
//! Precedence, lowest to highest: built-in defaults, config file,
//! `DOCSORT_*` environment variables, command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::{locate_tesseract, Tesseract};
use crate::models::ProcessingConfig;

/// Default rules filename inside the config directory.
pub const DEFAULT_RULES_FILENAME: &str = "document_rules.json";

/// Default OCR language pack.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Errors raised while resolving startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to create {label} '{path}': {source}")]
    Directory {
        label: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding docsort's own files.
    pub config_dir: PathBuf,
    /// Active rules file.
    pub rules_file: PathBuf,
    /// Root of the organized output tree.
    pub output_dir: PathBuf,
    /// Move processed files instead of copying them.
    pub move_files: bool,
    /// Explicit Tesseract binary; `None` means discover it.
    pub tesseract_path: Option<PathBuf>,
    /// Tesseract language pack.
    pub ocr_language: String,
    /// OCR scanned PDFs when `pdftotext` finds no text.
    pub pdf_ocr_fallback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docsort");

        Self {
            rules_file: config_dir.join(DEFAULT_RULES_FILENAME),
            config_dir,
            output_dir: PathBuf::from("output"),
            move_files: false,
            tesseract_path: None,
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            pdf_ocr_fallback: true,
        }
    }
}

impl Settings {
    /// Ensure the config and output directories exist.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        for (label, path) in [
            ("config directory", &self.config_dir),
            ("output directory", &self.output_dir),
        ] {
            fs::create_dir_all(path).map_err(|source| ConfigError::Directory {
                label,
                path: path.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Locate the OCR engine: explicit path, then `PATH`, then well-known locations.
    pub fn tesseract(&self) -> Option<Tesseract> {
        let binary = locate_tesseract(self.tesseract_path.as_deref());
        match binary {
            Some(ref path) => tracing::debug!("Using tesseract at {}", path.display()),
            None => tracing::debug!("Tesseract not found; image OCR disabled"),
        }
        binary.map(|path| Tesseract::new(path, self.ocr_language.clone()))
    }

    pub fn processing_config(&self) -> ProcessingConfig {
        ProcessingConfig::new(self.output_dir.clone(), self.move_files)
    }

    /// Apply `DOCSORT_*` overrides, reading variables through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        if let Some(dir) = var("DOCSORT_OUTPUT_DIR") {
            tracing::debug!("Using DOCSORT_OUTPUT_DIR from environment: {}", dir);
            self.output_dir = expand(&dir);
        }
        if let Some(file) = var("DOCSORT_RULES_FILE") {
            tracing::debug!("Using DOCSORT_RULES_FILE from environment: {}", file);
            self.rules_file = expand(&file);
        }
        if let Some(flag) = var("DOCSORT_MOVE_FILES") {
            self.move_files = is_truthy(&flag);
        }
        if let Some(bin) = var("DOCSORT_TESSERACT") {
            self.tesseract_path = Some(expand(&bin));
        }
        if let Some(lang) = var("DOCSORT_OCR_LANG") {
            self.ocr_language = lang.trim().to_string();
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.trim()).as_ref())
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, prefer::FromValue)]
pub struct Config {
    /// Output directory path.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "output")]
    pub output_dir: Option<String>,
    /// Rules file path.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "rules")]
    pub rules_file: Option<String>,
    /// Move instead of copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_files: Option<bool>,
    /// Tesseract binary path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tesseract: Option<String>,
    /// OCR language pack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_language: Option<String>,
    /// OCR fallback for image-only PDFs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_ocr_fallback: Option<bool>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    #[prefer(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults when nothing is found or the file is unreadable.
    pub async fn load() -> Self {
        match prefer::load("docsort").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => match Self::load_from_path(path).await {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!("{}", e);
                        Self::default()
                    }
                },
                None => Self::default(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// The format follows the extension: TOML, YAML, otherwise JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parsed = match ext {
            "toml" => toml::from_str(contents).map_err(|e| e.to_string()),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
            _ => serde_json::from_str(contents).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Directory of the config file, used to resolve relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are joined onto `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref dir) = self.output_dir {
            settings.output_dir = self.resolve_path(dir, base_dir);
        }
        if let Some(ref file) = self.rules_file {
            settings.rules_file = self.resolve_path(file, base_dir);
        }
        if let Some(move_files) = self.move_files {
            settings.move_files = move_files;
        }
        if let Some(ref bin) = self.tesseract {
            settings.tesseract_path = Some(self.resolve_path(bin, base_dir));
        }
        if let Some(ref lang) = self.ocr_language {
            settings.ocr_language = lang.clone();
        }
        if let Some(fallback) = self.pdf_ocr_fallback {
            settings.pdf_ocr_fallback = fallback;
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
    /// `--output` flag.
    pub output_dir: Option<PathBuf>,
    /// `--rules` flag.
    pub rules_file: Option<PathBuf>,
    /// `--move` flag.
    pub move_files: bool,
}

/// Load settings with explicit options.
///
/// An explicit config path must load; auto-discovered files that fail to
/// parse are logged and ignored.
pub async fn load_settings_with_options(
    options: LoadOptions,
) -> Result<(Settings, Config), ConfigError> {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await?,
        None => Config::load().await,
    };

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let base_dir = if options.use_cwd {
        cwd.clone()
    } else {
        config.base_dir().unwrap_or_else(|| cwd.clone())
    };

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings, &base_dir);
    settings.apply_env_overrides(|key| std::env::var(key).ok());
    apply_cli_overrides(&mut settings, &options, &cwd);

    Ok((settings, config))
}

fn apply_cli_overrides(settings: &mut Settings, options: &LoadOptions, cwd: &Path) {
    let absolute = |p: &PathBuf| {
        if p.is_absolute() {
            p.clone()
        } else {
            cwd.join(p)
        }
    };

    if let Some(ref dir) = options.output_dir {
        settings.output_dir = absolute(dir);
    }
    if let Some(ref file) = options.rules_file {
        settings.rules_file = absolute(file);
    }
    if options.move_files {
        settings.move_files = true;
    }
}
