//! Helpers for running external extraction tools.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::ExtractionError;

/// Run an external tool to completion and return its stdout.
///
/// A binary that cannot be spawned is `ToolNotFound` (labelled with `tool`);
/// a non-zero exit is `ExtractionFailed` carrying the tool's stderr.
pub(crate) fn run_tool(command: &mut Command, tool: &str) -> Result<String, ExtractionError> {
    let output = command.output().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ExtractionError::ToolNotFound(tool.to_string()),
        _ => ExtractionError::Io(e),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExtractionError::ExtractionFailed(format!(
            "{} exited with {}: {}",
            tool,
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Well-known Tesseract install locations for the current OS.
fn tesseract_candidates() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Tesseract-OCR\tesseract.exe",
            r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
            r"C:\Tesseract-OCR\tesseract.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/usr/local/bin/tesseract",
            "/opt/homebrew/bin/tesseract",
            "/opt/local/bin/tesseract",
        ]
    } else {
        &[
            "/usr/bin/tesseract",
            "/usr/local/bin/tesseract",
            "/snap/bin/tesseract",
        ]
    }
}

/// Find a Tesseract binary.
///
/// An explicit path wins when it points at a file; otherwise `PATH` is
/// searched, then the usual install locations.
pub fn locate_tesseract(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        tracing::warn!(
            "Configured tesseract binary {} does not exist, searching PATH",
            path.display()
        );
    }

    if let Ok(path) = which::which("tesseract") {
        return Some(path);
    }

    tesseract_candidates()
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Instructions for installing Tesseract on the current OS.
pub fn install_instructions() -> &'static str {
    if cfg!(target_os = "windows") {
        "To install Tesseract OCR on Windows:\n\
         1. Go to https://github.com/UB-Mannheim/tesseract/wiki\n\
         2. Download the latest installer (tesseract-ocr-w64-setup-v5.x.x.exe)\n\
         3. Select the language packs you need during installation\n\
         4. Restart docsort after installing"
    } else if cfg!(target_os = "macos") {
        "To install Tesseract OCR on macOS:\n\
         1. Install Homebrew if needed (https://brew.sh/)\n\
         2. Run: brew install tesseract tesseract-lang\n\
         3. Restart docsort after installing"
    } else if cfg!(target_os = "linux") {
        "To install Tesseract OCR on Ubuntu/Debian:\n\
         sudo apt-get update && sudo apt-get install -y tesseract-ocr\n\n\
         On Fedora/RHEL:\n\
         sudo dnf install -y tesseract"
    } else {
        "See https://github.com/tesseract-ocr/tesseract for Tesseract OCR install instructions"
    }
}

/// Check which external tools are available.
pub fn check_tools() -> Vec<(String, bool)> {
    ["pdftotext", "pdftoppm", "tesseract", "antiword"]
        .iter()
        .map(|tool| (tool.to_string(), which::which(tool).is_ok()))
        .collect()
}
