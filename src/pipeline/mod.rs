//! The processing pipeline: extract, classify, then file each document.
//!
//! A [`ProcessingPipeline`] owns an [`ExtractorRegistry`], a classifier and
//! the output settings. Single files surface their first error to the caller;
//! directory runs record every per-file failure and always complete.

mod error;
mod organize;
mod types;

pub use error::PipelineError;
pub use organize::{destination_for, organize_file, sanitize_component};
pub use types::{ProcessedDocument, ProcessingEvent};

use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::{DocumentClassifier, KeywordClassifier};
use crate::extract::{extension_of, file_name_of, ExtractionError, ExtractorRegistry};
use crate::models::{FileOutcome, ProcessingConfig, ProcessingResult};

/// Failure reason recorded for files no extractor claims.
pub const UNSUPPORTED_FORMAT_REASON: &str = "Unsupported format";

/// Orchestrates extraction, classification and organization.
pub struct ProcessingPipeline<C: DocumentClassifier = KeywordClassifier> {
    registry: ExtractorRegistry,
    classifier: C,
    config: ProcessingConfig,
}

impl<C: DocumentClassifier> ProcessingPipeline<C> {
    pub fn new(registry: ExtractorRegistry, classifier: C, config: ProcessingConfig) -> Self {
        Self {
            registry,
            classifier,
            config,
        }
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Extensions accepted by the pipeline, in registration order.
    pub fn supported_formats(&self) -> Vec<&'static str> {
        self.registry.supported_formats()
    }

    /// Extract, classify and file a single document.
    pub fn process_single_file(&self, path: &Path) -> Result<ProcessedDocument, PipelineError> {
        let extractor = self.registry.resolve(path).map_err(|e| match e {
            ExtractionError::UnsupportedFormat(ext) => PipelineError::UnsupportedFormat(ext),
            other => PipelineError::ExtractionFailed {
                path: path.to_path_buf(),
                source: other,
            },
        })?;

        tracing::debug!("Extracting {} with {}", path.display(), extractor.name());
        let metadata =
            extractor
                .extract_text(path)
                .map_err(|source| PipelineError::ExtractionFailed {
                    path: path.to_path_buf(),
                    source,
                })?;

        let metadata = self.classifier.classify(metadata).map_err(|source| {
            PipelineError::ClassificationFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let document_type = metadata.document_type().unwrap_or_default().to_string();
        let destination = organize_file(
            path,
            &self.config.output_directory,
            &document_type,
            self.config.move_files,
        )?;

        tracing::info!(
            "{} classified as {} -> {}",
            metadata.filename,
            document_type,
            destination.display()
        );

        Ok(ProcessedDocument {
            metadata,
            destination,
        })
    }

    /// Process every file directly inside `dir`.
    pub fn process_directory(&self, dir: &Path) -> Result<ProcessingResult, PipelineError> {
        self.process_directory_with(dir, |_| {})
    }

    /// Like [`process_directory`](Self::process_directory), reporting progress to `observer`.
    pub fn process_directory_with<F>(
        &self,
        dir: &Path,
        mut observer: F,
    ) -> Result<ProcessingResult, PipelineError>
    where
        F: FnMut(ProcessingEvent<'_>),
    {
        let entries = list_entries(dir)?;
        let mut result = ProcessingResult::default();

        let mut files = Vec::with_capacity(entries.len());
        for path in entries {
            match fs::metadata(&path) {
                Ok(meta) if meta.is_dir() => {
                    tracing::debug!("Skipping directory {}", path.display());
                }
                Ok(_) => files.push(Ok(path)),
                Err(e) => files.push(Err((path, e))),
            }
        }

        observer(ProcessingEvent::BatchStarted { total: files.len() });

        for file in files {
            let outcome = match file {
                Ok(path) => {
                    let filename = file_name_of(&path);
                    observer(ProcessingEvent::FileStarted {
                        filename: &filename,
                    });
                    self.process_entry(&path, filename)
                }
                Err((path, e)) => {
                    let filename = file_name_of(&path);
                    observer(ProcessingEvent::FileStarted {
                        filename: &filename,
                    });
                    let err = PipelineError::AccessError { path, source: e };
                    tracing::warn!("{}", err);
                    FileOutcome::failed(filename, err.to_string())
                }
            };

            if outcome.success {
                observer(ProcessingEvent::FileCompleted { outcome: &outcome });
            } else {
                observer(ProcessingEvent::FileFailed { outcome: &outcome });
            }
            result.record(outcome);
        }

        tracing::info!(
            "Processed {} file(s) in {}: {} succeeded, {} failed",
            result.total(),
            dir.display(),
            result.processed_count,
            result.failed_count
        );
        observer(ProcessingEvent::BatchCompleted { result: &result });
        Ok(result)
    }

    fn process_entry(&self, path: &Path, filename: String) -> FileOutcome {
        if !self.registry.is_format_supported(path) {
            tracing::debug!(
                "Unsupported format {} for {}",
                extension_of(path).unwrap_or_default(),
                filename
            );
            return FileOutcome::failed(filename, UNSUPPORTED_FORMAT_REASON);
        }

        match self.process_single_file(path) {
            Ok(doc) => FileOutcome::succeeded(filename, doc.document_type()),
            Err(e) => {
                tracing::warn!("{}", e);
                FileOutcome::failed(filename, e.to_string())
            }
        }
    }
}

/// Immediate entries of `dir`, sorted by file name.
fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let meta = fs::metadata(dir).map_err(|source| PipelineError::AccessError {
        path: dir.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(PipelineError::NotADirectory(dir.to_path_buf()));
    }

    let access_err = |source| PipelineError::AccessError {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(access_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(access_err)?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}
