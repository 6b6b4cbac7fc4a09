//! Pipeline errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::classify::ClassifyError;
use crate::extract::ExtractionError;

/// Errors from processing a file or listing a directory.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from {path}: {source}")]
    ExtractionFailed {
        path: PathBuf,
        #[source]
        source: ExtractionError,
    },

    #[error("Failed to classify {path}: {source}")]
    ClassificationFailed {
        path: PathBuf,
        #[source]
        source: ClassifyError,
    },

    #[error("Failed to organize {path}: {reason}")]
    OrganizeFailed {
        path: PathBuf,
        reason: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Cannot access {path}: {source}")]
    AccessError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
