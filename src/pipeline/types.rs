//! Values produced while processing.

use std::path::PathBuf;

use crate::models::{DocumentMetadata, FileOutcome, ProcessingResult};

/// A file that went through extraction, classification and filing.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub metadata: DocumentMetadata,
    /// Where the file now lives under the output root.
    pub destination: PathBuf,
}

impl ProcessedDocument {
    pub fn document_type(&self) -> &str {
        self.metadata.document_type().unwrap_or_default()
    }
}

/// Progress notifications emitted during a directory run.
#[derive(Debug, Clone, Copy)]
pub enum ProcessingEvent<'a> {
    /// Listing finished; `total` files will be attempted.
    BatchStarted { total: usize },
    FileStarted { filename: &'a str },
    FileCompleted { outcome: &'a FileOutcome },
    FileFailed { outcome: &'a FileOutcome },
    BatchCompleted { result: &'a ProcessingResult },
}
