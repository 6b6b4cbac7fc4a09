//! Plain text files.

use std::path::Path;

use super::{file_name_of, ExtractionError, TextExtractor};
use crate::models::DocumentMetadata;

/// Reads `.txt` files as-is. Invalid UTF-8 is replaced rather than rejected.
#[derive(Debug, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "Plain text"
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        &[".txt"]
    }

    fn extract_text(&self, path: &Path) -> Result<DocumentMetadata, ExtractionError> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(DocumentMetadata::new(file_name_of(path), text))
    }
}
