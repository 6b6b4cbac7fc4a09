//! Text extraction from documents.
//!
//! Each supported format has its own [`TextExtractor`]:
//! - plain text files are read directly
//! - PDFs go through pdftotext (Poppler), with Tesseract OCR for scanned pages
//! - `.docx` archives are unpacked in-process, legacy `.doc` uses antiword
//! - spreadsheets are read with calamine
//! - images are OCR'd with Tesseract
//!
//! [`ExtractorRegistry`] holds the extractors in a fixed order and resolves a
//! file to the first one that claims its extension.

mod image;
mod ocr;
mod pdf;
mod registry;
mod spreadsheet;
mod text;
mod tools;
mod word;

use std::path::Path;

use thiserror::Error;

use crate::models::DocumentMetadata;

pub use image::ImageExtractor;
pub use ocr::Tesseract;
pub use pdf::PdfExtractor;
pub use registry::ExtractorRegistry;
pub use spreadsheet::SpreadsheetExtractor;
pub use text::PlainTextExtractor;
pub use tools::{check_tools, install_instructions, locate_tesseract};
pub use word::WordExtractor;

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A format-specific text extractor.
pub trait TextExtractor: Send + Sync {
    /// Short human-readable name.
    fn name(&self) -> &'static str;

    /// Extensions this extractor handles, lower-case with the leading dot.
    fn supported_formats(&self) -> &'static [&'static str];

    /// Whether the file's extension is one of [`Self::supported_formats`].
    fn is_supported_format(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.supported_formats().contains(&ext.as_str()))
    }

    /// Extract the plain text of a file.
    fn extract_text(&self, path: &Path) -> Result<DocumentMetadata, ExtractionError>;
}

/// Lower-cased extension of a path including the leading dot, e.g. `".pdf"`.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Base name of a path for display and destination naming.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Number of non-whitespace characters, used to compare extraction results.
pub(crate) fn content_len(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of_is_lowercase_with_dot() {
        assert_eq!(extension_of(Path::new("/a/b/Report.PDF")).as_deref(), Some(".pdf"));
        assert_eq!(extension_of(Path::new("notes.txt")).as_deref(), Some(".txt"));
        assert_eq!(extension_of(Path::new("archive.tar.GZ")).as_deref(), Some(".gz"));
    }

    #[test]
    fn test_extension_of_missing() {
        assert_eq!(extension_of(Path::new("README")), None);
        assert_eq!(extension_of(Path::new(".bashrc")), None);
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of(Path::new("/tmp/in/scan 01.png")), "scan 01.png");
    }

    #[test]
    fn test_content_len_ignores_whitespace() {
        assert_eq!(content_len("  a b\n\tc  "), 3);
        assert_eq!(content_len("\n\n  "), 0);
    }
}
