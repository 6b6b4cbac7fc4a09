//! Image text extraction via OCR.

use std::path::Path;

use super::ocr::Tesseract;
use super::tools::install_instructions;
use super::{file_name_of, ExtractionError, TextExtractor};
use crate::models::DocumentMetadata;

const IMAGE_FORMATS: &[&str] = &[".png", ".jpg", ".jpeg", ".bmp", ".tiff", ".tif", ".gif"];

/// Placeholder used when OCR ran but recognized nothing.
pub const NO_TEXT_PLACEHOLDER: &str = "No text could be extracted from this image.";

/// Extracts text from images with Tesseract.
///
/// Without a Tesseract binary, extraction degrades to a placeholder payload
/// naming the file and how to install OCR support, so a batch keeps going.
pub struct ImageExtractor {
    tesseract: Option<Tesseract>,
}

impl ImageExtractor {
    pub fn new(tesseract: Option<Tesseract>) -> Self {
        Self { tesseract }
    }

    fn unavailable_payload(filename: &str) -> String {
        format!(
            "Image: {} (OCR not available)\n\n{}",
            filename,
            install_instructions()
        )
    }
}

/// Collapse OCR output into a single line of text.
pub(crate) fn postprocess_ocr_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        NO_TEXT_PLACEHOLDER.to_string()
    } else {
        collapsed
    }
}

impl TextExtractor for ImageExtractor {
    fn name(&self) -> &'static str {
        "Image (OCR)"
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        IMAGE_FORMATS
    }

    fn extract_text(&self, path: &Path) -> Result<DocumentMetadata, ExtractionError> {
        let filename = file_name_of(path);

        let Some(tesseract) = &self.tesseract else {
            tracing::warn!(
                "Tesseract OCR not found, using placeholder text for {}",
                filename
            );
            let text = Self::unavailable_payload(&filename);
            return Ok(DocumentMetadata::new(filename, text));
        };

        if !path.is_file() {
            return Err(ExtractionError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )));
        }

        let raw = tesseract.recognize(path)?;
        Ok(DocumentMetadata::new(filename, postprocess_ocr_text(&raw)))
    }
}
