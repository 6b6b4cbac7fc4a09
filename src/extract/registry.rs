//! Ordered collection of extractors.

use std::path::Path;

use super::{
    extension_of, ExtractionError, ImageExtractor, PdfExtractor, PlainTextExtractor,
    SpreadsheetExtractor, Tesseract, TextExtractor, WordExtractor,
};

/// Resolves files to the first registered extractor that supports them.
///
/// Registration order is significant: when two extractors claim the same
/// extension, the earlier one wins.
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in extractor: PDF, word processor,
    /// spreadsheet, plain text, then image.
    pub fn with_defaults(tesseract: Option<Tesseract>, pdf_ocr_fallback: bool) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(
            PdfExtractor::new(tesseract.clone()).with_ocr_fallback(pdf_ocr_fallback),
        ));
        registry.register(Box::new(WordExtractor));
        registry.register(Box::new(SpreadsheetExtractor));
        registry.register(Box::new(PlainTextExtractor));
        registry.register(Box::new(ImageExtractor::new(tesseract)));
        registry
    }

    /// Append an extractor after the existing ones.
    pub fn register(&mut self, extractor: Box<dyn TextExtractor>) {
        self.extractors.push(extractor);
    }

    /// First extractor whose format check accepts the path.
    pub fn resolve(&self, path: &Path) -> Result<&dyn TextExtractor, ExtractionError> {
        self.extractors
            .iter()
            .find(|e| e.is_supported_format(path))
            .map(|e| e.as_ref())
            .ok_or_else(|| {
                ExtractionError::UnsupportedFormat(
                    extension_of(path).unwrap_or_else(|| "(no extension)".to_string()),
                )
            })
    }

    /// Whether [`Self::resolve`] would succeed.
    pub fn is_format_supported(&self, path: &Path) -> bool {
        self.extractors.iter().any(|e| e.is_supported_format(path))
    }

    /// Every extractor's extensions in registration order. Duplicates are kept.
    pub fn supported_formats(&self) -> Vec<&'static str> {
        self.extractors
            .iter()
            .flat_map(|e| e.supported_formats().iter().copied())
            .collect()
    }

    /// Registered extractors in order.
    pub fn extractors(&self) -> impl Iterator<Item = &dyn TextExtractor> {
        self.extractors.iter().map(|e| e.as_ref())
    }
}
