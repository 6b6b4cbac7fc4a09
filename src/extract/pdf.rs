//! PDF text extraction using pdftotext, with Tesseract for scanned pages.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use super::ocr::Tesseract;
use super::tools::run_tool;
use super::{content_len, file_name_of, ExtractionError, TextExtractor};
use crate::models::DocumentMetadata;

/// Extracts text from PDFs.
///
/// The text layer is read with pdftotext. When it is empty (typically a
/// scanned document) and OCR is enabled, the pages are rasterized with
/// pdftoppm and run through Tesseract instead.
pub struct PdfExtractor {
    tesseract: Option<Tesseract>,
    ocr_fallback: bool,
}

impl PdfExtractor {
    pub fn new(tesseract: Option<Tesseract>) -> Self {
        Self {
            tesseract,
            ocr_fallback: true,
        }
    }

    /// Enable or disable OCR of PDFs without a text layer.
    pub fn with_ocr_fallback(mut self, enabled: bool) -> Self {
        self.ocr_fallback = enabled;
        self
    }

    /// Read the PDF's text layer.
    fn text_layer(path: &Path) -> Result<String, ExtractionError> {
        run_tool(
            Command::new("pdftotext")
                .args(["-layout", "-enc", "UTF-8"])
                .arg(path)
                .arg("-"),
            "pdftotext (install poppler-utils)",
        )
    }

    /// Render every page as a PNG in `out_dir`, returned in page order.
    fn rasterize(path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
        run_tool(
            Command::new("pdftoppm")
                .args(["-png", "-r", "300"])
                .arg(path)
                .arg(out_dir.join("page")),
            "pdftoppm (install poppler-utils)",
        )?;

        // pdftoppm zero-pads page numbers, so name order is page order
        let mut pages: Vec<PathBuf> = std::fs::read_dir(out_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
            .collect();
        pages.sort();
        Ok(pages)
    }

    fn scanned_text(path: &Path, tesseract: &Tesseract) -> Result<String, ExtractionError> {
        let scratch = TempDir::new()?;
        let pages = Self::rasterize(path, scratch.path())?;
        if pages.is_empty() {
            return Err(ExtractionError::ExtractionFailed(format!(
                "pdftoppm produced no pages for {}",
                path.display()
            )));
        }
        tesseract.recognize_pages(&pages)
    }
}

impl TextExtractor for PdfExtractor {
    fn name(&self) -> &'static str {
        "PDF"
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        &[".pdf"]
    }

    fn extract_text(&self, path: &Path) -> Result<DocumentMetadata, ExtractionError> {
        let filename = file_name_of(path);
        let text = Self::text_layer(path)?;

        if content_len(&text) > 0 || !self.ocr_fallback {
            return Ok(DocumentMetadata::new(filename, text));
        }

        let Some(tesseract) = &self.tesseract else {
            tracing::debug!("{} has no text layer and OCR is unavailable", filename);
            return Ok(DocumentMetadata::new(filename, text));
        };

        match Self::scanned_text(path, tesseract) {
            Ok(ocr_text) if content_len(&ocr_text) > content_len(&text) => {
                tracing::debug!("Using OCR text for {}", filename);
                Ok(DocumentMetadata::new(filename, ocr_text))
            }
            Ok(_) => Ok(DocumentMetadata::new(filename, text)),
            Err(e) => {
                tracing::debug!("OCR failed for {}: {}, using pdftotext result", filename, e);
                Ok(DocumentMetadata::new(filename, text))
            }
        }
    }
}
