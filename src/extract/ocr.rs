//! Tesseract OCR via command-line.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::tools::run_tool;
use super::ExtractionError;

/// Markers in Tesseract's stderr when the requested language pack is missing.
const MISSING_LANGUAGE_MARKERS: &[&str] = &["Error opening data file", "Failed loading language"];

/// A resolved Tesseract binary plus the language to run it with.
#[derive(Debug, Clone)]
pub struct Tesseract {
    binary: PathBuf,
    language: String,
}

impl Tesseract {
    pub fn new(binary: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// OCR an image and return the raw recognized text.
    ///
    /// If the configured language pack is not installed, retries once with
    /// Tesseract's default language.
    pub fn recognize(&self, image_path: &Path) -> Result<String, ExtractionError> {
        match self.run(image_path, Some(&self.language)) {
            Err(ExtractionError::ExtractionFailed(msg)) if is_missing_language(&msg) => {
                tracing::warn!(
                    "Tesseract language '{}' not installed, retrying with default language",
                    self.language
                );
                self.run(image_path, None)
            }
            other => other,
        }
    }

    /// OCR several page images in order, joining pages with a blank line.
    ///
    /// Pages that fail are logged and left out; an error is returned only
    /// when no page could be read.
    pub fn recognize_pages(&self, pages: &[PathBuf]) -> Result<String, ExtractionError> {
        let mut texts = Vec::with_capacity(pages.len());
        let mut last_err = None;
        for (number, page) in pages.iter().enumerate().map(|(i, p)| (i + 1, p)) {
            match self.recognize(page) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    tracing::warn!("OCR failed for page {}: {}", number, e);
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(e) if texts.is_empty() => Err(e),
            _ => Ok(texts.join("\n\n")),
        }
    }

    fn run(&self, image_path: &Path, language: Option<&str>) -> Result<String, ExtractionError> {
        let mut command = Command::new(&self.binary);
        command.arg(image_path).arg("stdout");
        if let Some(lang) = language {
            command.args(["-l", lang]);
        }
        run_tool(&mut command, &format!("tesseract ({})", self.binary.display()))
    }
}

fn is_missing_language(stderr: &str) -> bool {
    MISSING_LANGUAGE_MARKERS.iter().any(|m| stderr.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_surfaces_tool_not_found() {
        let tesseract = Tesseract::new("/nonexistent/docsort/tesseract", "eng");
        let err = tesseract
            .recognize(Path::new("/nonexistent/image.png"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ToolNotFound(_)));
    }

    #[test]
    fn test_no_pages_is_empty_text() {
        let tesseract = Tesseract::new("/nonexistent/docsort/tesseract", "eng");
        assert_eq!(tesseract.recognize_pages(&[]).unwrap(), "");
    }

    #[test]
    fn test_all_pages_failing_is_an_error() {
        let tesseract = Tesseract::new("/nonexistent/docsort/tesseract", "eng");
        let pages = [PathBuf::from("page-1.png"), PathBuf::from("page-2.png")];
        assert!(tesseract.recognize_pages(&pages).is_err());
    }

    #[test]
    fn test_missing_language_detection() {
        assert!(is_missing_language(
            "tesseract exited with exit status: 1: Error opening data file /usr/share/tessdata/xyz.traineddata"
        ));
        assert!(!is_missing_language("Error in pixReadStream"));
    }
}
