//! Word-processor documents.

use std::path::Path;
use std::process::Command;

use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

use super::tools::run_tool;
use super::{extension_of, file_name_of, ExtractionError, TextExtractor};
use crate::models::DocumentMetadata;

/// Extracts paragraphs from `.docx` files, and from legacy `.doc` via antiword.
#[derive(Debug, Default)]
pub struct WordExtractor;

impl WordExtractor {
    fn read_docx(path: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(path)?;
        let docx = read_docx(&bytes).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("not a valid .docx document: {:?}", e))
        })?;

        let mut text = String::new();
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                push_paragraph(&mut text, paragraph);
                text.push('\n');
            }
        }
        Ok(text)
    }

    fn read_doc(path: &Path) -> Result<String, ExtractionError> {
        run_tool(Command::new("antiword").arg(path), "antiword (install antiword)")
    }
}

/// Append a paragraph's runs. Tabs and breaks inside a run become whitespace.
fn push_paragraph(out: &mut String, paragraph: &Paragraph) {
    for child in &paragraph.children {
        let ParagraphChild::Run(run) = child else {
            continue;
        };
        for part in &run.children {
            match part {
                RunChild::Text(t) => out.push_str(&t.text),
                RunChild::Tab(_) => out.push('\t'),
                RunChild::Break(_) => out.push('\n'),
                _ => {}
            }
        }
    }
}

impl TextExtractor for WordExtractor {
    fn name(&self) -> &'static str {
        "Word processor"
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        &[".docx", ".doc"]
    }

    fn extract_text(&self, path: &Path) -> Result<DocumentMetadata, ExtractionError> {
        let text = match extension_of(path).as_deref() {
            Some(".doc") => Self::read_doc(path)?,
            _ => Self::read_docx(path)?,
        };
        Ok(DocumentMetadata::new(file_name_of(path), text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run};
    use tempfile::tempdir;

    fn write_docx(path: &Path, docx: Docx) {
        let file = std::fs::File::create(path).unwrap();
        docx.build().pack(file).unwrap();
    }

    fn sample() -> Docx {
        Docx::new()
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Service "))
                    .add_run(Run::new().add_text("Agreement")),
            )
            .add_paragraph(Paragraph::new())
            .add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text("Parties")
                        .add_tab()
                        .add_text("A & B <Ltd>"),
                ),
            )
    }

    #[test]
    fn test_reads_paragraphs_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contract.docx");
        write_docx(&path, sample());

        let doc = WordExtractor.extract_text(&path).unwrap();
        assert_eq!(doc.filename, "contract.docx");
        assert_eq!(doc.text, "Service Agreement\n\nParties\tA & B <Ltd>\n");
    }

    #[test]
    fn test_empty_document_has_no_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.docx");
        write_docx(&path, Docx::new());

        let doc = WordExtractor.extract_text(&path).unwrap();
        assert!(doc.text.trim().is_empty());
    }

    #[test]
    fn test_corrupt_docx_is_extraction_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"definitely not a zip").unwrap();

        let err = WordExtractor.extract_text(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::ExtractionFailed(_)));
    }

    #[test]
    fn test_missing_docx_is_io_error() {
        let err = WordExtractor
            .extract_text(Path::new("/nonexistent/docsort/missing.docx"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Io(_)));
    }
}
