//! Spreadsheet workbooks.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::{file_name_of, ExtractionError, TextExtractor};
use crate::models::DocumentMetadata;

/// Renders every sheet of a workbook as pipe-separated rows.
#[derive(Debug, Default)]
pub struct SpreadsheetExtractor;

/// Join a row's cells, dropping trailing empty cells. Returns `None` for blank rows.
fn render_row(row: &[Data]) -> Option<String> {
    let cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
    let used = cells.iter().rposition(|c| !c.trim().is_empty())? + 1;
    Some(cells[..used].join(" | "))
}

impl TextExtractor for SpreadsheetExtractor {
    fn name(&self) -> &'static str {
        "Spreadsheet"
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        &[".xlsx", ".xls", ".xlsm", ".ods"]
    }

    fn extract_text(&self, path: &Path) -> Result<DocumentMetadata, ExtractionError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("failed to open spreadsheet: {}", e))
        })?;

        let mut text = String::new();
        for sheet_name in workbook.sheet_names() {
            text.push_str(&format!("\n[Sheet: {}]\n", sheet_name));

            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                ExtractionError::ExtractionFailed(format!(
                    "failed to read sheet {}: {}",
                    sheet_name, e
                ))
            })?;

            for line in range.rows().filter_map(render_row) {
                text.push_str(&line);
                text.push('\n');
            }
        }

        Ok(DocumentMetadata::new(file_name_of(path), text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_row() {
        let row = vec![
            Data::String("Item".to_string()),
            Data::Float(2.5),
            Data::Empty,
            Data::String("Total due".to_string()),
            Data::Empty,
        ];
        assert_eq!(render_row(&row).as_deref(), Some("Item | 2.5 |  | Total due"));
    }

    #[test]
    fn test_render_blank_row() {
        assert_eq!(render_row(&[Data::Empty, Data::Empty]), None);
        assert_eq!(render_row(&[]), None);
    }

    #[test]
    fn test_supported_formats() {
        let extractor = SpreadsheetExtractor;
        assert!(extractor.is_supported_format(Path::new("budget.XLSX")));
        assert!(extractor.is_supported_format(Path::new("legacy.xls")));
        assert!(!extractor.is_supported_format(Path::new("data.csv")));
    }

    #[test]
    fn test_corrupt_workbook_is_extraction_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();

        let err = SpreadsheetExtractor.extract_text(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::ExtractionFailed(_)));
    }
}
