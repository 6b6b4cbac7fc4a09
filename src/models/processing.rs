//! Pipeline configuration and batch results.

use std::path::PathBuf;

use serde::Serialize;

/// Where processed files go and whether the source is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingConfig {
    /// Root under which one subdirectory per document type is created.
    pub output_directory: PathBuf,
    /// Move files into place instead of copying them.
    pub move_files: bool,
}

impl ProcessingConfig {
    pub fn new(output_directory: impl Into<PathBuf>, move_files: bool) -> Self {
        Self {
            output_directory: output_directory.into(),
            move_files,
        }
    }
}

/// Outcome for one file of a directory run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub filename: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn succeeded(filename: impl Into<String>, document_type: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            success: true,
            document_type: Some(document_type.into()),
            error: None,
        }
    }

    pub fn failed(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            success: false,
            document_type: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregated result of a directory run. Append-only while the scan runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub processed_count: usize,
    pub failed_count: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl ProcessingResult {
    /// Record an outcome, keeping the counters in step with the list.
    pub fn record(&mut self, outcome: FileOutcome) {
        if outcome.success {
            self.processed_count += 1;
        } else {
            self.failed_count += 1;
        }
        self.outcomes.push(outcome);
    }

    /// Total number of files seen.
    pub fn total(&self) -> usize {
        self.processed_count + self.failed_count
    }

    /// Successful outcomes grouped by document type, sorted by type.
    pub fn counts_by_type(&self) -> Vec<(String, usize)> {
        let mut counts: std::collections::BTreeMap<&str, usize> = Default::default();
        for outcome in &self.outcomes {
            if let Some(doc_type) = outcome.document_type.as_deref() {
                *counts.entry(doc_type).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_updates_counts() {
        let mut result = ProcessingResult::default();
        result.record(FileOutcome::succeeded("a.txt", "Invoice"));
        result.record(FileOutcome::failed("b.xyz", "Unsupported format"));
        result.record(FileOutcome::succeeded("c.txt", "Invoice"));

        assert_eq!(result.processed_count, 2);
        assert_eq!(result.failed_count, 1);
        assert_eq!(result.total(), 3);
        assert_eq!(result.outcomes.len(), 3);
        assert_eq!(result.counts_by_type(), vec![("Invoice".to_string(), 2)]);
    }

    #[test]
    fn test_outcome_json_omits_empty_fields() {
        let json = serde_json::to_string(&FileOutcome::failed("b.xyz", "Unsupported format"))
            .unwrap();
        assert!(!json.contains("documentType"));
        assert!(json.contains("\"error\":\"Unsupported format\""));
    }
}
