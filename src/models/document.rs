//! Extracted documents and their classification.

use serde::{Deserialize, Serialize};

/// Upper bound on the keywords reported with a classification.
pub const MAX_MATCHED_KEYWORDS: usize = 5;

/// Result of classifying a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Display label of the winning rule, or a fallback type.
    pub document_type: String,
    /// Keywords that matched, in rule order, at most [`MAX_MATCHED_KEYWORDS`].
    pub matched_keywords: Vec<String>,
}

impl Classification {
    pub fn new(document_type: impl Into<String>, mut matched_keywords: Vec<String>) -> Self {
        matched_keywords.truncate(MAX_MATCHED_KEYWORDS);
        Self {
            document_type: document_type.into(),
            matched_keywords,
        }
    }
}

/// Text pulled out of a single file, plus its classification once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Base name of the source file.
    pub filename: String,
    /// Raw extracted text.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
}

impl DocumentMetadata {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
            classification: None,
        }
    }

    /// Document type assigned by the classifier, if any.
    pub fn document_type(&self) -> Option<&str> {
        self.classification
            .as_ref()
            .map(|c| c.document_type.as_str())
    }
}
