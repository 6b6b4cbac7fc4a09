//! Document classification.
//!
//! [`DocumentClassifier`] is the seam the pipeline calls through;
//! [`KeywordClassifier`] is the rule-based implementation backed by a
//! [`RuleStore`](crate::rules::RuleStore).

mod keyword;

use thiserror::Error;

use crate::models::DocumentMetadata;

pub use keyword::{
    classify_text, normalize_text, KeywordClassifier, EMPTY_DOCUMENT_TYPE, OTHER_TYPE,
};

/// Errors a classifier may report.
///
/// The keyword classifier never fails; the variant exists for classifiers
/// backed by something that can.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Classification failed: {0}")]
    Failed(String),
}

/// Assigns a document type to extracted text.
pub trait DocumentClassifier {
    /// Human-readable classifier name.
    fn name(&self) -> &str;

    /// Return the document with its `classification` filled in.
    fn classify(&self, document: DocumentMetadata) -> Result<DocumentMetadata, ClassifyError>;
}
