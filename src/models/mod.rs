//! Data models for docsort.

mod document;
mod processing;
mod rule;

pub use document::{Classification, DocumentMetadata, MAX_MATCHED_KEYWORDS};
pub use processing::{FileOutcome, ProcessingConfig, ProcessingResult};
pub use rule::{default_rules, DocumentRule};
