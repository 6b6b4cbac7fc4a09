//! Classification rule persistence and the active rule set.

mod storage;
mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use storage::{load_rules_from_json, save_rules_to_json, validate_rules};
pub use store::RuleStore;

/// Errors from loading, validating, or saving rule files.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to load rules from {path}: {reason}")]
    LoadFailed { path: PathBuf, reason: String },

    #[error("Failed to save rules to {path}: {reason}")]
    SaveFailed { path: PathBuf, reason: String },

    #[error("Rules file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid rules in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}
