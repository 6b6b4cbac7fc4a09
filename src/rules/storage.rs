//! JSON rule files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::RulesError;
use crate::models::{default_rules, DocumentRule};

/// Load rules from a JSON file.
///
/// A missing file is created with the built-in default rules, which are
/// then returned.
pub fn load_rules_from_json(path: &Path) -> Result<Vec<DocumentRule>, RulesError> {
    if !path.exists() {
        tracing::info!("Rules file {} not found, creating defaults", path.display());
        let rules = default_rules();
        save_rules_to_json(path, &rules)?;
        return Ok(rules);
    }

    let data = fs::read_to_string(path).map_err(|e| RulesError::LoadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let rules: Vec<DocumentRule> =
        serde_json::from_str(&data).map_err(|e| RulesError::LoadFailed {
            path: path.to_path_buf(),
            reason: format!("invalid JSON: {}", e),
        })?;

    validate_rules(&rules).map_err(|reason| RulesError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;

    tracing::debug!("Loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}

/// Write rules as 2-space indented JSON, creating parent directories.
pub fn save_rules_to_json(path: &Path, rules: &[DocumentRule]) -> Result<(), RulesError> {
    let save_err = |reason: String| RulesError::SaveFailed {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| save_err(e.to_string()))?;
    }

    let mut data = serde_json::to_string_pretty(rules).map_err(|e| save_err(e.to_string()))?;
    data.push('\n');
    fs::write(path, data).map_err(|e| save_err(e.to_string()))?;

    tracing::debug!("Saved {} rules to {}", rules.len(), path.display());
    Ok(())
}

/// Check that every rule has a non-blank type and that types are unique.
pub fn validate_rules(rules: &[DocumentRule]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for (i, rule) in rules.iter().enumerate() {
        if rule.doc_type.trim().is_empty() {
            return Err(format!("rule #{} has an empty type", i + 1));
        }
        if !seen.insert(rule.doc_type.as_str()) {
            return Err(format!("duplicate rule type '{}'", rule.doc_type));
        }
    }
    Ok(())
}
