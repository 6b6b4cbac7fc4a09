//! The active, reloadable rule set.

use std::path::{Path, PathBuf};

use super::{load_rules_from_json, save_rules_to_json, validate_rules, RulesError};
use crate::models::DocumentRule;

/// Owns the active classification rules and the file backing them.
///
/// Reloading and switching files only commit after the new rules load and
/// validate; on failure the previous file and rules stay active.
#[derive(Debug, Clone)]
pub struct RuleStore {
    rules: Vec<DocumentRule>,
    rules_file: PathBuf,
}

impl RuleStore {
    /// Open a store backed by `rules_file`, creating it with the default
    /// rules if it does not exist.
    pub fn open(rules_file: impl Into<PathBuf>) -> Result<Self, RulesError> {
        let rules_file = rules_file.into();
        let rules = load_rules_from_json(&rules_file)?;
        Ok(Self { rules, rules_file })
    }

    /// Active rules in iteration (tie-break) order.
    pub fn rules(&self) -> &[DocumentRule] {
        &self.rules
    }

    /// Replace the whole rule set and persist it.
    ///
    /// An invalid set (blank or duplicate types) is rejected and nothing
    /// changes. Once validated, the in-memory set is replaced even if
    /// writing the file fails.
    pub fn set_rules(&mut self, rules: Vec<DocumentRule>) -> Result<(), RulesError> {
        validate_rules(&rules).map_err(|reason| RulesError::Invalid {
            path: self.rules_file.clone(),
            reason,
        })?;
        self.rules = rules;
        save_rules_to_json(&self.rules_file, &self.rules)
    }

    /// Re-read the backing file.
    pub fn reload_rules(&mut self) -> Result<(), RulesError> {
        let rules = load_rules_from_json(&self.rules_file)?;
        tracing::info!(
            "Reloaded {} rules from {}",
            rules.len(),
            self.rules_file.display()
        );
        self.rules = rules;
        Ok(())
    }

    /// Path of the backing rules file.
    pub fn rules_file_path(&self) -> &Path {
        &self.rules_file
    }

    /// Switch to a different, existing rules file.
    pub fn set_rules_file(&mut self, path: impl Into<PathBuf>) -> Result<(), RulesError> {
        let path = path.into();
        if !path.is_file() {
            return Err(RulesError::NotFound(path));
        }

        let rules = load_rules_from_json(&path)?;
        tracing::info!("Switched to rules file {} ({} rules)", path.display(), rules.len());
        self.rules_file = path;
        self.rules = rules;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_rules;
    use std::fs;
    use tempfile::tempdir;

    fn sample_rules() -> Vec<DocumentRule> {
        vec![
            DocumentRule::new("Invoice", ["invoice", "total due"]),
            DocumentRule::new("Receipt", ["receipt", "paid"]),
        ]
    }

    #[test]
    fn test_open_creates_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("document_rules.json");

        let store = RuleStore::open(&path).unwrap();
        assert_eq!(store.rules(), default_rules().as_slice());
        assert_eq!(store.rules_file_path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn test_set_rules_then_reload_round_trips() {
        let dir = tempdir().unwrap();
        let mut store = RuleStore::open(dir.path().join("rules.json")).unwrap();

        store.set_rules(sample_rules()).unwrap();
        store.reload_rules().unwrap();
        assert_eq!(store.rules(), sample_rules().as_slice());
    }

    #[test]
    fn test_reload_corrupt_file_keeps_rules() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let mut store = RuleStore::open(&path).unwrap();
        store.set_rules(sample_rules()).unwrap();

        fs::write(&path, "{ not json").unwrap();
        assert!(store.reload_rules().is_err());
        assert_eq!(store.rules(), sample_rules().as_slice());
    }

    #[test]
    fn test_set_rules_file_missing_keeps_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let mut store = RuleStore::open(&path).unwrap();

        let missing = dir.path().join("other.json");
        let err = store.set_rules_file(&missing).unwrap_err();
        assert!(matches!(err, RulesError::NotFound(_)));
        assert!(!missing.exists());
        assert_eq!(store.rules_file_path(), path.as_path());
        assert_eq!(store.rules(), default_rules().as_slice());
    }

    #[test]
    fn test_set_rules_file_invalid_keeps_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let mut store = RuleStore::open(&path).unwrap();

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"[{"type":"A","keywords":[]},{"type":"A","keywords":[]}]"#).unwrap();
        assert!(store.set_rules_file(&bad).is_err());
        assert_eq!(store.rules_file_path(), path.as_path());
    }

    #[test]
    fn test_set_rules_file_switches() {
        let dir = tempdir().unwrap();
        let mut store = RuleStore::open(dir.path().join("rules.json")).unwrap();

        let other = dir.path().join("other.json");
        save_rules_to_json(&other, &sample_rules()).unwrap();

        store.set_rules_file(&other).unwrap();
        assert_eq!(store.rules_file_path(), other.as_path());
        assert_eq!(store.rules(), sample_rules().as_slice());

        // Later saves go to the new file.
        store.set_rules(vec![DocumentRule::new("Memo", ["memo"])]).unwrap();
        let reread = load_rules_from_json(&other).unwrap();
        assert_eq!(reread[0].doc_type, "Memo");
    }

    #[test]
    fn test_set_rules_reports_save_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let mut store = RuleStore::open(&path).unwrap();

        // Replace the file with a directory so the write fails.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let err = store.set_rules(sample_rules()).unwrap_err();
        assert!(matches!(err, RulesError::SaveFailed { .. }));
        assert_eq!(store.rules(), sample_rules().as_slice());
    }

    #[test]
    fn test_set_rules_rejects_invalid_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let mut store = RuleStore::open(&path).unwrap();
        store.set_rules(sample_rules()).unwrap();
        let on_disk = fs::read_to_string(&path).unwrap();

        let duplicate = vec![
            DocumentRule::new("Invoice", ["invoice"]),
            DocumentRule::new("Invoice", ["bill"]),
        ];
        let err = store.set_rules(duplicate).unwrap_err();
        assert!(matches!(err, RulesError::Invalid { .. }));

        let blank = vec![DocumentRule::new("  ", ["anything"])];
        assert!(matches!(
            store.set_rules(blank),
            Err(RulesError::Invalid { .. })
        ));

        assert_eq!(store.rules(), sample_rules().as_slice());
        assert_eq!(fs::read_to_string(&path).unwrap(), on_disk);
        store.reload_rules().unwrap();
        assert_eq!(store.rules(), sample_rules().as_slice());
    }
}
