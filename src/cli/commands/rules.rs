//! Rule management commands.

use std::path::Path;

use console::style;

use crate::config::Settings;
use crate::models::default_rules;
use crate::rules::RuleStore;

use super::super::helpers::print_rules;

pub fn cmd_rules_show(settings: &Settings) -> anyhow::Result<()> {
    let store = RuleStore::open(&settings.rules_file)?;
    print_rules(store.rules(), store.rules_file_path());
    Ok(())
}

pub fn cmd_rules_reload(settings: &Settings) -> anyhow::Result<()> {
    let mut store = RuleStore::open(&settings.rules_file)?;
    store.reload_rules()?;
    println!(
        "{} Reloaded {} rule(s) from {}",
        style("✓").green(),
        store.rules().len(),
        store.rules_file_path().display()
    );
    Ok(())
}

pub fn cmd_rules_path(settings: &Settings) -> anyhow::Result<()> {
    println!("{}", settings.rules_file.display());
    Ok(())
}

/// Validate another rules file and show what it would classify with.
pub fn cmd_rules_use(settings: &Settings, file: &Path) -> anyhow::Result<()> {
    let mut store = RuleStore::open(&settings.rules_file)?;
    store.set_rules_file(file)?;

    println!(
        "{} Loaded {} rule(s) from {}",
        style("✓").green(),
        store.rules().len(),
        store.rules_file_path().display()
    );
    print_rules(store.rules(), store.rules_file_path());
    println!(
        "\nPass {} or set {} to classify with this file.",
        style(format!("--rules {}", file.display())).cyan(),
        style("DOCSORT_RULES_FILE").cyan()
    );
    Ok(())
}

pub fn cmd_rules_reset(settings: &Settings) -> anyhow::Result<()> {
    let mut store = RuleStore::open(&settings.rules_file)?;
    store.set_rules(default_rules())?;
    println!(
        "{} Restored {} default rule(s) to {}",
        style("✓").green(),
        store.rules().len(),
        store.rules_file_path().display()
    );
    Ok(())
}
