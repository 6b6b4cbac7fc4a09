//! Shared helper functions for CLI commands.

use std::io::{self, BufRead, Write};

use console::style;

use crate::classify::KeywordClassifier;
use crate::config::Settings;
use crate::extract::ExtractorRegistry;
use crate::models::{DocumentRule, ProcessingResult};
use crate::pipeline::ProcessingPipeline;
use crate::rules::RuleStore;

/// Open the rule store and wire up the pipeline for the resolved settings.
pub fn build_pipeline(settings: &Settings) -> anyhow::Result<ProcessingPipeline> {
    let store = RuleStore::open(&settings.rules_file)?;
    tracing::debug!(
        "Loaded {} rules from {}",
        store.rules().len(),
        store.rules_file_path().display()
    );

    let registry =
        ExtractorRegistry::with_defaults(settings.tesseract(), settings.pdf_ocr_fallback);
    Ok(ProcessingPipeline::new(
        registry,
        KeywordClassifier::new(store),
        settings.processing_config(),
    ))
}

/// Truncate a string for single-line display, respecting char boundaries.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

pub fn print_rules(rules: &[DocumentRule], source: &std::path::Path) {
    println!(
        "\n{} ({})",
        style("Classification Rules").bold(),
        source.display()
    );
    println!("{}", "-".repeat(60));

    if rules.is_empty() {
        println!("{} No rules defined", style("!").yellow());
        return;
    }

    for rule in rules {
        println!(
            "{:<20} {}",
            style(truncate(&rule.doc_type, 20)).cyan(),
            truncate(&rule.keywords.join(", "), 80)
        );
    }
    println!("\n{} rule(s)", rules.len());
}

pub fn print_summary(result: &ProcessingResult) {
    println!("\n{}", style("Summary").bold());
    println!("{}", "-".repeat(40));

    for (doc_type, count) in result.counts_by_type() {
        println!("  {:<28} {:>6}", doc_type, count);
    }

    let failures: Vec<_> = result.outcomes.iter().filter(|o| !o.success).collect();
    if !failures.is_empty() {
        println!("\n{}", style("Failed").bold());
        for outcome in failures {
            println!(
                "  {} {}: {}",
                style("✗").red(),
                outcome.filename,
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    println!(
        "\n{} {} processed, {} failed",
        if result.failed_count == 0 {
            style("✓").green()
        } else {
            style("!").yellow()
        },
        result.processed_count,
        result.failed_count
    );
}

/// Print `label` and read one trimmed line. `None` on end of input.
pub fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer string", 10), "a longe...");
        assert_eq!(truncate("déjà vu déjà vu", 8), "déjà ...");
    }
}
