//! Formats command.

use console::style;

use crate::config::Settings;
use crate::extract::{check_tools, install_instructions, ExtractorRegistry};

/// List extractors, their extensions, and which external tools are installed.
pub fn cmd_formats(settings: &Settings) -> anyhow::Result<()> {
    let tesseract = settings.tesseract();
    let ocr_available = tesseract.is_some();
    let registry = ExtractorRegistry::with_defaults(tesseract, settings.pdf_ocr_fallback);

    println!("\n{}", style("Supported Formats").bold());
    println!("{}", "-".repeat(60));
    for extractor in registry.extractors() {
        println!(
            "{:<24} {}",
            style(extractor.name()).cyan(),
            extractor.supported_formats().join(" ")
        );
    }

    println!("\n{}", style("External Tools").bold());
    println!("{}", "-".repeat(60));
    for (tool, found) in check_tools() {
        let mark = if found {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!("  {} {}", mark, tool);
    }

    if !ocr_available {
        println!(
            "\n{} Tesseract not found; images will not be OCR'd.",
            style("!").yellow()
        );
        println!("{}", install_instructions());
    }
    Ok(())
}
