//! Process command: classify and organize files.

use std::path::Path;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Settings;
use crate::models::FileOutcome;
use crate::pipeline::{ProcessingEvent, ProcessingPipeline};

use super::super::helpers::{build_pipeline, print_summary};

/// Process a file or a directory given on the command line.
pub fn cmd_process(settings: &Settings, path: &Path, json: bool) -> anyhow::Result<()> {
    let pipeline = build_pipeline(settings)?;

    if path.is_dir() {
        process_directory(&pipeline, path, json)
    } else {
        process_file(&pipeline, path, json)
    }
}

pub(super) fn process_file(
    pipeline: &ProcessingPipeline,
    path: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let filename = crate::extract::file_name_of(path);

    match pipeline.process_single_file(path) {
        Ok(doc) => {
            if json {
                let outcome = FileOutcome::succeeded(filename, doc.document_type());
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }

            println!(
                "{} {} → {}",
                style("✓").green(),
                style(&doc.metadata.filename).bold(),
                style(doc.document_type()).cyan()
            );
            if let Some(ref classification) = doc.metadata.classification {
                if !classification.matched_keywords.is_empty() {
                    println!(
                        "  Matched: {}",
                        classification.matched_keywords.join(", ")
                    );
                }
            }
            println!(
                "  {} to {}",
                if pipeline.config().move_files {
                    "Moved"
                } else {
                    "Copied"
                },
                doc.destination.display()
            );
            Ok(())
        }
        // The caller reports the error; JSON mode also emits the outcome.
        Err(e) => {
            if json {
                let outcome = FileOutcome::failed(filename, e.to_string());
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
            Err(e.into())
        }
    }
}

pub(super) fn process_directory(
    pipeline: &ProcessingPipeline,
    dir: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let mut progress: Option<ProgressBar> = None;

    let result = pipeline.process_directory_with(dir, |event| match event {
        ProcessingEvent::BatchStarted { total } if !json => {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                    .unwrap()
                    .progress_chars("=>-"),
            );
            progress = Some(pb);
        }
        ProcessingEvent::FileStarted { filename } => {
            if let Some(ref pb) = progress {
                pb.set_message(filename.to_string());
            }
        }
        ProcessingEvent::FileCompleted { .. } | ProcessingEvent::FileFailed { .. } => {
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }
        ProcessingEvent::BatchCompleted { .. } => {
            if let Some(pb) = progress.take() {
                pb.finish_and_clear();
            }
        }
        _ => {}
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{} Processed {} file(s) from {}",
            style("✓").green(),
            result.total(),
            dir.display()
        );
        print_summary(&result);
    }
    Ok(())
}
