//! Interactive menu.

use std::path::PathBuf;

use console::style;

use crate::config::Settings;
use crate::pipeline::ProcessingPipeline;

use super::super::helpers::{build_pipeline, print_rules, prompt};
use super::process::{process_directory, process_file};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ProcessFile,
    ProcessDirectory,
    ShowRules,
    ReloadRules,
    SelectRulesFile,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::ProcessFile),
            "2" => Some(Self::ProcessDirectory),
            "3" => Some(Self::ShowRules),
            "4" => Some(Self::ReloadRules),
            "5" => Some(Self::SelectRulesFile),
            "6" | "q" | "quit" | "exit" => Some(Self::Exit),
            _ => None,
        }
    }
}

fn print_menu(pipeline: &ProcessingPipeline) {
    let store = pipeline.classifier().store();
    println!("\n{}", style("Document Processor").bold());
    println!(
        "Rules: {} ({} rule(s))   Output: {}",
        store.rules_file_path().display(),
        store.rules().len(),
        pipeline.config().output_directory.display()
    );
    println!("  1. Process a file");
    println!("  2. Process a directory");
    println!("  3. Show rules");
    println!("  4. Reload rules");
    println!("  5. Select rules file");
    println!("  6. Exit");
}

fn read_path(label: &str) -> anyhow::Result<Option<PathBuf>> {
    Ok(prompt(label)?
        .filter(|s| !s.is_empty())
        .map(|s| PathBuf::from(shellexpand::tilde(&s).as_ref())))
}

/// Run the interactive menu until the user exits or input ends.
///
/// Errors from individual actions are reported and the menu continues.
pub fn cmd_menu(settings: &Settings) -> anyhow::Result<()> {
    let mut pipeline = build_pipeline(settings)?;

    loop {
        print_menu(&pipeline);
        let Some(input) = prompt("\nChoice: ")? else {
            break;
        };

        let Some(choice) = MenuChoice::parse(&input) else {
            println!("{} Invalid choice: {}", style("!").yellow(), input);
            continue;
        };

        let outcome = match choice {
            MenuChoice::ProcessFile => match read_path("File path: ")? {
                Some(path) if path.is_file() => process_file(&pipeline, &path, false),
                Some(path) => {
                    println!("{} Not a file: {}", style("✗").red(), path.display());
                    Ok(())
                }
                None => Ok(()),
            },
            MenuChoice::ProcessDirectory => match read_path("Directory path: ")? {
                Some(path) => process_directory(&pipeline, &path, false),
                None => Ok(()),
            },
            MenuChoice::ShowRules => {
                let store = pipeline.classifier().store();
                print_rules(store.rules(), store.rules_file_path());
                Ok(())
            }
            MenuChoice::ReloadRules => {
                let store = pipeline.classifier_mut().store_mut();
                store.reload_rules().map(|()| {
                    println!(
                        "{} Reloaded {} rule(s)",
                        style("✓").green(),
                        store.rules().len()
                    );
                })
                .map_err(anyhow::Error::from)
            }
            MenuChoice::SelectRulesFile => match read_path("Rules file: ")? {
                Some(path) => {
                    let store = pipeline.classifier_mut().store_mut();
                    store
                        .set_rules_file(path)
                        .map(|()| {
                            println!(
                                "{} Using {} ({} rule(s))",
                                style("✓").green(),
                                store.rules_file_path().display(),
                                store.rules().len()
                            );
                        })
                        .map_err(anyhow::Error::from)
                }
                None => Ok(()),
            },
            MenuChoice::Exit => break,
        };

        if let Err(e) = outcome {
            println!("{} {}", style("✗").red(), e);
        }
    }

    println!("Goodbye.");
    Ok(())
}
