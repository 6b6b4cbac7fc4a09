//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod formats;
mod menu;
mod process;
mod rules;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "docsort")]
#[command(about = "Classify documents by keyword rules and file them by type")]
#[command(version)]
pub struct Cli {
    /// File or directory to process (opens the interactive menu when omitted)
    path: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Output directory for organized files
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Rules file to classify with
    #[arg(short, long, global = true)]
    rules: Option<PathBuf>,

    /// Move files instead of copying them
    #[arg(long = "move", global = true)]
    move_files: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Classify and organize a file or every file in a directory
    Process {
        /// File or directory to process
        path: PathBuf,
        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect and manage classification rules
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },

    /// List supported file formats and external tool availability
    Formats,

    /// Interactive menu
    Menu,
}

#[derive(Subcommand)]
enum RulesCommands {
    /// Show the active rules
    Show,
    /// Re-read the rules file from disk
    Reload,
    /// Print the active rules file path
    Path,
    /// Load and validate a different rules file
    Use {
        /// Rules file (must exist)
        file: PathBuf,
    },
    /// Restore the built-in default rules into the active rules file
    Reset,
}

/// Parse arguments, resolve settings, and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
        output_dir: cli.output,
        rules_file: cli.rules,
        move_files: cli.move_files,
    };
    let (settings, _config) = load_settings_with_options(options).await?;
    settings.ensure_directories()?;

    match (cli.command, cli.path) {
        (Some(Commands::Process { path, json }), _) => {
            process::cmd_process(&settings, &path, json)
        }
        (Some(Commands::Rules { command }), _) => match command {
            RulesCommands::Show => rules::cmd_rules_show(&settings),
            RulesCommands::Reload => rules::cmd_rules_reload(&settings),
            RulesCommands::Path => rules::cmd_rules_path(&settings),
            RulesCommands::Use { file } => rules::cmd_rules_use(&settings, &file),
            RulesCommands::Reset => rules::cmd_rules_reset(&settings),
        },
        (Some(Commands::Formats), _) => formats::cmd_formats(&settings),
        (Some(Commands::Menu), _) | (None, None) => menu::cmd_menu(&settings),
        (None, Some(path)) => process::cmd_process(&settings, &path, false),
    }
}
