//! CLI frontend for the Storyweave story engine.

mod commands;
mod logging;

use std::process;

use clap::{Parser, Subcommand};
use sw_core::{DuplicatePolicy, StoryConfig};

#[derive(Parser)]
#[command(
    name = "sw",
    about = "Storyweave, a choice-driven story engine",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Passage the story starts from
    #[arg(long, default_value = "start", global = true)]
    start: String,

    /// Let later passages overwrite earlier ones with the same name
    #[arg(long, global = true)]
    replace_duplicates: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the story line by line on stdin/stdout
    Play,

    /// List every passage and its choices
    Passages {
        /// Print passages as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report choices that lead to passages that do not exist
    Check,

    /// Launch the interactive terminal UI
    Tui,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let policy = if cli.replace_duplicates {
        DuplicatePolicy::Replace
    } else {
        DuplicatePolicy::Reject
    };
    let config = StoryConfig::default()
        .with_start(cli.start)
        .with_duplicate_policy(policy);

    let result = match cli.command {
        Commands::Play => commands::play::run(config),
        Commands::Passages { json } => commands::passages::run(config, json),
        Commands::Check => commands::check::run(config),
        Commands::Tui => commands::tui::run(config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
