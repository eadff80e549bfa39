//! Standalone TUI binary for Storyweave.

use std::process;

use clap::Parser;
use sw_core::{DuplicatePolicy, StoryConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sw-tui", about = "Play a Storyweave story in the terminal", version)]
struct Args {
    /// Passage to start from
    #[arg(long, default_value = "start")]
    start: String,

    /// Let later passages overwrite earlier ones with the same name
    #[arg(long)]
    replace_duplicates: bool,
}

fn main() {
    let args = Args::parse();

    // Logs would draw over the alternate screen, so only log on request.
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let policy = if args.replace_duplicates {
        DuplicatePolicy::Replace
    } else {
        DuplicatePolicy::Reject
    };
    let config = StoryConfig::default()
        .with_start(args.start)
        .with_duplicate_policy(policy);

    let engine = match sw_core::demo::demo_story(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = sw_tui::terminal::run(sw_tui::app::StoryApp::new(engine)) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
