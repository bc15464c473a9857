//! Stats command
//!
//! Word, character and reading-time counts for a document.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use folio_core::content::{ContentAccessor, Workspace};

use super::read_markup;

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// HTML input file (stdin if not specified)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Second HTML file; counts both panels
    #[arg(long)]
    pub secondary: Option<PathBuf>,

    /// Print the extracted plain text instead of counts
    #[arg(long)]
    pub text: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the stats command
pub fn execute(args: StatsArgs, config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_path)?;
    let primary = read_markup(args.input.as_deref())?;
    let workspace = match &args.secondary {
        Some(path) => Workspace::dual(primary, read_markup(Some(path))?),
        None => Workspace::single(primary),
    };

    if args.text {
        println!("{}", workspace.active_text());
        return Ok(());
    }

    let stats = workspace.stats(config.editor.words_per_minute);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{:<14} {}", "Words:".bold(), stats.words);
        println!("{:<14} {}", "Characters:".bold(), stats.characters);
        println!("{:<14} {} min", "Reading time:".bold(), stats.reading_minutes);
    }

    Ok(())
}
