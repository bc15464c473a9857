//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod export;
pub mod formats;
pub mod settings;
pub mod stats;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_core::config::FolioConfig;
use folio_core::format::FormatRegistry;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-local configuration file
pub const DEFAULT_CONFIG_PATH: &str = ".folio/config.toml";

/// folio - export editor documents to many formats
#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export an HTML document
    Export(export::ExportArgs),

    /// List registered export formats
    Formats(formats::FormatsArgs),

    /// Show word, character and reading-time counts
    Stats(stats::StatsArgs),

    /// Manage persisted editor settings
    #[command(subcommand)]
    Settings(settings::SettingsCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Export(args) => export::execute(args, config_path),
        Commands::Formats(args) => formats::execute(args),
        Commands::Stats(args) => stats::execute(args, config_path),
        Commands::Settings(cmd) => settings::execute(cmd),
        Commands::Config(cmd) => config::execute(cmd, config_path),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Path of the configuration file in use
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load and validate configuration
///
/// An explicit `--config` must exist; the default path falls back to
/// built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<FolioConfig> {
    let path = config_path(explicit);
    let config = match explicit {
        Some(_) => FolioConfig::load(&path),
        None => FolioConfig::load_or_default(&path),
    }
    .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    debug!("Using configuration from {}", path.display());
    config
        .validate(&FormatRegistry::builtin())
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}

/// Read an HTML file, or stdin when no path is given
pub fn read_markup(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin"),
    }
}
