//! Config command
//!
//! Manage folio configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;
use std::path::Path;

use folio_core::config::FolioConfig;
use folio_core::format::FormatRegistry;

use super::config_path;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, explicit: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(explicit, json),
        ConfigCommand::Init { force } => init_config(explicit, force),
        ConfigCommand::Validate => validate_config(explicit),
    }
}

fn show_config(explicit: Option<&Path>, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let path = config_path(explicit);
    let config = super::load_config(explicit)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", "Configuration:".bold().underline());
        if path.exists() {
            println!("{}", path.display().to_string().dimmed());
        } else {
            println!("{}", "(built-in defaults)".dimmed());
        }
        println!();
        println!("{}", config.to_toml()?);
    }

    Ok(())
}

fn init_config(explicit: Option<&Path>, force: bool) -> Result<()> {
    use colored::Colorize;

    let path = config_path(explicit);
    if path.exists() && !force {
        eprintln!(
            "{} Configuration already exists at {}. Use '{}' to overwrite.",
            "⚠".yellow(),
            path.display(),
            "--force".cyan()
        );
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = format!("# folio configuration\n\n{}", FolioConfig::default().to_toml()?);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Wrote default configuration to {}", "✓".green(), path.display());
    Ok(())
}

fn validate_config(explicit: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let path = config_path(explicit);
    if !path.exists() {
        eprintln!(
            "{} Configuration not found at {}",
            "✗".red(),
            path.display()
        );
        return Ok(());
    }

    let config = FolioConfig::load(&path)?;
    println!("{} Configuration is valid TOML", "✓".green());

    match config.validate(&FormatRegistry::builtin()) {
        Ok(()) => println!("{} All values in range", "✓".green()),
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            anyhow::bail!("Configuration at {} is invalid", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        init_config(Some(&path), false).unwrap();
        let config = FolioConfig::load(&path).unwrap();
        assert_eq!(config.export.step_percent, 20);
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[export]\nstep_percent = 50\n").unwrap();

        init_config(Some(&path), false).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("50"));

        init_config(Some(&path), true).unwrap();
        assert_eq!(FolioConfig::load(&path).unwrap().export.step_percent, 20);
    }

    #[test]
    fn test_validate_out_of_range() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[page]\nfont_size = 1.0\n").unwrap();
        assert!(validate_config(Some(&path)).is_err());
    }
}
