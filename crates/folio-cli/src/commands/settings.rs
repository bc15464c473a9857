//! Settings command
//!
//! Inspect and change persisted editor settings.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;

use folio_storage::{Settings, SettingsStore};

/// Settings subcommands
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show current settings
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,

        /// Settings directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Switch between light and dark theme
    ToggleTheme {
        /// Settings directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Change the zoom level
    Zoom {
        #[command(subcommand)]
        action: ZoomAction,

        /// Settings directory
        #[arg(long, global = true)]
        dir: Option<PathBuf>,
    },

    /// Restore default settings
    Reset {
        /// Settings directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

/// Zoom adjustments
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ZoomAction {
    /// One step larger
    In,
    /// One step smaller
    Out,
    /// Exact percentage (clamped to 50..=200)
    Set { percent: u16 },
}

/// Execute the settings command
pub fn execute(cmd: SettingsCommand) -> Result<()> {
    use colored::Colorize;

    match cmd {
        SettingsCommand::Show { json, dir } => {
            let store = open_store(dir)?;
            let settings = store.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                print_settings(&store, &settings);
            }
        }
        SettingsCommand::ToggleTheme { dir } => {
            let store = open_store(dir)?;
            let settings = store.update(|s| {
                s.toggle_theme();
            })?;
            println!("{} Theme set to {}", "✓".green(), settings.theme.to_string().cyan());
        }
        SettingsCommand::Zoom { action, dir } => {
            let store = open_store(dir)?;
            let settings = store.update(|s| {
                match action {
                    ZoomAction::In => s.zoom_in(),
                    ZoomAction::Out => s.zoom_out(),
                    ZoomAction::Set { percent } => s.set_zoom(percent),
                };
            })?;
            println!("{} Zoom set to {}%", "✓".green(), settings.zoom.to_string().cyan());
        }
        SettingsCommand::Reset { dir } => {
            let store = open_store(dir)?;
            store.save(&Settings::default())?;
            println!("{} Settings reset to defaults.", "✓".green());
        }
    }

    Ok(())
}

fn open_store(dir: Option<PathBuf>) -> Result<SettingsStore> {
    let store = match dir {
        Some(dir) => SettingsStore::new(dir),
        None => SettingsStore::default_location(),
    };
    store.context("Failed to open settings directory")
}

fn print_settings(store: &SettingsStore, settings: &Settings) {
    use colored::Colorize;

    println!("{}", "Settings:".bold().underline());
    println!("{}", store.path().display().to_string().dimmed());
    println!();
    println!("  theme        {}", settings.theme);
    println!("  zoom         {}%", settings.zoom);
    println!(
        "  styles       {} {}pt {}",
        settings.styles.font_family, settings.styles.font_size, settings.styles.color
    );
    println!(
        "  music        volume {:.0}%, shuffle {}, repeat {}",
        settings.music.volume * 100.0,
        on_off(settings.music.shuffle),
        on_off(settings.music.repeat)
    );
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
