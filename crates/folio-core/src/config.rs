//! Configuration management for folio

use crate::content::DEFAULT_WORDS_PER_MINUTE;
use crate::error::{FolioError, Result};
use crate::export::{ExportDefaults, PageLayout, ProgressSchedule};
use crate::format::FormatRegistry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Export settings
    pub export: ExportConfig,
    /// Editor settings
    pub editor: EditorConfig,
    /// Page layout for the portable-page format
    pub page: PageConfig,
}

impl FolioConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FolioError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: FolioConfig = toml::from_str(&content)?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration, using defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(FolioError::FileNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FolioError::Toml(e.to_string()))
    }

    /// Check value ranges and the default format
    pub fn validate(&self, registry: &FormatRegistry) -> Result<()> {
        let export = &self.export;
        if !(1..=100).contains(&export.step_percent) {
            return Err(FolioError::Config(format!(
                "export.step_percent must be between 1 and 100, got {}",
                export.step_percent
            )));
        }
        if export.default_filename.trim().is_empty() {
            return Err(FolioError::Config(
                "export.default_filename must not be empty".to_string(),
            ));
        }
        if let Some(ref id) = export.default_format {
            if !registry.contains(id) {
                return Err(FolioError::Config(format!(
                    "export.default_format '{}' is not a known format",
                    id
                )));
            }
        }
        if self.editor.words_per_minute == 0 {
            return Err(FolioError::Config(
                "editor.words_per_minute must be positive".to_string(),
            ));
        }
        if !(0.0..=50.0).contains(&self.page.margin_mm) {
            return Err(FolioError::Config(format!(
                "page.margin_mm must be between 0 and 50, got {}",
                self.page.margin_mm
            )));
        }
        if !(4.0..=72.0).contains(&self.page.font_size) {
            return Err(FolioError::Config(format!(
                "page.font_size must be between 4 and 72, got {}",
                self.page.font_size
            )));
        }
        Ok(())
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Base filename when none is given
    pub default_filename: String,
    /// Document title when none is given
    pub default_title: String,
    /// Document author when none is given
    pub default_author: String,
    /// Format preselected by the CLI
    pub default_format: Option<String>,
    /// Directory exported files are written to
    pub output_dir: PathBuf,
    /// Progress percentage points per tick
    pub step_percent: u8,
    /// Milliseconds between progress ticks
    pub tick_interval_ms: u64,
    /// Milliseconds between 100% and completion
    pub settle_delay_ms: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let defaults = ExportDefaults::default();
        let schedule = ProgressSchedule::default();
        Self {
            default_filename: defaults.filename,
            default_title: defaults.title,
            default_author: defaults.author,
            default_format: None,
            output_dir: PathBuf::from("."),
            step_percent: schedule.step_percent,
            tick_interval_ms: schedule.interval.as_millis() as u64,
            settle_delay_ms: schedule.settle.as_millis() as u64,
        }
    }
}

impl ExportConfig {
    /// Request defaults for the orchestrator
    pub fn defaults(&self) -> ExportDefaults {
        ExportDefaults {
            filename: self.default_filename.clone(),
            title: self.default_title.clone(),
            author: self.default_author.clone(),
        }
    }

    /// Progress schedule for the orchestrator
    pub fn schedule(&self) -> ProgressSchedule {
        ProgressSchedule {
            step_percent: self.step_percent,
            interval: Duration::from_millis(self.tick_interval_ms),
            settle: Duration::from_millis(self.settle_delay_ms),
        }
    }
}

/// Editor-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Reading speed for reading-time estimates
    pub words_per_minute: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

/// Page layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Margin in millimetres
    pub margin_mm: f32,
    /// Body font size in points
    pub font_size: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        let layout = PageLayout::default();
        Self {
            margin_mm: layout.margin_mm,
            font_size: layout.font_size,
        }
    }
}

impl PageConfig {
    pub fn layout(&self) -> PageLayout {
        PageLayout {
            margin_mm: self.margin_mm,
            font_size: self.font_size,
        }
    }
}
