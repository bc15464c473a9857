//! Persisted editor settings

use chrono::{DateTime, Utc};
use folio_core::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the settings document
pub const SETTINGS_FILE: &str = "folio-settings.json";

pub const MIN_ZOOM: u16 = 50;
pub const MAX_ZOOM: u16 = 200;
pub const DEFAULT_ZOOM: u16 = 100;
pub const ZOOM_STEP: u16 = 10;

/// Editor color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Default text styling for new documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDefaults {
    pub font_family: String,
    pub font_size: String,
    pub color: String,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_string(),
            font_size: "12".to_string(),
            color: "#0f172a".to_string(),
        }
    }
}

/// Background music preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicPrefs {
    /// Volume, 0.0..=1.0
    pub volume: f32,
    pub shuffle: bool,
    pub repeat: bool,
}

impl Default for MusicPrefs {
    fn default() -> Self {
        Self {
            volume: 0.5,
            shuffle: false,
            repeat: false,
        }
    }
}

/// All persisted editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    /// Zoom percentage, MIN_ZOOM..=MAX_ZOOM
    pub zoom: u16,
    pub styles: StyleDefaults,
    pub music: MusicPrefs,
    /// Last time the settings were written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            zoom: DEFAULT_ZOOM,
            styles: StyleDefaults::default(),
            music: MusicPrefs::default(),
            updated_at: None,
        }
    }
}

impl Settings {
    /// Switch between light and dark
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Zoom in by one step, up to the maximum
    pub fn zoom_in(&mut self) -> u16 {
        self.set_zoom(self.zoom.saturating_add(ZOOM_STEP))
    }

    /// Zoom out by one step, down to the minimum
    pub fn zoom_out(&mut self) -> u16 {
        self.set_zoom(self.zoom.saturating_sub(ZOOM_STEP))
    }

    /// Set the zoom level, clamped to the allowed range
    pub fn set_zoom(&mut self, zoom: u16) -> u16 {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.zoom
    }

    /// Fix out-of-range values read from disk
    fn normalize(mut self) -> Self {
        self.zoom = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.music.volume = self.music.volume.clamp(0.0, 1.0);
        self
    }
}

/// JSON file store for `Settings`
pub struct SettingsStore {
    base_dir: PathBuf,
}

impl SettingsStore {
    /// Create a store rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            base_dir: base_dir.into(),
        };
        store.ensure_dir()?;
        Ok(store)
    }

    /// Store in the platform data directory (~/.folio as fallback)
    pub fn default_location() -> Result<Self> {
        let base_dir = directories::ProjectDirs::from("dev", "folio", "folio")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".folio")
            });

        Self::new(base_dir)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.base_dir.exists() {
            fs::create_dir_all(&self.base_dir).map_err(|e| {
                FolioError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create settings directory: {}", e),
                ))
            })?;
            debug!("Created settings directory: {:?}", self.base_dir);
        }
        Ok(())
    }

    /// Path of the settings file
    pub fn path(&self) -> PathBuf {
        self.base_dir.join(SETTINGS_FILE)
    }

    fn temp_path(&self) -> PathBuf {
        self.base_dir.join(format!(".{}.tmp", SETTINGS_FILE))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Load settings, or defaults when none were saved yet
    pub fn load(&self) -> Result<Settings> {
        let path = self.path();
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {:?}, using defaults", path);
                return Ok(Settings::default());
            }
            Err(e) => return Err(FolioError::Io(e)),
        };

        let settings: Settings = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| FolioError::from(e).with_context(format!("Invalid settings file {:?}", path)))?;
        Ok(settings.normalize())
    }

    /// Write settings atomically (temp file, then rename)
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let temp_path = self.temp_path();
        let final_path = self.path();

        let mut stamped = settings.clone();
        stamped.updated_at = Some(Utc::now());

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            FolioError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, &stamped)?;
        writer.flush()?;

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            FolioError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        info!("Saved settings to {:?}", final_path);
        Ok(())
    }

    /// Load, apply `change`, save and return the new settings
    pub fn update<F>(&self, change: F) -> Result<Settings>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.load()?;
        change(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_test_store() -> (SettingsStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SettingsStore::new(temp_dir.path().join("data")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_store_creates_directory() {
        let (store, _temp) = create_test_store();
        assert!(store.base_dir().exists());
        assert!(store.path().ends_with(SETTINGS_FILE));
    }

    #[test]
    fn test_load_missing_returns_defaults() {
        let (store, _temp) = create_test_store();
        let settings = store.load().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.styles.font_family, "Inter");
        assert_eq!(settings.music.volume, 0.5);
    }

    #[test]
    fn test_save_and_load() {
        let (store, _temp) = create_test_store();
        let mut settings = Settings::default();
        settings.toggle_theme();
        settings.zoom_in();
        settings.music.shuffle = true;

        store.save(&settings).unwrap();
        assert!(!store.temp_path().exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(loaded.zoom, 110);
        assert!(loaded.music.shuffle);
        assert!(loaded.updated_at.is_some());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let (store, _temp) = create_test_store();
        fs::write(store.path(), r#"{"theme":"dark","zoom":500}"#).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(loaded.zoom, MAX_ZOOM);
        assert_eq!(loaded.styles, StyleDefaults::default());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let (store, _temp) = create_test_store();
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut settings = Settings::default();
        for _ in 0..20 {
            settings.zoom_in();
        }
        assert_eq!(settings.zoom, MAX_ZOOM);
        for _ in 0..20 {
            settings.zoom_out();
        }
        assert_eq!(settings.zoom, MIN_ZOOM);
        assert_eq!(settings.set_zoom(7), MIN_ZOOM);
        assert_eq!(settings.set_zoom(130), 130);
    }

    #[test]
    fn test_toggle_theme_twice() {
        let mut settings = Settings::default();
        assert_eq!(settings.toggle_theme(), Theme::Dark);
        assert_eq!(settings.toggle_theme(), Theme::Light);
    }

    #[test]
    fn test_update_persists() {
        let (store, _temp) = create_test_store();
        let updated = store.update(|s| {
            s.zoom_out();
        }).unwrap();
        assert_eq!(updated.zoom, 90);
        assert_eq!(store.load().unwrap().zoom, 90);
    }
}
