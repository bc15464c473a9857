//! folio-storage - Storage library for folio
//!
//! This crate persists editor settings and delivers exported documents
//! to the file system.

mod file_delivery;
mod settings_store;

pub use file_delivery::FileSystemDelivery;
pub use settings_store::{
    MusicPrefs, Settings, SettingsStore, StyleDefaults, Theme, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM,
    SETTINGS_FILE, ZOOM_STEP,
};
