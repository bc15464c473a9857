//! Error types for folio

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for folio
#[derive(Debug, Error)]
pub enum FolioError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Format id not present in the registry
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// An export run is already in progress
    #[error("An export is already in progress")]
    ExportInFlight,

    /// Operation not allowed in the current export phase
    #[error("Cannot {action} while export is {phase}")]
    InvalidTransition { phase: String, action: String },

    /// Page rendering failed or was abandoned by the renderer
    #[error("Page rendering failed: {0}")]
    RenderFailed(String),

    /// Payload could not be delivered
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FolioError>,
    },
}

impl FolioError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FolioError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for FolioError {
    fn from(err: toml::de::Error) -> Self {
        FolioError::Toml(err.to_string())
    }
}

/// Result type alias for folio
pub type Result<T> = std::result::Result<T, FolioError>;
