//! folio-core - Core library for folio
//!
//! This crate provides the format registry, the editor content accessor
//! and the document export pipeline: serializers for every registered
//! format, the progress-driven export orchestrator and configuration.

pub mod error;
pub mod types;
pub mod config;
pub mod format;
pub mod content;
pub mod export;

pub use error::{FolioError, Result};
pub use types::*;
