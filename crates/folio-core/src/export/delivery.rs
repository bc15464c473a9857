//! Payload delivery

use super::payload::ExportPayload;
use crate::error::Result;
use std::path::PathBuf;

/// Hands a finished payload to its destination
pub trait Delivery {
    /// Save the payload, returning where it went
    fn save(&mut self, payload: &ExportPayload) -> Result<PathBuf>;
}

/// In-memory delivery for testing
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryDelivery {
    pub saved: Vec<ExportPayload>,
}

#[cfg(test)]
impl MemoryDelivery {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Delivery for MemoryDelivery {
    fn save(&mut self, payload: &ExportPayload) -> Result<PathBuf> {
        self.saved.push(payload.clone());
        Ok(PathBuf::from(&payload.filename))
    }
}
