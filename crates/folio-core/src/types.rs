//! Core type definitions for folio

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a registered export format (e.g. `hsjf`, `pdf`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormatId(pub String);

impl FormatId {
    /// Create a FormatId from a string
    pub fn from_string(s: impl Into<String>) -> Self {
        FormatId(s.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FormatId {
    fn from(s: &str) -> Self {
        FormatId(s.to_string())
    }
}

/// Identifies a single export run
///
/// Ticks carrying a ticket from a cancelled or finished run are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunTicket(pub Uuid);

impl RunTicket {
    /// Generate a new ticket
    pub fn new() -> Self {
        RunTicket(Uuid::new_v4())
    }
}

impl Default for RunTicket {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which panel of the dual editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelSide {
    Primary,
    Secondary,
}

impl PanelSide {
    /// Short name used in generated filenames
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelSide::Primary => "primary",
            PanelSide::Secondary => "secondary",
        }
    }
}

impl fmt::Display for PanelSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_id_display() {
        let id = FormatId::from_string("hsjf");
        assert_eq!(id.to_string(), "hsjf");
        assert_eq!(id, FormatId::from("hsjf"));
    }

    #[test]
    fn test_run_ticket_uniqueness() {
        assert_ne!(RunTicket::new(), RunTicket::new());
    }

    #[test]
    fn test_panel_side_serialization() {
        let json = serde_json::to_string(&PanelSide::Secondary).unwrap();
        assert_eq!(json, "\"secondary\"");
    }
}
