//! Export request, metadata and payload types

use crate::types::{FormatId, RunTicket};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generator tag embedded in exported documents
pub const GENERATOR: &str = "Folio";

/// Content snapshot handed to serializers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContent {
    /// Serialized markup of the active surface
    pub markup: String,
    /// Plain-text view of the same surface
    pub text: String,
}

impl ExportContent {
    pub fn new(markup: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            text: text.into(),
        }
    }

    /// Snapshot of markup with its text extracted
    pub fn from_markup(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let text = crate::content::extract_text(&markup);
        Self { markup, text }
    }
}

/// Document metadata embedded by serializers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub generator: String,
}

impl DocumentMeta {
    pub fn new(title: impl Into<String>, author: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            created_at,
            generator: GENERATOR.to_string(),
        }
    }
}

/// Caller-supplied values for an export; missing values use defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub filename: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base filename (no extension)
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the document title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Fully resolved export request for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub format_id: FormatId,
    /// Base filename without extension
    pub filename: String,
    pub title: String,
    pub author: String,
}

/// Output artifact ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub body: Vec<u8>,
    pub media_type: String,
    pub filename: String,
}

impl ExportPayload {
    pub fn new(body: Vec<u8>, media_type: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            body,
            media_type: media_type.into(),
            filename: filename.into(),
        }
    }

    /// Payload from a text body
    pub fn text_body(body: String, media_type: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::new(body.into_bytes(), media_type, filename)
    }

    /// Body as text (lossy for binary payloads)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.body.len()
    }

    /// Short content digest
    pub fn digest(&self) -> String {
        blake3::hash(&self.body).to_hex()[..16].to_string()
    }
}

/// Summary of a completed export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReceipt {
    pub run: RunTicket,
    pub format_id: FormatId,
    pub filename: String,
    pub media_type: String,
    pub size: usize,
    pub digest: String,
    pub completed_at: DateTime<Utc>,
}

impl ExportReceipt {
    pub fn new(run: RunTicket, format_id: FormatId, payload: &ExportPayload) -> Self {
        Self {
            run,
            format_id,
            filename: payload.filename.clone(),
            media_type: payload.media_type.clone(),
            size: payload.size(),
            digest: payload.digest(),
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_from_markup() {
        let content = ExportContent::from_markup("<p>Hello</p>");
        assert_eq!(content.text, "Hello");
    }

    #[test]
    fn test_options_builder() {
        let opts = ExportOptions::new().filename("out").title("T").author("A");
        assert_eq!(opts.filename.as_deref(), Some("out"));
        assert_eq!(opts.title.as_deref(), Some("T"));
        assert_eq!(opts.author.as_deref(), Some("A"));
    }

    #[test]
    fn test_payload_digest_is_stable() {
        let a = ExportPayload::text_body("body".to_string(), "text/plain", "a.txt");
        let b = ExportPayload::text_body("body".to_string(), "text/plain", "b.txt");
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 16);
        assert_eq!(a.size(), 4);
    }

    #[test]
    fn test_receipt_from_payload() {
        let payload = ExportPayload::text_body("hello".to_string(), "text/plain", "doc.txt");
        let receipt = ExportReceipt::new(RunTicket::new(), FormatId::from("txt"), &payload);
        assert_eq!(receipt.filename, "doc.txt");
        assert_eq!(receipt.size, 5);
        assert_eq!(receipt.digest, payload.digest());
    }
}
