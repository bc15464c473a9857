//! Format descriptor models

use crate::types::FormatId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display category of a format
///
/// Informational only; no export behavior branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatCategory {
    Document,
    Template,
    Export,
    Web,
    Text,
    Data,
}

impl FormatCategory {
    /// All categories in display order
    pub fn all() -> &'static [FormatCategory] {
        &[
            FormatCategory::Document,
            FormatCategory::Template,
            FormatCategory::Export,
            FormatCategory::Web,
            FormatCategory::Text,
            FormatCategory::Data,
        ]
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            FormatCategory::Document => "Documents",
            FormatCategory::Template => "Templates",
            FormatCategory::Export => "Export",
            FormatCategory::Web => "Web",
            FormatCategory::Text => "Text",
            FormatCategory::Data => "Data",
        }
    }
}

impl fmt::Display for FormatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormatCategory::Document => "document",
            FormatCategory::Template => "template",
            FormatCategory::Export => "export",
            FormatCategory::Web => "web",
            FormatCategory::Text => "text",
            FormatCategory::Data => "data",
        };
        f.write_str(s)
    }
}

/// Serializer family a format is rendered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    /// Custom XML envelope with CDATA markup
    StructuredDocument,
    /// Fixed-page document produced by a page renderer
    PortablePage,
    /// Self-contained HTML page
    WebPage,
    /// `multipart/related` MIME archive
    WebArchive,
    /// RTF preamble plus text
    RichText,
    /// Generic XML with metadata block
    StructuredData,
    /// OpenDocument-shaped content XML
    OpenDocumentText,
    /// Extracted text, no markup
    PlainText,
}

impl FormatKind {
    /// Whether the output embeds title and author
    pub fn embeds_metadata(&self) -> bool {
        !matches!(self, FormatKind::PlainText)
    }

    /// Whether rendering completes asynchronously
    pub fn is_deferred(&self) -> bool {
        matches!(self, FormatKind::PortablePage)
    }
}

/// Immutable description of a registered format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatDescriptor {
    /// Unique registry key
    pub id: FormatId,
    /// Short display name (e.g. "HSJF")
    pub display_name: String,
    /// One-line description
    pub description: String,
    /// Icon reference for pickers
    pub icon: String,
    /// Display category
    pub category: FormatCategory,
    /// Serializer family
    pub kind: FormatKind,
    /// File extension without the dot
    pub extension: String,
}

impl FormatDescriptor {
    /// Create a descriptor whose extension equals its id
    pub fn new(
        id: &str,
        display_name: &str,
        description: &str,
        icon: &str,
        category: FormatCategory,
        kind: FormatKind,
    ) -> Self {
        Self {
            id: FormatId::from_string(id),
            display_name: display_name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            category,
            kind,
            extension: id.to_string(),
        }
    }

    /// Override the file extension
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    /// Full filename for a base name
    pub fn filename_for(&self, base: &str) -> String {
        format!("{}.{}", base, self.extension)
    }
}
