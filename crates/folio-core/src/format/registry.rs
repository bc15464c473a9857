//! Registry of export formats

use super::model::{FormatCategory, FormatDescriptor, FormatKind};
use crate::error::{FolioError, Result};
use crate::types::FormatId;
use std::collections::HashMap;

/// Read-only lookup table of export formats, keyed by id
///
/// Iteration follows registration order so pickers list formats the same
/// way every time.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    formats: Vec<FormatDescriptor>,
    index: HashMap<FormatId, usize>,
}

impl FormatRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in formats
    pub fn builtin() -> Self {
        use FormatCategory as C;
        use FormatKind as K;

        let builtin = [
            FormatDescriptor::new("hsjf", "HSJF", "Standard Folio document", "fa-file-word", C::Document, K::StructuredDocument),
            FormatDescriptor::new("klpx", "KLPX", "Document with macros", "fa-file-code", C::Document, K::StructuredDocument),
            FormatDescriptor::new("mntb", "MNTB", "Folio template", "fa-copy", C::Template, K::StructuredDocument),
            FormatDescriptor::new("qrzd", "QRZD", "Template with macros", "fa-cogs", C::Template, K::StructuredDocument),
            FormatDescriptor::new("pdf", "PDF", "Portable page document", "fa-file-pdf", C::Export, K::PortablePage),
            FormatDescriptor::new("html", "HTML", "Standard web page", "fa-file-code", C::Web, K::WebPage),
            FormatDescriptor::new("wxyz", "WXYZ", "Complete web archive", "fa-archive", C::Web, K::WebArchive),
            FormatDescriptor::new("abcd", "ABCD", "MIME web archive", "fa-file-archive", C::Web, K::WebArchive),
            FormatDescriptor::new("efgh", "EFGH", "Rich Text Format", "fa-file-text", C::Text, K::RichText),
            FormatDescriptor::new("ijkl", "IJKL", "Structured data", "fa-code", C::Data, K::StructuredData),
            FormatDescriptor::new("mnop", "MNOP", "OpenDocument text", "fa-file-contract", C::Document, K::OpenDocumentText),
            FormatDescriptor::new("txt", "TXT", "Plain text", "fa-file-lines", C::Text, K::PlainText),
        ];

        let mut registry = Self::new();
        for descriptor in builtin {
            let registered = registry.register(descriptor);
            debug_assert!(registered.is_ok(), "duplicate built-in format: {:?}", registered);
        }
        registry
    }

    /// Register a format; duplicate ids are rejected
    pub fn register(&mut self, descriptor: FormatDescriptor) -> Result<()> {
        if self.index.contains_key(&descriptor.id) {
            return Err(FolioError::Validation(format!(
                "Format '{}' is already registered",
                descriptor.id
            )));
        }
        self.index.insert(descriptor.id.clone(), self.formats.len());
        self.formats.push(descriptor);
        Ok(())
    }

    /// Look up a format by id
    pub fn lookup(&self, id: &str) -> Option<&FormatDescriptor> {
        self.index
            .get(&FormatId::from_string(id))
            .map(|&idx| &self.formats[idx])
    }

    /// Look up a format, failing with `UnknownFormat`
    pub fn require(&self, id: &str) -> Result<&FormatDescriptor> {
        self.lookup(id)
            .ok_or_else(|| FolioError::UnknownFormat(id.to_string()))
    }

    /// Check if a format id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    /// All formats in registration order
    pub fn iter(&self) -> impl Iterator<Item = &FormatDescriptor> {
        self.formats.iter()
    }

    /// Formats belonging to a category
    pub fn by_category(&self, category: FormatCategory) -> Vec<&FormatDescriptor> {
        self.formats
            .iter()
            .filter(|f| f.category == category)
            .collect()
    }

    /// Number of registered formats
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}
