//! Serializer trait and per-kind dispatch table

use super::page::{PageRenderer, PendingRender, TextPageRenderer, PAGE_MEDIA_TYPE};
use super::payload::{DocumentMeta, ExportContent, ExportPayload};
use super::text::{PlainTextSerializer, RichTextSerializer};
use super::web::{WebArchiveSerializer, WebPageSerializer};
use super::xml::{OpenDocumentSerializer, StructuredDataSerializer, StructuredDocumentSerializer};
use crate::format::{FormatDescriptor, FormatKind, FormatRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Media type of the fallback payload for unknown formats
pub const FALLBACK_MEDIA_TYPE: &str = "text/html";

/// Renders export content into one format family
///
/// Implementations are pure: identical inputs give identical output apart
/// from the timestamp carried in `meta`.
pub trait Serializer: Send + Sync {
    /// Family this serializer handles
    fn kind(&self) -> FormatKind;

    /// Media type of the produced payload
    fn media_type(&self) -> &str;

    /// Render the payload body
    fn render(&self, format: &FormatDescriptor, content: &ExportContent, meta: &DocumentMeta) -> String;
}

/// Outcome of a dispatch
pub enum Rendered {
    /// Payload is complete
    Ready(ExportPayload),
    /// Payload will arrive from a page renderer
    Pending(PendingRender),
}

impl Rendered {
    /// The payload, if rendering completed synchronously
    pub fn into_ready(self) -> Option<ExportPayload> {
        match self {
            Rendered::Ready(payload) => Some(payload),
            Rendered::Pending(_) => None,
        }
    }
}

impl std::fmt::Debug for Rendered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rendered::Ready(payload) => f.debug_tuple("Ready").field(&payload.filename).finish(),
            Rendered::Pending(_) => f.write_str("Pending"),
        }
    }
}

/// Dispatch table from format id to serializer
pub struct SerializerSet {
    registry: Arc<FormatRegistry>,
    serializers: HashMap<FormatKind, Box<dyn Serializer>>,
    page_renderer: Box<dyn PageRenderer>,
}

impl SerializerSet {
    /// Create a set with the default serializers and page renderer
    pub fn new(registry: Arc<FormatRegistry>) -> Self {
        Self::with_page_renderer(registry, Box::new(TextPageRenderer::default()))
    }

    /// Create a set with the default serializers and a custom page renderer
    pub fn with_page_renderer(registry: Arc<FormatRegistry>, page_renderer: Box<dyn PageRenderer>) -> Self {
        let mut set = Self {
            registry,
            serializers: HashMap::new(),
            page_renderer,
        };

        set.register(Box::new(StructuredDocumentSerializer));
        set.register(Box::new(WebPageSerializer));
        set.register(Box::new(WebArchiveSerializer));
        set.register(Box::new(RichTextSerializer));
        set.register(Box::new(StructuredDataSerializer));
        set.register(Box::new(OpenDocumentSerializer));
        set.register(Box::new(PlainTextSerializer));

        set
    }

    /// Register or replace the serializer for its kind
    pub fn register(&mut self, serializer: Box<dyn Serializer>) {
        self.serializers.insert(serializer.kind(), serializer);
    }

    /// Replace the page renderer
    pub fn set_page_renderer(&mut self, renderer: Box<dyn PageRenderer>) {
        self.page_renderer = renderer;
    }

    /// Registry used for id lookup
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Check whether a kind has a synchronous serializer
    pub fn handles(&self, kind: FormatKind) -> bool {
        self.serializers.contains_key(&kind)
    }

    /// Media type a format id exports as
    pub fn media_type(&self, format_id: &str) -> &str {
        match self.registry.lookup(format_id).map(|f| f.kind) {
            Some(FormatKind::PortablePage) => PAGE_MEDIA_TYPE,
            Some(kind) => self
                .serializers
                .get(&kind)
                .map(|s| s.media_type())
                .unwrap_or(FALLBACK_MEDIA_TYPE),
            None => FALLBACK_MEDIA_TYPE,
        }
    }

    /// Render content for a format id
    ///
    /// `filename` is the base name; the format's extension is appended.
    /// Unknown ids, and kinds without a serializer, yield the raw markup as
    /// an HTML payload.
    pub fn dispatch(
        &self,
        format_id: &str,
        content: &ExportContent,
        meta: &DocumentMeta,
        filename: &str,
    ) -> Rendered {
        let Some(format) = self.registry.lookup(format_id) else {
            warn!("Unknown export format '{}', falling back to HTML", format_id);
            return Rendered::Ready(Self::fallback(content, filename));
        };

        if format.kind == FormatKind::PortablePage {
            debug!("Deferring '{}' to page renderer", format.id);
            return Rendered::Pending(self.page_renderer.render(
                content,
                meta,
                format.filename_for(filename),
            ));
        }

        match self.serializers.get(&format.kind) {
            Some(serializer) => {
                let body = serializer.render(format, content, meta);
                debug!("Rendered {} bytes as {}", body.len(), format.id);
                Rendered::Ready(ExportPayload::text_body(
                    body,
                    serializer.media_type(),
                    format.filename_for(filename),
                ))
            }
            None => {
                warn!("No serializer for {:?}, falling back to HTML", format.kind);
                Rendered::Ready(Self::fallback(content, filename))
            }
        }
    }

    fn fallback(content: &ExportContent, filename: &str) -> ExportPayload {
        ExportPayload::text_body(
            content.markup.clone(),
            FALLBACK_MEDIA_TYPE,
            format!("{}.html", filename),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolioError;
    use crate::export::page::RenderCompletion;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn meta() -> DocumentMeta {
        DocumentMeta::new("Quarterly Report", "Ada Lovelace", Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap())
    }

    fn set() -> SerializerSet {
        SerializerSet::new(Arc::new(FormatRegistry::builtin()))
    }

    fn ready(set: &SerializerSet, id: &str, content: &ExportContent) -> ExportPayload {
        set.dispatch(id, content, &meta(), "doc")
            .into_ready()
            .expect("synchronous format")
    }

    #[test]
    fn test_media_types_per_format() {
        let set = set();
        let content = ExportContent::from_markup("<p>Body text</p>");
        let expected = [
            ("hsjf", "application/vnd.folio.document", "doc.hsjf"),
            ("klpx", "application/vnd.folio.document", "doc.klpx"),
            ("mntb", "application/vnd.folio.document", "doc.mntb"),
            ("qrzd", "application/vnd.folio.document", "doc.qrzd"),
            ("html", "text/html", "doc.html"),
            ("wxyz", "message/rfc822", "doc.wxyz"),
            ("abcd", "message/rfc822", "doc.abcd"),
            ("efgh", "application/rtf", "doc.efgh"),
            ("ijkl", "application/xml", "doc.ijkl"),
            ("mnop", "application/vnd.oasis.opendocument.text", "doc.mnop"),
            ("txt", "text/plain", "doc.txt"),
        ];

        for (id, media_type, filename) in expected {
            let payload = ready(&set, id, &content);
            assert_eq!(payload.media_type, media_type, "media type for {}", id);
            assert_eq!(payload.filename, filename, "filename for {}", id);
        }
    }

    #[test]
    fn test_metadata_embedded_verbatim() {
        let set = set();
        let content = ExportContent::from_markup("<p>Body text</p>");
        for format in set.registry().iter() {
            if !format.kind.embeds_metadata() || format.kind.is_deferred() {
                continue;
            }
            let text = ready(&set, format.id.as_str(), &content).text();
            assert!(text.contains("Quarterly Report"), "title missing in {}", format.id);
            assert!(text.contains("Ada Lovelace"), "author missing in {}", format.id);
        }
    }

    #[test]
    fn test_plain_text_round_trip() {
        let set = set();
        let content = ExportContent::from_markup("<p>Hello</p>");
        let meta = DocumentMeta::new("T", "A", Utc::now());
        let payload = set.dispatch("txt", &content, &meta, "doc").into_ready().unwrap();
        assert_eq!(payload.text(), "Hello");
    }

    #[test]
    fn test_unknown_format_falls_back_to_html() {
        let set = set();
        let content = ExportContent::from_markup("<p>Hello</p>");
        let payload = ready(&set, "zzzz", &content);
        assert_eq!(payload.media_type, "text/html");
        assert_eq!(payload.filename, "doc.html");
        assert_eq!(payload.text(), "<p>Hello</p>");
    }

    #[test]
    fn test_media_type_lookup() {
        let set = set();
        assert_eq!(set.media_type("pdf"), "application/pdf");
        assert_eq!(set.media_type("abcd"), "message/rfc822");
        assert_eq!(set.media_type("mnop"), "application/vnd.oasis.opendocument.text");
        assert_eq!(set.media_type("zzzz"), FALLBACK_MEDIA_TYPE);
    }

    #[test]
    fn test_portable_page_is_deferred() {
        let set = set();
        let content = ExportContent::from_markup("<p>Hello</p>");
        let rendered = set.dispatch("pdf", &content, &meta(), "doc");
        let Rendered::Pending(pending) = rendered else {
            panic!("pdf should be deferred");
        };
        let payload = pending.wait().unwrap();
        assert_eq!(payload.media_type, "application/pdf");
        assert_eq!(payload.filename, "doc.pdf");
        assert!(payload.body.starts_with(b"%PDF-"));
    }

    struct FailingRenderer;

    impl PageRenderer for FailingRenderer {
        fn render(&self, _content: &ExportContent, _meta: &DocumentMeta, _filename: String) -> PendingRender {
            let (completion, pending) = RenderCompletion::channel();
            completion.complete(Err(FolioError::RenderFailed("layout engine crashed".to_string())));
            pending
        }
    }

    #[test]
    fn test_custom_page_renderer_failure_propagates() {
        let set = SerializerSet::with_page_renderer(Arc::new(FormatRegistry::builtin()), Box::new(FailingRenderer));
        let content = ExportContent::from_markup("<p>Hello</p>");
        let Rendered::Pending(pending) = set.dispatch("pdf", &content, &meta(), "doc") else {
            panic!("pdf should be deferred");
        };
        assert!(matches!(pending.wait(), Err(FolioError::RenderFailed(_))));
    }

    struct ShoutingText;

    impl Serializer for ShoutingText {
        fn kind(&self) -> FormatKind {
            FormatKind::PlainText
        }

        fn media_type(&self) -> &str {
            "text/plain"
        }

        fn render(&self, _format: &FormatDescriptor, content: &ExportContent, _meta: &DocumentMeta) -> String {
            content.text.to_uppercase()
        }
    }

    #[test]
    fn test_register_replaces_kind() {
        let mut set = set();
        set.register(Box::new(ShoutingText));
        let content = ExportContent::from_markup("<p>Hello</p>");
        assert_eq!(ready(&set, "txt", &content).text(), "HELLO");
        assert!(set.handles(FormatKind::PlainText));
        assert!(!set.handles(FormatKind::PortablePage));
    }
}
