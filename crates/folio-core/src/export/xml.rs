//! XML-based serializers: custom document envelope, structured data and
//! OpenDocument content

use super::escape::{cdata, escape_xml};
use super::payload::{DocumentMeta, ExportContent};
use super::serializer::Serializer;
use crate::format::{FormatDescriptor, FormatKind};
use chrono::SecondsFormat;

/// Namespace of the custom document envelope
pub const DOCUMENT_NAMESPACE: &str = "http://schemas.folio.dev/custom/2026";

/// Media type shared by the custom document formats
pub const DOCUMENT_MEDIA_TYPE: &str = "application/vnd.folio.document";

fn created(meta: &DocumentMeta) -> String {
    meta.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Custom XML envelope around the editor markup
///
/// The four document/template ids share this serializer and differ only in
/// the `<format>` element and file extension.
pub struct StructuredDocumentSerializer;

impl Serializer for StructuredDocumentSerializer {
    fn kind(&self) -> FormatKind {
        FormatKind::StructuredDocument
    }

    fn media_type(&self) -> &str {
        DOCUMENT_MEDIA_TYPE
    }

    fn render(&self, format: &FormatDescriptor, content: &ExportContent, meta: &DocumentMeta) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        out.push_str(&format!("<CustomDocument xmlns=\"{}\">\n", DOCUMENT_NAMESPACE));
        out.push_str("    <metadata>\n");
        out.push_str(&format!("        <title>{}</title>\n", escape_xml(&meta.title)));
        out.push_str(&format!("        <author>{}</author>\n", escape_xml(&meta.author)));
        out.push_str(&format!("        <created>{}</created>\n", created(meta)));
        out.push_str(&format!("        <format>{}</format>\n", escape_xml(format.id.as_str())));
        out.push_str(&format!("        <generator>{}</generator>\n", escape_xml(&meta.generator)));
        out.push_str("    </metadata>\n");
        out.push_str("    <content>\n");
        out.push_str(&format!("        {}\n", cdata(&content.markup)));
        out.push_str("    </content>\n");
        out.push_str("</CustomDocument>\n");
        out
    }
}

/// Generic XML document with a metadata block
pub struct StructuredDataSerializer;

impl Serializer for StructuredDataSerializer {
    fn kind(&self) -> FormatKind {
        FormatKind::StructuredData
    }

    fn media_type(&self) -> &str {
        "application/xml"
    }

    fn render(&self, _format: &FormatDescriptor, content: &ExportContent, meta: &DocumentMeta) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<document>
    <metadata>
        <title>{title}</title>
        <author>{author}</author>
        <created>{created}</created>
        <generator>{generator}</generator>
    </metadata>
    <content>
        {body}
    </content>
</document>
"#,
            title = escape_xml(&meta.title),
            author = escape_xml(&meta.author),
            created = created(meta),
            generator = escape_xml(&meta.generator),
            body = cdata(&content.markup),
        )
    }
}

/// Minimal OpenDocument `content.xml`
///
/// Header paragraphs carry title, author and date; the body follows as one
/// paragraph per line of extracted text.
pub struct OpenDocumentSerializer;

impl Serializer for OpenDocumentSerializer {
    fn kind(&self) -> FormatKind {
        FormatKind::OpenDocumentText
    }

    fn media_type(&self) -> &str {
        "application/vnd.oasis.opendocument.text"
    }

    fn render(&self, _format: &FormatDescriptor, content: &ExportContent, meta: &DocumentMeta) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(
            "<office:document-content \
             xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\" \
             xmlns:text=\"urn:oasis:names:tc:opendocument:xmlns:text:1.0\" \
             office:version=\"1.2\">\n",
        );
        out.push_str("    <office:body>\n");
        out.push_str("        <office:text>\n");
        out.push_str(&format!(
            "            <text:p text:style-name=\"Title\">{}</text:p>\n",
            escape_xml(&meta.title)
        ));
        out.push_str(&format!(
            "            <text:p text:style-name=\"Author\">Author: {}</text:p>\n",
            escape_xml(&meta.author)
        ));
        out.push_str(&format!(
            "            <text:p text:style-name=\"Date\">Date: {}</text:p>\n",
            meta.created_at.format("%Y-%m-%d")
        ));
        for line in content.text.lines() {
            if line.trim().is_empty() {
                out.push_str("            <text:p/>\n");
            } else {
                out.push_str(&format!("            <text:p>{}</text:p>\n", escape_xml(line)));
            }
        }
        out.push_str("        </office:text>\n");
        out.push_str("    </office:body>\n");
        out.push_str("</office:document-content>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatRegistry;
    use chrono::{TimeZone, Utc};

    fn meta() -> DocumentMeta {
        DocumentMeta::new("Minutes", "Grace", Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
    }

    fn format(id: &str) -> FormatDescriptor {
        FormatRegistry::builtin().lookup(id).unwrap().clone()
    }

    #[test]
    fn test_structured_document_envelope() {
        let content = ExportContent::from_markup("<p>Agenda</p>");
        let out = StructuredDocumentSerializer.render(&format("klpx"), &content, &meta());

        assert!(out.starts_with("<?xml version=\"1.0\""));
        assert!(out.contains(DOCUMENT_NAMESPACE));
        assert!(out.contains("<title>Minutes</title>"));
        assert!(out.contains("<author>Grace</author>"));
        assert!(out.contains("<created>2026-01-02T03:04:05.000Z</created>"));
        assert!(out.contains("<format>klpx</format>"));
        assert!(out.contains("<generator>Folio</generator>"));
        assert!(out.contains("<![CDATA[<p>Agenda</p>]]>"));
    }

    #[test]
    fn test_metadata_is_escaped() {
        let content = ExportContent::from_markup("<p>x</p>");
        let meta = DocumentMeta::new("R&D <draft>", "Grace", Utc::now());
        let out = StructuredDataSerializer.render(&format("ijkl"), &content, &meta);
        assert!(out.contains("<title>R&amp;D &lt;draft&gt;</title>"));
    }

    #[test]
    fn test_structured_data() {
        let content = ExportContent::from_markup("<p>Rows</p>");
        let out = StructuredDataSerializer.render(&format("ijkl"), &content, &meta());
        assert!(out.contains("<document>"));
        assert!(out.contains("<metadata>"));
        assert!(out.contains("<![CDATA[<p>Rows</p>]]>"));
        assert!(out.trim_end().ends_with("</document>"));
    }

    #[test]
    fn test_open_document_embeds_body() {
        let content = ExportContent::from_markup("<h1>Heading</h1><p>First &amp; last</p>");
        let out = OpenDocumentSerializer.render(&format("mnop"), &content, &meta());

        assert!(out.contains("xmlns:text="));
        assert!(out.contains("<text:p text:style-name=\"Title\">Minutes</text:p>"));
        assert!(out.contains("Author: Grace"));
        assert!(out.contains("Date: 2026-01-02"));
        assert!(out.contains("<text:p>Heading</text:p>"));
        assert!(out.contains("<text:p>First &amp; last</text:p>"));
    }
}
