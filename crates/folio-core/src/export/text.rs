//! Text serializers: RTF and plain text

use super::payload::{DocumentMeta, ExportContent};
use super::serializer::Serializer;
use crate::format::{FormatDescriptor, FormatKind};
use chrono::{Datelike, Timelike};

/// Minimal RTF document around the extracted text
pub struct RichTextSerializer;

impl Serializer for RichTextSerializer {
    fn kind(&self) -> FormatKind {
        FormatKind::RichText
    }

    fn media_type(&self) -> &str {
        "application/rtf"
    }

    fn render(&self, _format: &FormatDescriptor, content: &ExportContent, meta: &DocumentMeta) -> String {
        let at = meta.created_at;
        let mut out = String::new();
        out.push_str("{\\rtf1\\ansi\\deff0\n");
        out.push_str("{\\fonttbl {\\f0 Times New Roman;}}\n");
        out.push_str("{\\info\n");
        out.push_str(&format!("{{\\title {}}}\n", escape_rtf(&meta.title)));
        out.push_str(&format!("{{\\author {}}}\n", escape_rtf(&meta.author)));
        out.push_str(&format!(
            "{{\\creatim\\yr{}\\mo{}\\dy{}\\hr{}\\min{}}}\n",
            at.year(),
            at.month(),
            at.day(),
            at.hour(),
            at.minute()
        ));
        out.push_str("}\n");
        out.push_str("\\f0\\fs24\n");
        out.push_str(&escape_rtf(&content.text));
        out.push_str("\n}");
        out
    }
}

/// Escape text for an RTF body
///
/// Control characters `\`, `{` and `}` are escaped, newlines become `\par `
/// and anything outside ASCII is written as `\uN?` per UTF-16 unit.
pub fn escape_rtf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' => out.push_str("\\par "),
            '\r' => {}
            '\t' => out.push_str("\\tab "),
            c if c.is_ascii() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{}?", *unit as i16));
                }
            }
        }
    }
    out
}

/// Extracted text with no markup
pub struct PlainTextSerializer;

impl Serializer for PlainTextSerializer {
    fn kind(&self) -> FormatKind {
        FormatKind::PlainText
    }

    fn media_type(&self) -> &str {
        "text/plain"
    }

    fn render(&self, _format: &FormatDescriptor, content: &ExportContent, _meta: &DocumentMeta) -> String {
        content.text.clone()
    }
}
