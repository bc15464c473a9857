//! Escaping helpers shared by the markup serializers

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Longest UTF-8 run per encoded word; keeps each word within 75 characters
const ENCODED_WORD_BYTES: usize = 45;

/// Escape text for XML/HTML element content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap text in a CDATA section
///
/// A `]]>` inside the text is split across two sections.
pub fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

/// Collapse a value to a single header-safe line
pub fn header_value(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Header value with non-ASCII text as RFC 2047 encoded words
///
/// The value is collapsed to one line first. Long values become several
/// `=?utf-8?B?...?=` words separated by spaces, split on char boundaries.
pub fn encoded_header_value(text: &str) -> String {
    let value = header_value(text);
    if value.is_ascii() {
        return value;
    }

    let mut words = Vec::new();
    let mut chunk = String::new();
    for c in value.chars() {
        if chunk.len() + c.len_utf8() > ENCODED_WORD_BYTES {
            words.push(std::mem::take(&mut chunk));
        }
        chunk.push(c);
    }
    words.push(chunk);

    words
        .iter()
        .map(|word| format!("=?utf-8?B?{}?=", STANDARD.encode(word)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_cdata_split() {
        assert_eq!(cdata("<p>x</p>"), "<![CDATA[<p>x</p>]]>");
        assert_eq!(cdata("a]]>b"), "<![CDATA[a]]]]><![CDATA[>b]]>");
    }

    #[test]
    fn test_encoded_header_value() {
        assert_eq!(encoded_header_value("Plain\nTitle"), "Plain Title");
        assert_eq!(encoded_header_value("Caf\u{e9}"), "=?utf-8?B?Q2Fmw6k=?=");

        let long = "\u{e9}".repeat(40);
        let encoded = encoded_header_value(&long);
        let words: Vec<&str> = encoded.split(' ').collect();
        assert_eq!(words.len(), 2);
        assert!(words.iter().all(|w| w.len() <= 75 && w.is_ascii()));
    }

    #[test]
    fn test_header_value() {
        assert_eq!(header_value("Title\r\nInjected: yes"), "Title Injected: yes");
    }
}
