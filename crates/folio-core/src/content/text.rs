//! Plain-text extraction from editor markup

use regex_lite::Regex;
use std::sync::LazyLock;

static SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>").expect("valid regex")
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:br|hr)\b[^>]*>").expect("valid regex")
});

static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(?:p|div|h[1-6]|li|ul|ol|tr|table|blockquote|pre|section|article|header|footer)\b[^>]*>",
    )
    .expect("valid regex")
});

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Extract readable text from markup
///
/// Approximates what a browser's `innerText` yields: source whitespace is
/// collapsed, block boundaries and `<br>` become line breaks, script and
/// style bodies are dropped and entities are decoded. Blank lines are
/// removed and the result is trimmed.
pub fn extract_text(markup: &str) -> String {
    let text = SCRIPT_STYLE.replace_all(markup, "");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = BLOCK_TAG.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decode HTML character references
///
/// Covers the full HTML5 named set plus numeric references; unknown names
/// are left as written.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Count whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_paragraph() {
        assert_eq!(extract_text("<p>Hello</p>"), "Hello");
    }

    #[test]
    fn test_blocks_become_lines() {
        let markup = "<h1>Title</h1>\n   <p>First   paragraph</p><p>Second<br>line</p>";
        assert_eq!(extract_text(markup), "Title\nFirst paragraph\nSecond\nline");
    }

    #[test]
    fn test_inline_tags_keep_words_together() {
        assert_eq!(
            extract_text("<p>Some <strong>bold</strong> and <em>italic</em> text</p>"),
            "Some bold and italic text"
        );
    }

    #[test]
    fn test_script_and_style_dropped() {
        let markup = "<style>p { color: red; }</style><p>Visible</p><script>alert('x')</script>";
        assert_eq!(extract_text(markup), "Visible");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(
            extract_text("<p>Fish &amp; chips &lt;3 &#169; &#x2014; &bogus;</p>"),
            "Fish & chips <3 \u{a9} \u{2014} &bogus;"
        );
    }

    #[test]
    fn test_typographic_entities_decoded() {
        assert_eq!(
            extract_text("<p>&ldquo;Quote&rdquo; &mdash; costs 5&euro;&hellip;</p>"),
            "\u{201c}Quote\u{201d} \u{2014} costs 5\u{20ac}\u{2026}"
        );
        assert_eq!(
            decode_entities("&lsquo;caf&eacute;&rsquo; &bull; &trade;"),
            "\u{2018}caf\u{e9}\u{2019} \u{2022} \u{2122}"
        );
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(extract_text("just text"), "just text");
        assert_eq!(extract_text(""), "");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  one two\nthree  "), 3);
        assert_eq!(word_count("   "), 0);
    }
}
