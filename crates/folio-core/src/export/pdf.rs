//! A4 text pages rendered through printpdf

use super::payload::DocumentMeta;
use crate::error::{FolioError, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};

/// A4 width in millimetres
const PAGE_WIDTH: f32 = 210.0;
/// A4 height in millimetres
const PAGE_HEIGHT: f32 = 297.0;
/// Millimetres per typographic point
const PT_TO_MM: f32 = 25.4 / 72.0;
/// Average Helvetica glyph width as a fraction of the font size
const AVG_GLYPH_WIDTH: f32 = 0.5;
const LAYER_NAME: &str = "Text";

/// Page geometry for text layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// Margin on every side, in millimetres
    pub margin_mm: f32,
    /// Body font size, in points
    pub font_size: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            margin_mm: 10.0,
            font_size: 11.0,
        }
    }
}

impl PageLayout {
    fn leading(&self) -> f32 {
        self.font_size * 1.3 * PT_TO_MM
    }

    /// Characters that fit on one line
    pub fn columns(&self) -> usize {
        let usable = PAGE_WIDTH - 2.0 * self.margin_mm;
        let glyph = self.font_size * AVG_GLYPH_WIDTH * PT_TO_MM;
        ((usable / glyph).floor() as usize).max(1)
    }

    /// Lines that fit on one page
    pub fn rows(&self) -> usize {
        let usable = PAGE_HEIGHT - 2.0 * self.margin_mm;
        ((usable / self.leading()).floor() as usize).max(1)
    }

    /// Wrap text to the column width and split it into pages
    pub fn paginate(&self, text: &str) -> Vec<Vec<String>> {
        let lines: Vec<String> = text
            .lines()
            .flat_map(|line| wrap(line, self.columns()))
            .collect();

        if lines.is_empty() {
            return vec![Vec::new()];
        }
        lines.chunks(self.rows()).map(|page| page.to_vec()).collect()
    }
}

fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current_len > 0 && current_len + 1 + word_len > width {
            out.push(std::mem::take(&mut current));
        }

        if word_len > width {
            // Hard-break words longer than a line
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                current = chunk.iter().collect();
            }
            continue;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Characters WinAnsiEncoding places in 0x80..=0x9F
const WIN_ANSI_HIGH: &[char] = &[
    '\u{20ac}', '\u{201a}', '\u{0192}', '\u{201e}', '\u{2026}', '\u{2020}', '\u{2021}', '\u{02c6}',
    '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017d}', '\u{2018}', '\u{2019}', '\u{201c}',
    '\u{201d}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02dc}', '\u{2122}', '\u{0161}', '\u{203a}',
    '\u{0153}', '\u{017e}', '\u{0178}',
];

/// Replace characters the built-in fonts cannot show with `?`
///
/// The standard 14 fonts use WinAnsiEncoding, which printpdf applies when
/// writing text; unmapped characters would otherwise vanish.
pub fn win_ansi_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c,
            c if WIN_ANSI_HIGH.contains(&c) => c,
            _ => '?',
        })
        .collect()
}

/// Lay out text on A4 pages and produce a PDF file
pub fn render_pdf(text: &str, meta: &DocumentMeta, layout: &PageLayout) -> Result<Vec<u8>> {
    let pages = layout.paginate(text);

    let (doc, first_page, first_layer) =
        PdfDocument::new(meta.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
    let doc = doc
        .with_author(meta.author.as_str())
        .with_creator(meta.generator.as_str())
        .with_producer(meta.generator.as_str());

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| FolioError::RenderFailed(e.to_string()))?;

    let top = PAGE_HEIGHT - layout.margin_mm - layout.font_size * PT_TO_MM;

    for (i, lines) in pages.iter().enumerate() {
        let (page, layer) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME)
        };
        let layer = doc.get_page(page).get_layer(layer);

        for (row, line) in lines.iter().enumerate() {
            let y = top - row as f32 * layout.leading();
            layer.use_text(
                win_ansi_text(line),
                layout.font_size,
                Mm(layout.margin_mm),
                Mm(y),
                &font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| FolioError::RenderFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn meta() -> DocumentMeta {
        DocumentMeta::new("Report (final)", "Ada", Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap())
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_paginate_splits_pages() {
        let layout = PageLayout::default();
        let text = vec!["line"; layout.rows() + 1].join("\n");
        let pages = layout.paginate(&text);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].len(), 1);
    }

    #[test]
    fn test_empty_text_has_one_page() {
        assert_eq!(PageLayout::default().paginate("").len(), 1);
    }

    #[test]
    fn test_layout_fits_a4() {
        let layout = PageLayout::default();
        // 190mm across at 11pt, 277mm down at 14.3pt leading
        assert_eq!(layout.columns(), 97);
        assert_eq!(layout.rows(), 54);
    }

    #[test]
    fn test_win_ansi_keeps_typographic_text() {
        let text = "a \u{2014} b \u{201c}q\u{201d} 5\u{20ac} \u{2026} \u{2022} \u{2122} caf\u{e9}";
        assert_eq!(win_ansi_text(text), text);
        assert_eq!(win_ansi_text("\u{4e2d}x\u{1f600}"), "?x?");
    }

    #[test]
    fn test_render_pdf_document() {
        let pdf = render_pdf("Hello\nWorld \u{2014} \u{201c}ok\u{201d}", &meta(), &PageLayout::default()).unwrap();

        assert!(pdf.starts_with(b"%PDF-"));
        assert!(pdf.windows(5).any(|w| w == b"%%EOF"));
    }

    #[test]
    fn test_render_pdf_many_pages() {
        let layout = PageLayout::default();
        let text = vec!["row"; layout.rows() * 3].join("\n");
        let short = render_pdf("row", &meta(), &layout).unwrap();
        let long = render_pdf(&text, &meta(), &layout).unwrap();
        assert!(long.len() > short.len());
    }
}
