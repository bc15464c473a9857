//! Single and dual panel editing surface

use super::stats::DocumentStats;
use super::text::extract_text;
use crate::export::{ExportContent, ExportPayload};
use crate::types::PanelSide;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Markup a cleared panel is reset to
pub const CLEARED_PANEL: &str = "<p>Content cleared...</p>";

/// Markup left in the secondary panel after a merge
pub const MERGED_PANEL: &str = "<p>Content merged into the primary panel</p>";

const MERGE_SEPARATOR: &str = "<hr style=\"margin: 20px 0;\">";

const NEW_DOCUMENT: &str = "<h1 style=\"text-align: center; margin-bottom: 30px;\">New Document</h1>\n\
<p style=\"text-align: center;\">Start writing your content here...</p>";

/// Read access to whatever the user is currently editing
pub trait ContentAccessor {
    /// Serialized markup of the active surface
    fn active_content(&self) -> String;

    /// Plain text of the active surface
    fn active_text(&self) -> String;

    /// Snapshot both views for an export
    fn snapshot(&self) -> ExportContent {
        ExportContent::new(self.active_content(), self.active_text())
    }
}

/// Editor layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// One editing surface
    #[default]
    Single,
    /// Primary and secondary panels side by side
    Dual,
}

/// Panel contents plus the active layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    mode: EditorMode,
    primary: String,
    secondary: String,
}

impl Workspace {
    /// Single-panel workspace
    pub fn single(markup: impl Into<String>) -> Self {
        Self {
            mode: EditorMode::Single,
            primary: markup.into(),
            secondary: String::new(),
        }
    }

    /// Dual-panel workspace
    pub fn dual(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            mode: EditorMode::Dual,
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Current layout
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switch layout; panel contents are kept
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    /// Markup of one panel
    pub fn panel(&self, side: PanelSide) -> &str {
        match side {
            PanelSide::Primary => &self.primary,
            PanelSide::Secondary => &self.secondary,
        }
    }

    /// Replace one panel's markup
    pub fn set_panel(&mut self, side: PanelSide, markup: impl Into<String>) {
        match side {
            PanelSide::Primary => self.primary = markup.into(),
            PanelSide::Secondary => self.secondary = markup.into(),
        }
    }

    /// Exchange primary and secondary content
    pub fn swap_panels(&mut self) {
        std::mem::swap(&mut self.primary, &mut self.secondary);
    }

    /// Copy the primary panel into the secondary one
    pub fn sync_panels(&mut self) {
        self.secondary = self.primary.clone();
    }

    /// Append the secondary panel to the primary one
    pub fn merge_panels(&mut self) {
        self.primary = format!("{}{}{}", self.primary, MERGE_SEPARATOR, self.secondary);
        self.secondary = MERGED_PANEL.to_string();
    }

    /// Reset one panel to the cleared placeholder
    pub fn clear_panel(&mut self, side: PanelSide) {
        self.set_panel(side, CLEARED_PANEL);
    }

    /// Replace the active panel with the new-document template
    pub fn new_document(&mut self) {
        self.primary = NEW_DOCUMENT.to_string();
    }

    /// Word, character and reading-time counts for the active surface
    pub fn stats(&self, words_per_minute: usize) -> DocumentStats {
        let text = match self.mode {
            EditorMode::Single => extract_text(&self.primary),
            EditorMode::Dual => format!(
                "{} {}",
                extract_text(&self.primary),
                extract_text(&self.secondary)
            ),
        };
        DocumentStats::from_text(&text, words_per_minute)
    }

    /// Raw HTML payload of a single panel
    pub fn panel_payload(&self, side: PanelSide, now: DateTime<Utc>) -> ExportPayload {
        ExportPayload::new(
            self.panel(side).as_bytes().to_vec(),
            "text/html",
            format!("panel-{}-{}.html", side, now.timestamp_millis()),
        )
    }
}

impl ContentAccessor for Workspace {
    fn active_content(&self) -> String {
        match self.mode {
            EditorMode::Single => self.primary.clone(),
            EditorMode::Dual => format!(
                "<div class=\"duo-export\">\n\
                 <div class=\"panel primary-panel\">\n<h3>Primary Panel</h3>\n{}\n</div>\n\
                 <div class=\"panel secondary-panel\">\n<h3>Secondary Panel</h3>\n{}\n</div>\n\
                 </div>",
                self.primary, self.secondary
            ),
        }
    }

    fn active_text(&self) -> String {
        match self.mode {
            EditorMode::Single => extract_text(&self.primary),
            EditorMode::Dual => format!(
                "PRIMARY PANEL:\n{}\n\nSECONDARY PANEL:\n{}",
                extract_text(&self.primary),
                extract_text(&self.secondary)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_mode_content() {
        let ws = Workspace::single("<p>Hello</p>");
        assert_eq!(ws.active_content(), "<p>Hello</p>");
        assert_eq!(ws.active_text(), "Hello");
    }

    #[test]
    fn test_dual_mode_content() {
        let ws = Workspace::dual("<p>Left side</p>", "<p>Right side</p>");
        let content = ws.active_content();
        assert!(content.contains("Primary Panel"));
        assert!(content.contains("Secondary Panel"));
        let left = content.find("Left side").unwrap();
        let right = content.find("Right side").unwrap();
        assert!(left < content.find("Secondary Panel").unwrap());
        assert!(right > content.find("Secondary Panel").unwrap());

        assert_eq!(
            ws.active_text(),
            "PRIMARY PANEL:\nLeft side\n\nSECONDARY PANEL:\nRight side"
        );
    }

    #[test]
    fn test_snapshot() {
        let ws = Workspace::single("<p>A &amp; B</p>");
        let snapshot = ws.snapshot();
        assert_eq!(snapshot.markup, "<p>A &amp; B</p>");
        assert_eq!(snapshot.text, "A & B");
    }

    #[test]
    fn test_swap_and_sync() {
        let mut ws = Workspace::dual("<p>one</p>", "<p>two</p>");
        ws.swap_panels();
        assert_eq!(ws.panel(PanelSide::Primary), "<p>two</p>");
        assert_eq!(ws.panel(PanelSide::Secondary), "<p>one</p>");

        ws.sync_panels();
        assert_eq!(ws.panel(PanelSide::Secondary), "<p>two</p>");
    }

    #[test]
    fn test_merge_panels() {
        let mut ws = Workspace::dual("<p>one</p>", "<p>two</p>");
        ws.merge_panels();
        let primary = ws.panel(PanelSide::Primary);
        assert!(primary.starts_with("<p>one</p><hr"));
        assert!(primary.ends_with("<p>two</p>"));
        assert_eq!(ws.panel(PanelSide::Secondary), MERGED_PANEL);
    }

    #[test]
    fn test_clear_and_new_document() {
        let mut ws = Workspace::dual("<p>one</p>", "<p>two</p>");
        ws.clear_panel(PanelSide::Secondary);
        assert_eq!(ws.panel(PanelSide::Secondary), CLEARED_PANEL);

        ws.new_document();
        assert!(ws.active_text().contains("New Document"));
    }

    #[test]
    fn test_mode_switch_keeps_panels() {
        let mut ws = Workspace::dual("<p>one</p>", "<p>two</p>");
        ws.set_mode(EditorMode::Single);
        assert_eq!(ws.active_content(), "<p>one</p>");
        ws.set_mode(EditorMode::Dual);
        assert!(ws.active_content().contains("<p>two</p>"));
    }

    #[test]
    fn test_dual_stats_count_both_panels() {
        let ws = Workspace::dual("<p>one two</p>", "<p>three</p>");
        assert_eq!(ws.stats(200).words, 3);

        let single = Workspace::single("<p>one two</p>");
        assert_eq!(single.stats(200).words, 2);
    }

    #[test]
    fn test_panel_payload() {
        let ws = Workspace::dual("<p>one</p>", "<p>two</p>");
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let payload = ws.panel_payload(PanelSide::Secondary, now);
        assert_eq!(payload.media_type, "text/html");
        assert_eq!(payload.filename, format!("panel-secondary-{}.html", now.timestamp_millis()));
        assert_eq!(payload.text(), "<p>two</p>");
    }
}
