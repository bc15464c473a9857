//! Document statistics

use super::text::word_count;
use serde::{Deserialize, Serialize};

/// Reading speed used when none is configured
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// Counts shown in the editor status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Whitespace-separated words
    pub words: usize,
    /// Characters, including whitespace
    pub characters: usize,
    /// Estimated reading time, rounded up
    pub reading_minutes: usize,
}

impl DocumentStats {
    /// Compute statistics for extracted text
    pub fn from_text(text: &str, words_per_minute: usize) -> Self {
        let words = word_count(text);
        let wpm = words_per_minute.max(1);
        Self {
            words,
            characters: text.chars().count(),
            reading_minutes: words.div_ceil(wpm),
        }
    }
}
