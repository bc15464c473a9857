//! Editor content module
//!
//! Read access to the active editing surface (single or dual panel),
//! plain-text extraction from markup, panel operations and document
//! statistics.

mod stats;
mod text;
mod workspace;

pub use stats::{DocumentStats, DEFAULT_WORDS_PER_MINUTE};
pub use text::{decode_entities, extract_text, word_count};
pub use workspace::{ContentAccessor, EditorMode, Workspace, CLEARED_PANEL, MERGED_PANEL};
