//! Document export pipeline
//!
//! Turns the active editor content into one of the registered formats.
//!
//! # Overview
//!
//! - `SerializerSet` dispatches a format id to the serializer for its
//!   `FormatKind`; unknown ids fall back to raw HTML
//! - portable pages go through a `PageRenderer` and complete asynchronously
//! - `ExportOrchestrator` owns selection, cosmetic progress, dispatch and
//!   delivery for one run at a time
//!
//! # Example
//!
//! ```ignore
//! use folio_core::export::{ExportOptions, ExportOrchestrator, SerializerSet};
//!
//! let mut orch = ExportOrchestrator::new(serializers, reporter, delivery);
//! orch.select_format("html")?;
//! let ticket = orch.start_export(ExportOptions::new().title("Notes"))?;
//! let receipt = orch.run_to_completion(ticket, &workspace, std::thread::sleep)?;
//! ```

mod delivery;
mod escape;
mod orchestrator;
mod page;
mod payload;
mod pdf;
mod progress;
mod serializer;
mod text;
mod web;
mod xml;

pub use delivery::Delivery;
pub use escape::{cdata, escape_xml};
pub use orchestrator::{ExportDefaults, ExportOrchestrator, ExportPhase, TickOutcome};
pub use page::{PageRenderer, PendingRender, RenderCompletion, TextPageRenderer, PAGE_MEDIA_TYPE};
pub use payload::{
    DocumentMeta, ExportContent, ExportOptions, ExportPayload, ExportReceipt, ExportRequest, GENERATOR,
};
pub use pdf::{render_pdf, PageLayout};
pub use progress::{NullReporter, ProgressReporter, ProgressSchedule, ProgressState};
pub use serializer::{Rendered, Serializer, SerializerSet, FALLBACK_MEDIA_TYPE};
pub use text::{escape_rtf, PlainTextSerializer, RichTextSerializer};
pub use web::{WebArchiveSerializer, WebPageSerializer, ARCHIVE_BOUNDARY};
pub use xml::{OpenDocumentSerializer, StructuredDataSerializer, StructuredDocumentSerializer, DOCUMENT_MEDIA_TYPE};

// Re-export test doubles
#[cfg(test)]
pub use delivery::MemoryDelivery;
#[cfg(test)]
pub use progress::RecordingReporter;
