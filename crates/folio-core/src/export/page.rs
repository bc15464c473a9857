//! Page renderers for the portable-page format
//!
//! Page layout completes asynchronously: a renderer hands back a
//! `PendingRender` straight away and fulfils it later through a
//! `RenderCompletion`. The orchestrator polls the pending render between
//! ticks.

use super::payload::{DocumentMeta, ExportContent, ExportPayload};
use super::pdf::{render_pdf, PageLayout};
use crate::error::{FolioError, Result};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::{debug, warn};

/// Media type of rendered pages
pub const PAGE_MEDIA_TYPE: &str = "application/pdf";

/// Converts content into a fixed-page document
pub trait PageRenderer: Send + Sync {
    /// Start rendering; `filename` already carries the extension
    fn render(&self, content: &ExportContent, meta: &DocumentMeta, filename: String) -> PendingRender;
}

/// Sending half of a render
pub struct RenderCompletion {
    sender: Sender<Result<ExportPayload>>,
}

impl RenderCompletion {
    /// Create a linked completion/pending pair
    pub fn channel() -> (RenderCompletion, PendingRender) {
        let (sender, receiver) = mpsc::channel();
        (RenderCompletion { sender }, PendingRender { receiver })
    }

    /// Deliver the render outcome
    pub fn complete(self, result: Result<ExportPayload>) {
        // The receiver is gone when the export was cancelled
        if self.sender.send(result).is_err() {
            debug!("Render finished after its export was dropped");
        }
    }
}

/// Receiving half of a render
pub struct PendingRender {
    receiver: Receiver<Result<ExportPayload>>,
}

impl PendingRender {
    /// Check for completion without blocking
    ///
    /// A renderer that goes away without completing counts as a failure.
    pub fn poll(&self) -> Option<Result<ExportPayload>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(FolioError::RenderFailed(
                "renderer exited without completing".to_string(),
            ))),
        }
    }

    /// Block until the render completes
    pub fn wait(self) -> Result<ExportPayload> {
        self.receiver.recv().unwrap_or_else(|_| {
            Err(FolioError::RenderFailed(
                "renderer exited without completing".to_string(),
            ))
        })
    }
}

/// Lays extracted text out on A4 pages in a worker thread
#[derive(Debug, Clone, Default)]
pub struct TextPageRenderer {
    layout: PageLayout,
}

impl TextPageRenderer {
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }
}

impl PageRenderer for TextPageRenderer {
    fn render(&self, content: &ExportContent, meta: &DocumentMeta, filename: String) -> PendingRender {
        let (completion, pending) = RenderCompletion::channel();
        let text = content.text.clone();
        let meta = meta.clone();
        let layout = self.layout;

        let spawned = thread::Builder::new()
            .name("folio-page-render".to_string())
            .spawn(move || {
                let result = render_pdf(&text, &meta, &layout).map(|body| {
                    debug!("Rendered {} page bytes for {}", body.len(), filename);
                    ExportPayload::new(body, PAGE_MEDIA_TYPE, filename)
                });
                completion.complete(result);
            });

        // On spawn failure the completion is dropped and the poll reports it
        if let Err(e) = spawned {
            warn!("Failed to start page renderer: {}", e);
        }

        pending
    }
}
