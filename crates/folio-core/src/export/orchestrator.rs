//! Export orchestrator
//!
//! Drives one export at a time through
//! `Idle -> FormatSelected -> InProgress [-> Rendering] -> Completed`,
//! with `Failed` and `Cancelled` as the other terminal phases. Time is
//! supplied by the caller: it sleeps for `next_delay()` and then calls
//! `tick()` with the ticket returned by `start_export()`.

use super::delivery::Delivery;
use super::page::PendingRender;
use super::payload::{DocumentMeta, ExportOptions, ExportPayload, ExportReceipt, ExportRequest};
use super::progress::{ProgressReporter, ProgressSchedule, ProgressState};
use super::serializer::{Rendered, SerializerSet};
use crate::content::ContentAccessor;
use crate::error::{FolioError, Result};
use crate::format::FormatDescriptor;
use crate::types::{FormatId, RunTicket};
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Shortest delay between polls of a pending page render
const RENDER_POLL: Duration = Duration::from_millis(10);

/// Phase of the export state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    FormatSelected,
    InProgress,
    Rendering,
    Completed,
    Failed,
    Cancelled,
}

impl ExportPhase {
    /// Whether a run is active
    pub fn is_running(&self) -> bool {
        matches!(self, ExportPhase::InProgress | ExportPhase::Rendering)
    }
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExportPhase::Idle => "idle",
            ExportPhase::FormatSelected => "format selected",
            ExportPhase::InProgress => "in progress",
            ExportPhase::Rendering => "rendering",
            ExportPhase::Completed => "completed",
            ExportPhase::Failed => "failed",
            ExportPhase::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Progress advanced
    Progress(ProgressState),
    /// Waiting on the page renderer
    Rendering,
    /// Payload delivered
    Completed(ExportReceipt),
    /// Ticket does not belong to the active run
    Stale,
}

/// Fallback values for requests that omit them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDefaults {
    pub filename: String,
    pub title: String,
    pub author: String,
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            filename: "document".to_string(),
            title: "Untitled Document".to_string(),
            author: "Folio User".to_string(),
        }
    }
}

struct ActiveRun {
    ticket: RunTicket,
    request: ExportRequest,
    format: FormatDescriptor,
    pending: Option<PendingRender>,
}

/// Coordinates format selection, progress, serialization and delivery
pub struct ExportOrchestrator<R, D> {
    serializers: SerializerSet,
    schedule: ProgressSchedule,
    defaults: ExportDefaults,
    reporter: R,
    delivery: D,
    phase: ExportPhase,
    selected: Option<FormatId>,
    run: Option<ActiveRun>,
    progress: ProgressState,
    last_receipt: Option<ExportReceipt>,
}

impl<R: ProgressReporter, D: Delivery> ExportOrchestrator<R, D> {
    /// Create an idle orchestrator
    pub fn new(serializers: SerializerSet, reporter: R, delivery: D) -> Self {
        Self {
            serializers,
            schedule: ProgressSchedule::default(),
            defaults: ExportDefaults::default(),
            reporter,
            delivery,
            phase: ExportPhase::Idle,
            selected: None,
            run: None,
            progress: ProgressState::default(),
            last_receipt: None,
        }
    }

    /// Set the progress schedule
    pub fn with_schedule(mut self, schedule: ProgressSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Set request defaults
    pub fn with_defaults(mut self, defaults: ExportDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Current phase
    pub fn phase(&self) -> ExportPhase {
        self.phase
    }

    /// Currently selected format
    pub fn selected(&self) -> Option<&FormatId> {
        self.selected.as_ref()
    }

    /// Progress of the current or last run
    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    /// Receipt of the last completed run
    pub fn last_receipt(&self) -> Option<&ExportReceipt> {
        self.last_receipt.as_ref()
    }

    /// Request of the active run
    pub fn active_request(&self) -> Option<&ExportRequest> {
        self.run.as_ref().map(|run| &run.request)
    }

    pub fn schedule(&self) -> &ProgressSchedule {
        &self.schedule
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn delivery(&self) -> &D {
        &self.delivery
    }

    /// Return to `Idle`, clearing the selection
    pub fn reset(&mut self) -> Result<()> {
        if self.phase.is_running() {
            return Err(FolioError::ExportInFlight);
        }
        self.phase = ExportPhase::Idle;
        self.selected = None;
        Ok(())
    }

    /// Choose the target format
    pub fn select_format(&mut self, id: &str) -> Result<()> {
        if self.phase.is_running() {
            return Err(FolioError::ExportInFlight);
        }

        let Some(format) = self.serializers.registry().lookup(id) else {
            warn!("Rejected unknown format '{}'", id);
            self.reporter.status(&format!("Unknown export format '{}'", id));
            return Err(FolioError::UnknownFormat(id.to_string()));
        };

        let message = format!("Preparing {} export...", format.display_name);
        self.selected = Some(format.id.clone());
        self.phase = ExportPhase::FormatSelected;
        debug!("Selected format {}", id);
        self.reporter.status(&message);
        Ok(())
    }

    /// Start a run for the selected format
    pub fn start_export(&mut self, options: ExportOptions) -> Result<RunTicket> {
        if self.phase.is_running() {
            return Err(FolioError::ExportInFlight);
        }

        let format_id = match (&self.selected, self.phase) {
            (Some(id), ExportPhase::FormatSelected) => id.clone(),
            _ => {
                return Err(FolioError::Validation(
                    "Select an export format first".to_string(),
                ))
            }
        };
        let format = self.serializers.registry().require(format_id.as_str())?.clone();

        let request = ExportRequest {
            format_id,
            filename: options.filename.unwrap_or_else(|| self.defaults.filename.clone()),
            title: options.title.unwrap_or_else(|| self.defaults.title.clone()),
            author: options.author.unwrap_or_else(|| self.defaults.author.clone()),
        };

        let ticket = RunTicket::new();
        info!("Export {} started: {} -> {}", ticket, format.id, request.filename);

        self.progress.reset();
        self.progress.label = format!("Exporting {}...", format.display_name);
        self.reporter.open(&format);
        self.reporter.report(self.progress.percent, &self.progress.label);

        self.run = Some(ActiveRun {
            ticket,
            request,
            format,
            pending: None,
        });
        self.phase = ExportPhase::InProgress;
        Ok(ticket)
    }

    /// Select a format and start with generated defaults
    pub fn quick_export(&mut self, id: &str, now: DateTime<Utc>) -> Result<RunTicket> {
        self.select_format(id)?;
        let options = ExportOptions::new().filename(format!(
            "{}-{}",
            self.defaults.filename,
            now.timestamp_millis()
        ));
        self.start_export(options)
    }

    /// Abandon the selection or the active run
    ///
    /// Ticks carrying the abandoned ticket become `Stale`; a pending page
    /// render is dropped and its late completion ignored.
    pub fn cancel(&mut self) -> Result<()> {
        match self.phase {
            ExportPhase::FormatSelected => {
                self.selected = None;
            }
            ExportPhase::InProgress | ExportPhase::Rendering => {
                if let Some(run) = self.run.take() {
                    info!("Export {} cancelled", run.ticket);
                }
                self.progress.reset();
                self.reporter.close();
                self.reporter.status("Export cancelled");
            }
            phase => {
                return Err(FolioError::InvalidTransition {
                    phase: phase.to_string(),
                    action: "cancel".to_string(),
                })
            }
        }
        self.phase = ExportPhase::Cancelled;
        Ok(())
    }

    /// Delay the driver should wait before the next tick
    pub fn next_delay(&self) -> Duration {
        match self.phase {
            ExportPhase::InProgress if self.progress.is_complete() => self.schedule.settle,
            ExportPhase::InProgress => self.schedule.interval,
            ExportPhase::Rendering => self.schedule.interval.max(RENDER_POLL),
            _ => Duration::ZERO,
        }
    }

    /// Advance the run identified by `ticket`
    pub fn tick(&mut self, ticket: RunTicket, content: &dyn ContentAccessor) -> Result<TickOutcome> {
        match &self.run {
            Some(run) if run.ticket == ticket => {}
            _ => {
                debug!("Ignoring stale tick for {}", ticket);
                return Ok(TickOutcome::Stale);
            }
        }

        match self.phase {
            ExportPhase::InProgress if !self.progress.is_complete() => {
                self.progress.advance(self.schedule.step());
                self.progress.label = self.schedule.label_for(self.progress.percent);
                self.reporter.report(self.progress.percent, &self.progress.label);
                Ok(TickOutcome::Progress(self.progress.clone()))
            }
            ExportPhase::InProgress => self.finish(content),
            ExportPhase::Rendering => self.poll_render(),
            _ => Ok(TickOutcome::Stale),
        }
    }

    /// Tick until the run completes, sleeping between ticks with `sleep`
    pub fn run_to_completion(
        &mut self,
        ticket: RunTicket,
        content: &dyn ContentAccessor,
        mut sleep: impl FnMut(Duration),
    ) -> Result<ExportReceipt> {
        loop {
            sleep(self.next_delay());
            match self.tick(ticket, content)? {
                TickOutcome::Completed(receipt) => return Ok(receipt),
                TickOutcome::Stale => {
                    return Err(FolioError::InvalidTransition {
                        phase: self.phase.to_string(),
                        action: "continue export".to_string(),
                    })
                }
                TickOutcome::Progress(_) | TickOutcome::Rendering => {}
            }
        }
    }

    fn finish(&mut self, content: &dyn ContentAccessor) -> Result<TickOutcome> {
        let Some(run) = self.run.as_mut() else {
            return Ok(TickOutcome::Stale);
        };

        let snapshot = content.snapshot();
        let meta = DocumentMeta::new(run.request.title.clone(), run.request.author.clone(), Utc::now());

        match self.serializers.dispatch(
            run.request.format_id.as_str(),
            &snapshot,
            &meta,
            &run.request.filename,
        ) {
            Rendered::Ready(payload) => self.deliver(payload),
            Rendered::Pending(pending) => {
                debug!("Export {} waiting on page renderer", run.ticket);
                run.pending = Some(pending);
                self.phase = ExportPhase::Rendering;
                self.reporter.report(self.progress.percent, "Rendering pages...");
                Ok(TickOutcome::Rendering)
            }
        }
    }

    fn poll_render(&mut self) -> Result<TickOutcome> {
        let polled = self
            .run
            .as_ref()
            .and_then(|run| run.pending.as_ref())
            .and_then(PendingRender::poll);

        match polled {
            None => Ok(TickOutcome::Rendering),
            Some(Ok(payload)) => self.deliver(payload),
            Some(Err(e)) => self.fail(e),
        }
    }

    fn deliver(&mut self, payload: ExportPayload) -> Result<TickOutcome> {
        let Some(run) = self.run.take() else {
            return Ok(TickOutcome::Stale);
        };

        let path = match self.delivery.save(&payload) {
            Ok(path) => path,
            Err(e) => {
                self.run = Some(run);
                return self.fail(e);
            }
        };

        let receipt = ExportReceipt::new(run.ticket, run.request.format_id.clone(), &payload);
        info!(
            "Export {} delivered {} ({} bytes) to {}",
            run.ticket,
            receipt.filename,
            receipt.size,
            path.display()
        );

        self.phase = ExportPhase::Completed;
        self.reporter.close();
        self.reporter
            .status(&format!("Document exported as {}", run.format.display_name));
        self.last_receipt = Some(receipt.clone());
        Ok(TickOutcome::Completed(receipt))
    }

    fn fail(&mut self, error: FolioError) -> Result<TickOutcome> {
        if let Some(run) = self.run.take() {
            warn!("Export {} failed: {}", run.ticket, error);
        }
        self.phase = ExportPhase::Failed;
        self.reporter.close();
        self.reporter.status(&format!("Export failed: {}", error));
        Err(error)
    }
}
