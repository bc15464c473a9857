//! Progress reporting for export runs
//!
//! Progress is cosmetic: a fixed number of timed steps that always reach
//! 100% before serialization starts. It does not measure serializer work.

use crate::format::FormatDescriptor;
use std::time::Duration;

/// Receives progress and status updates from the orchestrator
pub trait ProgressReporter {
    /// Progress surface is shown for a new run
    fn open(&mut self, _format: &FormatDescriptor) {}

    /// Overwrite the displayed percentage and label
    fn report(&mut self, percent: u8, label: &str);

    /// Progress surface is dismissed
    fn close(&mut self) {}

    /// One-line status notification
    fn status(&mut self, _message: &str) {}
}

/// Reporter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn report(&mut self, _percent: u8, _label: &str) {}
}

/// Displayed progress of the current run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressState {
    /// Percent complete, 0..=100
    pub percent: u8,
    /// Step label
    pub label: String,
}

impl ProgressState {
    /// Back to zero for a new run
    pub fn reset(&mut self) {
        self.percent = 0;
        self.label.clear();
    }

    /// Move forward by `step` points, saturating at 100
    pub fn advance(&mut self, step: u8) {
        self.percent = self.percent.saturating_add(step).min(100);
    }

    /// Whether the run reached 100%
    pub fn is_complete(&self) -> bool {
        self.percent >= 100
    }
}

/// Timing and step size of the progress animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSchedule {
    /// Percentage points per tick
    pub step_percent: u8,
    /// Delay between ticks
    pub interval: Duration,
    /// Delay between reaching 100% and finishing
    pub settle: Duration,
}

impl Default for ProgressSchedule {
    fn default() -> Self {
        Self {
            step_percent: 20,
            interval: Duration::from_millis(300),
            settle: Duration::from_millis(500),
        }
    }
}

impl ProgressSchedule {
    /// Schedule without delays
    pub fn immediate() -> Self {
        Self {
            interval: Duration::ZERO,
            settle: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Step size clamped to 1..=100
    pub fn step(&self) -> u8 {
        self.step_percent.clamp(1, 100)
    }

    /// Ticks needed to reach 100%
    pub fn total_steps(&self) -> u8 {
        100u8.div_ceil(self.step())
    }

    /// Label for a reached percentage (e.g. "Step 2/5")
    pub fn label_for(&self, percent: u8) -> String {
        let done = percent.div_ceil(self.step()).min(self.total_steps());
        format!("Step {}/{}", done, self.total_steps())
    }
}

/// Test reporter that records every call
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    pub opened: Vec<String>,
    pub reports: Vec<(u8, String)>,
    pub closed: usize,
    pub statuses: Vec<String>,
}

#[cfg(test)]
impl RecordingReporter {
    /// Reported percentages in order
    pub fn percents(&self) -> Vec<u8> {
        self.reports.iter().map(|(p, _)| *p).collect()
    }
}

#[cfg(test)]
impl ProgressReporter for RecordingReporter {
    fn open(&mut self, format: &FormatDescriptor) {
        self.opened.push(format.id.to_string());
    }

    fn report(&mut self, percent: u8, label: &str) {
        self.reports.push((percent, label.to_string()));
    }

    fn close(&mut self) {
        self.closed += 1;
    }

    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_saturates() {
        let mut state = ProgressState::default();
        for _ in 0..7 {
            state.advance(20);
        }
        assert_eq!(state.percent, 100);
        assert!(state.is_complete());

        state.reset();
        assert_eq!(state.percent, 0);
    }

    #[test]
    fn test_default_schedule() {
        let schedule = ProgressSchedule::default();
        assert_eq!(schedule.total_steps(), 5);
        assert_eq!(schedule.label_for(20), "Step 1/5");
        assert_eq!(schedule.label_for(100), "Step 5/5");
    }

    #[test]
    fn test_uneven_step() {
        let schedule = ProgressSchedule {
            step_percent: 30,
            ..ProgressSchedule::immediate()
        };
        assert_eq!(schedule.total_steps(), 4);
        assert_eq!(schedule.label_for(90), "Step 3/4");
        assert_eq!(schedule.label_for(100), "Step 4/4");
    }

    #[test]
    fn test_zero_step_is_clamped() {
        let schedule = ProgressSchedule {
            step_percent: 0,
            ..ProgressSchedule::default()
        };
        assert_eq!(schedule.step(), 1);
        assert_eq!(schedule.total_steps(), 100);
    }
}
