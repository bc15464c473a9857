//! Terminal progress display for export runs

use colored::Colorize;
use folio_core::export::ProgressReporter;
use folio_core::format::FormatDescriptor;
use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{prefix:.bold} [{bar:30.cyan/blue}] {pos:>3}% {msg}";

/// Shows export progress as an indicatif bar on stderr
pub struct TerminalReporter {
    show_bar: bool,
    bar: Option<ProgressBar>,
}

impl TerminalReporter {
    pub fn new(show_bar: bool) -> Self {
        Self {
            show_bar,
            bar: None,
        }
    }

    fn is_open(&self) -> bool {
        self.bar.is_some()
    }
}

impl ProgressReporter for TerminalReporter {
    fn open(&mut self, format: &FormatDescriptor) {
        if !self.show_bar {
            return;
        }
        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_prefix(format.display_name.clone());
        self.bar = Some(bar);
    }

    fn report(&mut self, percent: u8, label: &str) {
        if let Some(bar) = &self.bar {
            bar.set_position(u64::from(percent));
            bar.set_message(label.to_string());
        }
    }

    fn close(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn status(&mut self, message: &str) {
        let line = format!("{} {}", "›".cyan(), message);
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{}", line),
        }
    }
}

impl Drop for TerminalReporter {
    fn drop(&mut self) {
        self.close();
    }
}
