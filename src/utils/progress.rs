//! Progress indicators for CLI mode
//!
//! A spinner is drawn on stderr while a probe waits on the network or on the
//! self-test process. It stays hidden when stderr is not a terminal, so CI
//! logs only ever contain the report itself.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a single probe step is in flight
pub struct ProbeSpinner {
    bar: ProgressBar,
}

impl ProbeSpinner {
    /// Start a spinner with the given message, or a hidden one when `enabled` is false
    pub fn start(message: &str, enabled: bool) -> Self {
        if !enabled || !console::Term::stderr().is_term() {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Stop and erase the spinner
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
