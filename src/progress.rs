use crate::ui;
use indicatif::{ProgressBar, ProgressStyle};
use report_client::{QueryEvent, QueryState};
use std::time::Duration;

/// Spinner shown while waiting on the backend
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} [{elapsed}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Mirror query events on the spinner so the user sees each section as it lands
pub struct QueryProgress {
    pb: ProgressBar,
}

impl QueryProgress {
    pub fn new(pb: ProgressBar) -> Self {
        Self { pb }
    }

    pub fn on_event(&self, event: &QueryEvent, state: &QueryState) {
        match event {
            QueryEvent::AwaitingConfirmation { entries_count, .. } => {
                self.pb
                    .set_message(format!("{} entries found, waiting for confirmation", entries_count));
            }
            QueryEvent::SectionReady { section, .. } => {
                self.pb
                    .suspend(|| ui::success_message(&format!("{} report ready", section)));
            }
            QueryEvent::SectionUnavailable { section, error, .. } => {
                self.pb.suspend(|| {
                    ui::error_message(&format!("{} report unavailable: {}", section, error))
                });
            }
            QueryEvent::Settled { .. } => {}
        }

        if state.is_loading() {
            self.pb.set_message("Fetching analysis and model reports...");
        }
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
