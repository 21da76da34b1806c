use dialoguer::{Confirm, theme::ColorfulTheme};
use indicatif::ProgressBar;
use report_client::{ConfirmationGate, ReportClientError, confirmation_prompt};

/// Interactive yes/no prompt at the confirmation gate.
/// The prompt blocks on terminal input, so it runs on the blocking pool.
pub struct PromptGate {
    spinner: ProgressBar,
}

impl PromptGate {
    pub fn new(spinner: ProgressBar) -> Self {
        Self { spinner }
    }
}

impl ConfirmationGate for PromptGate {
    async fn confirm(&self, entries_count: u64) -> report_client::Result<bool> {
        let spinner = self.spinner.clone();
        let answer = tokio::task::spawn_blocking(move || {
            spinner.suspend(|| {
                Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(confirmation_prompt(entries_count))
                    .default(true)
                    .interact()
            })
        })
        .await
        .map_err(|e| ReportClientError::confirmation_unavailable(e.to_string()))?;

        answer.map_err(|e| ReportClientError::confirmation_unavailable(e.to_string()))
    }
}
