use crate::error::Result;
use crate::types::{
    AnalysisReport, FilterSelection, ModelReport, OptionCatalog, PredictionInput, PredictionResult,
};
use std::future::Future;

/// Trait for backend implementations serving the report endpoints
pub trait ReportApi: Send + Sync {
    /// Fetch option lists and dataset metadata
    fn fetch_catalog(&self) -> impl Future<Output = Result<OptionCatalog>> + Send;

    /// Count entries matching a filter selection
    fn count_entries(
        &self,
        selection: &FilterSelection,
    ) -> impl Future<Output = Result<u64>> + Send;

    /// Run the analysis for a filter selection
    fn fetch_analysis(
        &self,
        selection: &FilterSelection,
    ) -> impl Future<Output = Result<AnalysisReport>> + Send;

    /// Train and evaluate the price model for a filter selection
    fn fetch_model(
        &self,
        selection: &FilterSelection,
    ) -> impl Future<Output = Result<ModelReport>> + Send;

    /// Predict a price from a feature record
    fn predict(
        &self,
        input: &PredictionInput,
    ) -> impl Future<Output = Result<PredictionResult>> + Send;
}

/// User decision point between the entry count and the report fetches
pub trait ConfirmationGate: Send + Sync {
    /// Ask whether to proceed with `entries_count` matched entries.
    /// Resolves only on an explicit decision; an error means no decision can be made.
    fn confirm(&self, entries_count: u64) -> impl Future<Output = Result<bool>> + Send;
}

/// Gate that answers every confirmation with a fixed decision
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl ConfirmationGate for AutoConfirm {
    async fn confirm(&self, _entries_count: u64) -> Result<bool> {
        Ok(self.0)
    }
}

/// Prompt text shown at the confirmation gate
pub fn confirmation_prompt(entries_count: u64) -> String {
    format!(
        "Number of entries found: {}. Do you want to proceed?",
        entries_count
    )
}
