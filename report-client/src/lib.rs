//! Report Client - filter, confirm and fetch client for a real-estate analysis backend
//!
//! This crate seeds filter state from the backend's option catalog, runs the
//! count-then-confirm-then-fetch query protocol, composes the analysis and
//! model payloads into display sections, and drives the price predictor.

// Core modules
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Transport
pub mod http;

// Main functionality modules
pub mod compose;
pub mod filters;
pub mod predictor;
pub mod query;
pub mod renderers;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use compose::{
    compose_analysis, compose_catalog_header, compose_model, compose_prediction,
    compose_unavailable, Block, ReportView, SectionView,
};
pub use config::{ClientConfig, ConfigLoader, DefaultConfigLoader};
pub use error::{ReportClientError, Result};
pub use filters::{Dimension, FilterState};
pub use http::HttpReportClient;
pub use predictor::{PredictionState, Predictor, PredictorField};
pub use query::{QueryEvent, QueryOrchestrator, QueryOutcome, QueryState, ReportKind, ReportSlot};
pub use renderers::{HtmlRenderer, ReportRenderer, TerminalRenderer, WrittenAssets};
pub use traits::{confirmation_prompt, AutoConfirm, ConfirmationGate, ReportApi};
pub use types::{
    AnalysisReport, FieldValue, FilterSelection, ModelReport, OptionCatalog, PredictionInput,
    PredictionResult,
};

/// Compose whatever the current query state holds into display views.
/// Slots still pending or never requested contribute nothing.
pub fn compose_state(state: &QueryState, show_features_importance: bool) -> Vec<ReportView> {
    let mut views = Vec::new();
    match state.analysis() {
        ReportSlot::Loaded(report) => views.push(compose_analysis(report)),
        ReportSlot::Unavailable(error) => {
            views.push(compose_unavailable(ReportKind::Analysis, error))
        }
        ReportSlot::Empty | ReportSlot::Pending => {}
    }
    match state.model() {
        ReportSlot::Loaded(report) => views.push(compose_model(report, show_features_importance)),
        ReportSlot::Unavailable(error) => views.push(compose_unavailable(ReportKind::Model, error)),
        ReportSlot::Empty | ReportSlot::Pending => {}
    }
    views
}
