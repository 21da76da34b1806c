use crate::error::{ReportClientError, Result};
use crate::traits::{ConfirmationGate, ReportApi};
use crate::types::{
    AnalysisReport, FilterSelection, ModelReport, OptionCatalog, PredictionInput, PredictionResult,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Requests observed by the mock, keyed by the operation they were made for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Catalog,
    Count(String),
    Analysis(String),
    Model(String),
    Predict(String),
}

#[derive(Clone)]
struct Scripted<T> {
    reply: std::result::Result<T, String>,
    delay: Duration,
}

impl<T> Scripted<T> {
    fn now(reply: std::result::Result<T, String>) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
        }
    }
}

/// Mock backend answering per operation, with optional delays
pub struct MockReportApi {
    catalog: Option<OptionCatalog>,
    counts: HashMap<String, Scripted<u64>>,
    analyses: HashMap<String, Scripted<AnalysisReport>>,
    models: HashMap<String, Scripted<ModelReport>>,
    predictions: Mutex<VecDeque<std::result::Result<PredictionResult, String>>>,
    calls: Arc<Mutex<Vec<ApiCall>>>,
}

impl MockReportApi {
    pub fn new() -> Self {
        Self {
            catalog: None,
            counts: HashMap::new(),
            analyses: HashMap::new(),
            models: HashMap::new(),
            predictions: Mutex::new(VecDeque::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_catalog(mut self, catalog: OptionCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_count(mut self, operation: &str, count: u64) -> Self {
        self.counts
            .insert(operation.to_string(), Scripted::now(Ok(count)));
        self
    }

    pub fn with_count_failure(mut self, operation: &str, message: &str) -> Self {
        self.counts
            .insert(operation.to_string(), Scripted::now(Err(message.to_string())));
        self
    }

    pub fn with_analysis(self, operation: &str, report: AnalysisReport) -> Self {
        self.with_analysis_after(operation, report, Duration::ZERO)
    }

    pub fn with_analysis_after(
        mut self,
        operation: &str,
        report: AnalysisReport,
        delay: Duration,
    ) -> Self {
        self.analyses.insert(
            operation.to_string(),
            Scripted {
                reply: Ok(report),
                delay,
            },
        );
        self
    }

    pub fn with_analysis_failure(mut self, operation: &str, message: &str) -> Self {
        self.analyses
            .insert(operation.to_string(), Scripted::now(Err(message.to_string())));
        self
    }

    pub fn with_model(self, operation: &str, report: ModelReport) -> Self {
        self.with_model_after(operation, report, Duration::ZERO)
    }

    pub fn with_model_after(mut self, operation: &str, report: ModelReport, delay: Duration) -> Self {
        self.models.insert(
            operation.to_string(),
            Scripted {
                reply: Ok(report),
                delay,
            },
        );
        self
    }

    pub fn with_model_failure(mut self, operation: &str, message: &str) -> Self {
        self.models
            .insert(operation.to_string(), Scripted::now(Err(message.to_string())));
        self
    }

    /// Queue a prediction reply; replies are consumed in order
    pub fn with_prediction(self, reply: std::result::Result<PredictionResult, String>) -> Self {
        if let Ok(mut queue) = self.predictions.lock() {
            queue.push_back(reply);
        }
        self
    }

    /// Shared handle to the call log, usable after the mock is moved
    pub fn call_log(&self) -> Arc<Mutex<Vec<ApiCall>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: ApiCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    async fn reply<T: Clone>(scripted: Option<&Scripted<T>>, what: &str, key: &str) -> Result<T> {
        let scripted = scripted.ok_or_else(|| {
            ReportClientError::general(format!("Mock {} not found for key: {}", what, key))
        })?;
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.reply.clone().map_err(ReportClientError::general)
    }
}

impl Default for MockReportApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportApi for MockReportApi {
    async fn fetch_catalog(&self) -> Result<OptionCatalog> {
        self.record(ApiCall::Catalog);
        self.catalog
            .clone()
            .ok_or_else(|| ReportClientError::general("Mock catalog not configured"))
    }

    async fn count_entries(&self, selection: &FilterSelection) -> Result<u64> {
        let key = selection.operation.to_string();
        self.record(ApiCall::Count(key.clone()));
        Self::reply(self.counts.get(&key), "count", &key).await
    }

    async fn fetch_analysis(&self, selection: &FilterSelection) -> Result<AnalysisReport> {
        let key = selection.operation.to_string();
        self.record(ApiCall::Analysis(key.clone()));
        Self::reply(self.analyses.get(&key), "analysis", &key).await
    }

    async fn fetch_model(&self, selection: &FilterSelection) -> Result<ModelReport> {
        let key = selection.operation.to_string();
        self.record(ApiCall::Model(key.clone()));
        Self::reply(self.models.get(&key), "model", &key).await
    }

    async fn predict(&self, input: &PredictionInput) -> Result<PredictionResult> {
        self.record(ApiCall::Predict(input.operation.to_string()));
        let next = self
            .predictions
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front());
        match next {
            Some(reply) => reply.map_err(ReportClientError::general),
            None => Err(ReportClientError::general("Mock prediction not configured")),
        }
    }
}

/// Gate answering from a script; an exhausted script cannot decide
pub struct ScriptedGate {
    decisions: Mutex<VecDeque<bool>>,
    asked: Arc<Mutex<Vec<u64>>>,
}

impl ScriptedGate {
    pub fn new(decisions: Vec<bool>) -> Self {
        Self {
            decisions: Mutex::new(decisions.into()),
            asked: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Entry counts the gate was asked about, in order
    pub fn asked(&self) -> Arc<Mutex<Vec<u64>>> {
        Arc::clone(&self.asked)
    }
}

impl ConfirmationGate for ScriptedGate {
    async fn confirm(&self, entries_count: u64) -> Result<bool> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(entries_count);
        }
        let next = self
            .decisions
            .lock()
            .ok()
            .and_then(|mut decisions| decisions.pop_front());
        next.ok_or_else(|| ReportClientError::confirmation_unavailable("no scripted decision"))
    }
}

/// Test helper functions
pub mod test_helpers {
    use crate::types::{
        AnalysisReport, ErrorMetrics, FieldValue, Figure, FilterSelection, LocationSummaryRow,
        MapFragment,
        ModelReport, ModelSummaryStatistics, OptionCatalog, TypeSummaryRow,
    };

    /// PNG signature bytes, base64 encoded
    pub const SAMPLE_FIGURE: &str = "iVBORw0KGgo=";

    pub fn sample_catalog() -> OptionCatalog {
        let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        OptionCatalog {
            entries: 1200,
            update: "2024-05-01 10:30:00".to_string(),
            operations: list(&["renting", "selling"]),
            types: list(&["All", "apartment", "house"]),
            states: list(&["SP", "RJ"]),
            cities: list(&["Sao Paulo", "Campinas"]),
            neighborhoods: list(&["All", "Centro", "Moema"]),
            dorms: list(&["1+", "2+", "3+"]),
            toilets: list(&["1+", "2+"]),
            garages: list(&["0+", "1+"]),
            min_size: Some(20u64.into()),
            max_size: Some(500u64.into()),
            min_price: Some(500u64.into()),
            max_price: Some(20000u64.into()),
        }
    }

    pub fn sample_selection(operation: &str) -> FilterSelection {
        FilterSelection {
            operation: operation.into(),
            property_type: "All".into(),
            state: "SP".into(),
            city: "Sao Paulo".into(),
            neighborhood: "All".into(),
            dorm_count: "1+".into(),
            toilet_count: "1+".into(),
            garage_count: "0+".into(),
            min_size: FieldValue::from(20i64),
            max_size: FieldValue::from(500i64),
            min_price: FieldValue::from(500i64),
            max_price: FieldValue::from(20000i64),
            effective_entry_count: 1200,
            last_update: "2024-05-01 10:30:00".to_string(),
        }
    }

    /// Analysis payload; zero entries yields empty summary tables
    pub fn sample_analysis(operation: &str, entries: u64) -> AnalysisReport {
        let (per_type_summary, per_location_summary) = if entries == 0 {
            (Vec::new(), Vec::new())
        } else {
            (
                vec![TypeSummaryRow {
                    property_type: "apartment".into(),
                    size: 72.5,
                    dorms: 2.0,
                    toilets: 1.5,
                    garage: 1.0,
                    price: 3150.0,
                    additional_costs: 640.25,
                    price_per_sqm: 43.448,
                }],
                vec![LocationSummaryRow {
                    location: 1i64.into(),
                    price_per_sqm: 51.2,
                    price: 3400.0,
                    count: entries,
                    size: 66.4,
                    apartment_ratio: 0.8125,
                    house_ratio: 0.1875,
                    additional_costs: 710.0,
                    dorms: 2.1,
                    toilets: 1.6,
                    garages: 0.9,
                }],
            )
        };

        AnalysisReport {
            effective_entries_processed: entries,
            reference_operation: operation.to_string(),
            location_cluster_count: 3,
            per_type_summary,
            per_location_summary,
            type_distribution_figure: Figure(SAMPLE_FIGURE.to_string()),
            location_plots_figure: Figure(SAMPLE_FIGURE.to_string()),
            cluster_map_fragment: MapFragment("<div id=\"clusters\"></div>".to_string()),
            price_heatmap_fragment: MapFragment("<div id=\"heatmap\"></div>".to_string()),
        }
    }

    pub fn sample_model(name: &str) -> ModelReport {
        ModelReport {
            model_name: name.to_string(),
            error_metrics: ErrorMetrics {
                mean_squared_error: 152340.5,
                mean_absolute_error: 280.126,
                r_squared: 0.8731,
            },
            summary_statistics: ModelSummaryStatistics {
                average_actual_price: 3200.0,
                average_predicted_price: 3175.5,
                average_absolute_error: 2.80126,
                average_percentage_error: 0.0875,
            },
            predictions_plot_figure: Figure(SAMPLE_FIGURE.to_string()),
            features_importance_figure: Some(Figure(SAMPLE_FIGURE.to_string())),
        }
    }
}
