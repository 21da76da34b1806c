//! Wire types exchanged with the analysis backend

use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A user-entered filter or predictor value: free text or a number.
/// Numbers keep their integer or decimal form on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    /// The empty (unconstrained) value
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }

    /// Interpret free-text input: blank is empty, whole numerals stay
    /// integers, other numerals become decimals
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::empty();
        }
        if let Ok(whole) = trimmed.parse::<i64>() {
            return Self::from(whole);
        }
        match trimmed.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            Some(number) => Self::Number(number),
            None => Self::Text(trimmed.to_string()),
        }
    }

    /// Whether this value is one of the given option strings
    pub fn is_one_of(&self, options: &[String]) -> bool {
        let rendered = self.to_string();
        options.iter().any(|option| *option == rendered)
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(value.to_string()))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<serde_json::Number> for FieldValue {
    fn from(value: serde_json::Number) -> Self {
        Self::Number(value)
    }
}

/// Option lists and dataset metadata served by the catalog bootstrap endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionCatalog {
    /// Number of entries in the whole dataset
    pub entries: u64,
    /// Timestamp of the last dataset refresh, as served
    pub update: String,
    pub operations: Vec<String>,
    pub types: Vec<String>,
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub neighborhoods: Vec<String>,
    pub dorms: Vec<String>,
    pub toilets: Vec<String>,
    pub garages: Vec<String>,
    pub min_size: Option<serde_json::Number>,
    pub max_size: Option<serde_json::Number>,
    pub min_price: Option<serde_json::Number>,
    pub max_price: Option<serde_json::Number>,
}

/// One chosen value per filter dimension plus the dataset metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub operation: FieldValue,
    #[serde(rename = "type")]
    pub property_type: FieldValue,
    pub state: FieldValue,
    pub city: FieldValue,
    pub neighborhood: FieldValue,
    #[serde(rename = "dorm")]
    pub dorm_count: FieldValue,
    #[serde(rename = "toilet")]
    pub toilet_count: FieldValue,
    #[serde(rename = "garage")]
    pub garage_count: FieldValue,
    pub min_size: FieldValue,
    pub max_size: FieldValue,
    pub min_price: FieldValue,
    pub max_price: FieldValue,
    #[serde(rename = "entries")]
    pub effective_entry_count: u64,
    #[serde(rename = "update")]
    pub last_update: String,
}

/// Response of the entry-count endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCount {
    pub entries_count: u64,
}

/// Base64-encoded raster figure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Figure(pub String);

impl Figure {
    /// Decode the raster bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(self.0.trim())?)
    }

    /// Data URI suitable for an `<img src>` attribute
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Ready-to-embed map markup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapFragment(pub String);

impl MapFragment {
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Mean values per property type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSummaryRow {
    #[serde(rename = "type")]
    pub property_type: FieldValue,
    pub size: f64,
    pub dorms: f64,
    pub toilets: f64,
    pub garage: f64,
    pub price: f64,
    pub additional_costs: f64,
    pub price_per_sqm: f64,
}

/// Mean values per location cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummaryRow {
    #[serde(rename = "Location")]
    pub location: FieldValue,
    #[serde(rename = "Price/sqm")]
    pub price_per_sqm: f64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Count")]
    pub count: u64,
    #[serde(rename = "Size")]
    pub size: f64,
    #[serde(rename = "Apartment ratio")]
    pub apartment_ratio: f64,
    #[serde(rename = "House ratio")]
    pub house_ratio: f64,
    #[serde(rename = "Additional costs")]
    pub additional_costs: f64,
    #[serde(rename = "Dorms")]
    pub dorms: f64,
    #[serde(rename = "Toilets")]
    pub toilets: f64,
    #[serde(rename = "Garages")]
    pub garages: f64,
}

/// Payload of the analysis endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(rename = "total_entries")]
    pub effective_entries_processed: u64,
    #[serde(rename = "operation")]
    pub reference_operation: String,
    #[serde(rename = "locations_clusters")]
    pub location_cluster_count: u64,
    #[serde(rename = "summary_by_type")]
    pub per_type_summary: Vec<TypeSummaryRow>,
    #[serde(rename = "summary_by_location")]
    pub per_location_summary: Vec<LocationSummaryRow>,
    #[serde(rename = "type_distribution")]
    pub type_distribution_figure: Figure,
    #[serde(rename = "locations_plots")]
    pub location_plots_figure: Figure,
    #[serde(rename = "clusters_map")]
    pub cluster_map_fragment: MapFragment,
    #[serde(rename = "price_heatmap")]
    pub price_heatmap_fragment: MapFragment,
}

/// Regression error metrics of the trained model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    #[serde(rename = "mse")]
    pub mean_squared_error: f64,
    #[serde(rename = "mae")]
    pub mean_absolute_error: f64,
    #[serde(rename = "r2")]
    pub r_squared: f64,
}

/// Aggregate comparison of actual and predicted prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelSummaryStatistics {
    #[serde(rename = "Average Actual Price")]
    pub average_actual_price: f64,
    #[serde(rename = "Average Predicted Price")]
    pub average_predicted_price: f64,
    #[serde(rename = "Average Absolute Error")]
    pub average_absolute_error: f64,
    #[serde(rename = "Average Percentage Error (%)")]
    pub average_percentage_error: f64,
}

/// Payload of the model endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    #[serde(rename = "model")]
    pub model_name: String,
    #[serde(flatten)]
    pub error_metrics: ErrorMetrics,
    #[serde(rename = "summary_model", deserialize_with = "single_record")]
    pub summary_statistics: ModelSummaryStatistics,
    #[serde(rename = "predictions_plot")]
    pub predictions_plot_figure: Figure,
    #[serde(rename = "features_analysis", default)]
    pub features_importance_figure: Option<Figure>,
}

/// The backend serialises the one-row summary as a record list
fn single_record<'de, D>(deserializer: D) -> std::result::Result<ModelSummaryStatistics, D::Error>
where
    D: Deserializer<'de>,
{
    let records = Vec::<ModelSummaryStatistics>::deserialize(deserializer)?;
    records
        .into_iter()
        .next()
        .ok_or_else(|| serde::de::Error::custom("summary_model must contain one record"))
}

/// Feature record sent to the prediction endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub operation: FieldValue,
    pub size: FieldValue,
    pub dorms: FieldValue,
    pub toilets: FieldValue,
    pub garage: FieldValue,
    /// 1 for apartment, 0 for house
    #[serde(rename = "type")]
    pub property_type_flag: FieldValue,
    #[serde(rename = "location")]
    pub location_code: FieldValue,
}

impl Default for PredictionInput {
    fn default() -> Self {
        Self {
            operation: FieldValue::from(PREDICTOR_OPERATIONS[0]),
            size: FieldValue::empty(),
            dorms: FieldValue::empty(),
            toilets: FieldValue::empty(),
            garage: FieldValue::empty(),
            property_type_flag: FieldValue::empty(),
            location_code: FieldValue::empty(),
        }
    }
}

/// Operations the predictor offers
pub const PREDICTOR_OPERATIONS: [&str; 2] = ["renting", "selling"];

/// Response of the prediction endpoint; deployments differ in shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResult {
    WithCosts { price: f64, additional_costs: f64 },
    Price { prediction: f64 },
}

impl PredictionResult {
    pub fn price(&self) -> f64 {
        match self {
            Self::WithCosts { price, .. } => *price,
            Self::Price { prediction } => *prediction,
        }
    }

    pub fn additional_costs(&self) -> Option<f64> {
        match self {
            Self::WithCosts {
                additional_costs, ..
            } => Some(*additional_costs),
            Self::Price { .. } => None,
        }
    }
}
