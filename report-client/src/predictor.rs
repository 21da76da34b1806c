//! Price predictor flow, independent of the report query

use crate::error::{ReportClientError, Result};
use crate::traits::ReportApi;
use crate::types::{FieldValue, PredictionInput, PredictionResult, PREDICTOR_OPERATIONS};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One input of the prediction feature record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictorField {
    Operation,
    Size,
    Dorms,
    Toilets,
    Garage,
    /// 1 for apartment, 0 for house
    PropertyTypeFlag,
    LocationCode,
}

impl PredictorField {
    pub const ALL: [PredictorField; 7] = [
        PredictorField::Operation,
        PredictorField::Size,
        PredictorField::Dorms,
        PredictorField::Toilets,
        PredictorField::Garage,
        PredictorField::PropertyTypeFlag,
        PredictorField::LocationCode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PredictorField::Operation => "operation",
            PredictorField::Size => "size",
            PredictorField::Dorms => "dorms",
            PredictorField::Toilets => "toilets",
            PredictorField::Garage => "garage",
            PredictorField::PropertyTypeFlag => "type",
            PredictorField::LocationCode => "location",
        }
    }

    /// Allowed values, when the field is a closed choice
    pub fn options(self) -> &'static [&'static str] {
        match self {
            PredictorField::Operation => &PREDICTOR_OPERATIONS,
            _ => &[],
        }
    }
}

impl fmt::Display for PredictorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PredictorField {
    type Err = ReportClientError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        PredictorField::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = PredictorField::ALL.iter().map(|f| f.name()).collect();
                ReportClientError::general(format!(
                    "Unknown predictor input '{}'. Available inputs: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// What the predictor currently displays
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PredictionState {
    #[default]
    NotPredicted,
    Predicted(PredictionResult),
    /// The last submission failed; no prediction is shown
    Failed(String),
}

/// Feature inputs plus the last prediction outcome
pub struct Predictor<A: ReportApi> {
    api: Arc<A>,
    input: PredictionInput,
    state: PredictionState,
}

impl<A: ReportApi> Predictor<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            input: PredictionInput::default(),
            state: PredictionState::NotPredicted,
        }
    }

    pub fn input(&self) -> &PredictionInput {
        &self.input
    }

    pub fn state(&self) -> &PredictionState {
        &self.state
    }

    /// Update exactly one input; values are sent as entered
    pub fn set<V: Into<FieldValue>>(&mut self, field: PredictorField, value: V) {
        let value = value.into();
        debug!(%field, %value, "predictor input updated");
        let input = &mut self.input;
        let slot = match field {
            PredictorField::Operation => &mut input.operation,
            PredictorField::Size => &mut input.size,
            PredictorField::Dorms => &mut input.dorms,
            PredictorField::Toilets => &mut input.toilets,
            PredictorField::Garage => &mut input.garage,
            PredictorField::PropertyTypeFlag => &mut input.property_type_flag,
            PredictorField::LocationCode => &mut input.location_code,
        };
        *slot = value;
    }

    /// Send the current inputs once. A failure clears any previous prediction.
    pub async fn submit(&mut self) -> &PredictionState {
        match self.api.predict(&self.input).await {
            Ok(result) => {
                info!(price = result.price(), "prediction received");
                self.state = PredictionState::Predicted(result);
            }
            Err(e) => {
                warn!(error = %e, "prediction failed");
                self.state = PredictionState::Failed(e.to_string());
            }
        }
        &self.state
    }
}
