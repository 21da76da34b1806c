use crate::cli::{GlobalArgs, PredictArgs};
use crate::error::{CliError, Result};
use crate::progress;
use crate::ui;
use report_client::{
    FieldValue, HttpReportClient, PredictionState, Predictor, PredictorField, compose_prediction,
};
use std::sync::Arc;
use tokio::runtime::Runtime;

pub fn execute(global: &GlobalArgs, args: PredictArgs) -> Result<()> {
    let assignments = args.assignments()?;

    let rt = Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(execute_async(global, assignments))
}

/// Operation stays text; every other input is numeric when it parses as one
pub fn input_value(field: PredictorField, raw: &str) -> FieldValue {
    match field {
        PredictorField::Operation => FieldValue::from(raw.trim()),
        _ => FieldValue::from_input(raw),
    }
}

async fn execute_async(global: &GlobalArgs, assignments: Vec<(PredictorField, String)>) -> Result<()> {
    let config = global.load_config()?;
    let client = Arc::new(HttpReportClient::new(config)?);

    let mut predictor = Predictor::new(client);
    for (field, raw) in assignments {
        predictor.set(field, input_value(field, &raw));
    }

    ui::section_header("Predictor");
    let input = predictor.input();
    for (field, value) in [
        (PredictorField::Operation, &input.operation),
        (PredictorField::Size, &input.size),
        (PredictorField::Dorms, &input.dorms),
        (PredictorField::Toilets, &input.toilets),
        (PredictorField::Garage, &input.garage),
        (PredictorField::PropertyTypeFlag, &input.property_type_flag),
        (PredictorField::LocationCode, &input.location_code),
    ] {
        ui::field_line(field.name(), &value.to_string());
    }

    let pb = progress::spinner("Requesting prediction...");
    let state = predictor.submit().await.clone();
    pb.finish_and_clear();

    match state {
        PredictionState::Predicted(result) => {
            for (label, value) in compose_prediction(&result) {
                ui::field_line(&label, &value);
            }
            Ok(())
        }
        PredictionState::Failed(error) => Err(CliError::Other(format!("Prediction failed: {}", error))),
        PredictionState::NotPredicted => Ok(()),
    }
}
