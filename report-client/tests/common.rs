//! Shared fixtures for report-client integration tests
//!
//! Payloads mirror what the analysis backend serves, including its
//! mixed-case location keys and the one-record model summary list.

#![allow(dead_code)]

use report_client::{ClientConfig, HttpReportClient};
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// PNG signature bytes, base64 encoded
pub const FIGURE: &str = "iVBORw0KGgo=";

pub fn catalog_json() -> Value {
    json!({
        "entries": 1200,
        "update": "2024-05-01T10:30:00+00:00",
        "operations": ["renting", "selling"],
        "types": ["All", "apartment", "house"],
        "states": ["SP", "RJ"],
        "cities": ["Sao Paulo", "Campinas"],
        "neighborhoods": ["All", "Centro"],
        "dorms": ["1+", "2+"],
        "toilets": ["1+", "2+"],
        "garages": ["0+", "1+"],
        "min_size": 20,
        "max_size": 500,
        "min_price": 500,
        "max_price": 20000
    })
}

pub fn analysis_json(operation: &str, entries: u64) -> Value {
    let (types, locations) = if entries == 0 {
        (json!([]), json!([]))
    } else {
        (
            json!([{
                "type": "apartment", "size": 72.5, "dorms": 2, "toilets": 1.5,
                "garage": 1, "price": 3150, "additional_costs": 640.25,
                "price_per_sqm": 43.448
            }]),
            json!([{
                "Location": 1, "Price/sqm": 51.2, "Price": 3400, "Count": entries,
                "Size": 66.4, "Apartment ratio": 0.8125, "House ratio": 0.1875,
                "Additional costs": 710, "Dorms": 2.1, "Toilets": 1.6, "Garages": 0.9
            }]),
        )
    };

    json!({
        "total_entries": entries,
        "operation": operation,
        "locations_clusters": 3,
        "summary_by_type": types,
        "summary_by_location": locations,
        "type_distribution": FIGURE,
        "locations_plots": FIGURE,
        "clusters_map": "<div id=\"clusters\"></div>",
        "price_heatmap": "<div id=\"heatmap\"></div>"
    })
}

pub fn model_json(name: &str) -> Value {
    json!({
        "model": name,
        "mse": 152340.5,
        "mae": 280.126,
        "r2": 0.8731,
        "summary_model": [{
            "Average Actual Price": 3200.0,
            "Average Predicted Price": 3175.5,
            "Average Absolute Error": 2.80126,
            "Average Percentage Error (%)": 0.0875
        }],
        "predictions_plot": FIGURE,
        "features_analysis": FIGURE
    })
}

/// Mount a JSON reply for one method and path
pub async fn mount_json(server: &MockServer, verb: &str, route: &str, status: u16, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Server answering every endpoint successfully for `entries` matches
pub async fn start_backend(entries: u64) -> MockServer {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/initial", 200, catalog_json()).await;
    mount_json(
        &server,
        "POST",
        "/get_entries_count",
        200,
        json!({ "entries_count": entries }),
    )
    .await;
    mount_json(&server, "POST", "/get_analysis", 200, analysis_json("renting", entries)).await;
    mount_json(&server, "POST", "/get_model", 200, model_json("RandomForest")).await;
    server
}

pub fn client_for(server: &MockServer) -> HttpReportClient {
    HttpReportClient::new(ClientConfig::with_base_url(server.uri())).unwrap()
}

/// Request paths the server received, in arrival order
pub async fn received_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}
