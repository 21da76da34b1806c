mod common;

use common::*;
use report_client::{
    compose_catalog_header, compose_state, config::ConfigLoader, renderers::write_assets,
    AutoConfirm, ClientConfig, DefaultConfigLoader, Dimension, FieldValue, FilterState,
    HtmlRenderer, PredictionResult, PredictionState, Predictor, PredictorField, QueryEvent,
    QueryOrchestrator, QueryOutcome, ReportApi, ReportClientError, ReportKind, ReportRenderer,
    ReportSlot, TerminalRenderer,
};
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

// =============================================================================
// Transport
// =============================================================================

#[cfg(test)]
mod transport_tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog_seeds_filter_defaults() {
        let server = start_backend(42).await;
        let client = client_for(&server);

        let filters = FilterState::bootstrap(&client).await.unwrap();

        assert_eq!(filters.get(Dimension::Operation), &FieldValue::from("renting"));
        assert_eq!(filters.get(Dimension::MinSize), &FieldValue::from(20i64));
        assert!(filters.out_of_catalog().is_empty());

        let header = compose_catalog_header(filters.catalog());
        assert_eq!(header.title, "Information About: 1200 real states");
    }

    #[tokio::test]
    async fn test_count_sends_selection_with_backend_names() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/initial", 200, catalog_json()).await;
        Mock::given(method("POST"))
            .and(path("/get_entries_count"))
            .and(body_partial_json(json!({
                "operation": "selling",
                "type": "All",
                "dorm": "1+",
                "min_size": 20,
                "entries": 1200
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "entries_count": 7 })))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        let mut filters = FilterState::bootstrap(&client).await.unwrap();
        filters.set(Dimension::Operation, "selling");

        assert_eq!(client.count_entries(&filters.snapshot()).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_error_status_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/initial"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_catalog().await.unwrap_err();

        match err {
            ReportClientError::TransportFailure {
                endpoint, status, ..
            } => {
                assert_eq!(endpoint, "/initial");
                assert_eq!(status, Some(500));
            }
            other => panic!("expected transport failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_failure() {
        let client = report_client::HttpReportClient::new(ClientConfig::with_base_url(
            "http://127.0.0.1:9",
        ))
        .unwrap();

        let err = client.fetch_catalog().await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_missing_field_is_malformed() {
        let server = MockServer::start().await;
        let mut analysis = analysis_json("renting", 5);
        analysis
            .as_object_mut()
            .unwrap()
            .remove("locations_clusters");
        mount_json(&server, "POST", "/get_analysis", 200, analysis).await;

        let selection = Default::default();
        let err = client_for(&server)
            .fetch_analysis(&selection)
            .await
            .unwrap_err();

        assert!(matches!(err, ReportClientError::MalformedResponse { .. }));
        assert!(err.to_string().contains("locations_clusters"));
    }
}

// =============================================================================
// Query flow
// =============================================================================

#[cfg(test)]
mod query_tests {
    use super::*;

    #[tokio::test]
    async fn test_accept_renders_summary() {
        let server = start_backend(42).await;
        let client = client_for(&server);
        let filters = FilterState::bootstrap(&client).await.unwrap();
        let mut orchestrator = QueryOrchestrator::new(client, AutoConfirm(true));

        let mut ready = Vec::new();
        orchestrator.submit(filters.snapshot());
        let outcome = orchestrator
            .run_until_settled(|event, _| {
                if let QueryEvent::SectionReady { section, .. } = event {
                    ready.push(*section);
                }
            })
            .await;

        assert_eq!(outcome, QueryOutcome::Ready);
        assert_eq!(ready.len(), 2);
        assert!(ready.contains(&ReportKind::Analysis));
        assert!(ready.contains(&ReportKind::Model));

        let output = TerminalRenderer::new().render(&compose_state(orchestrator.state(), false));
        assert!(output.contains("Effective Entries Processed: 42"));
        assert!(output.contains("Model: RandomForest"));

        let paths = received_paths(&server).await;
        assert_eq!(paths[0], "/initial");
        assert_eq!(paths[1], "/get_entries_count");
        assert_eq!(paths.len(), 4);
    }

    #[tokio::test]
    async fn test_typed_range_reaches_every_request_as_entered() {
        let server = start_backend(42).await;
        let client = client_for(&server);
        let mut filters = FilterState::bootstrap(&client).await.unwrap();
        filters.set(Dimension::MinPrice, FieldValue::from_input("1000"));
        let mut orchestrator = QueryOrchestrator::new(client, AutoConfirm(true));

        orchestrator.submit(filters.snapshot());
        let outcome = orchestrator.run_until_settled(|_, _| {}).await;
        assert_eq!(outcome, QueryOutcome::Ready);

        let posts: Vec<_> = server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method.as_str() == "POST")
            .collect();
        assert_eq!(posts.len(), 3);
        for request in posts {
            let raw = String::from_utf8_lossy(&request.body).to_string();
            assert!(raw.contains(r#""min_price":1000,"#), "{}: {}", request.url.path(), raw);
            assert!(raw.contains(r#""min_size":20,"#), "{}: {}", request.url.path(), raw);
            assert!(!raw.contains(".0,"), "{}: {}", request.url.path(), raw);
        }
    }

    #[tokio::test]
    async fn test_zero_entries_proceed_to_empty_tables() {
        let server = start_backend(0).await;
        let client = client_for(&server);
        let filters = FilterState::bootstrap(&client).await.unwrap();
        let mut orchestrator = QueryOrchestrator::new(client, AutoConfirm(true));

        let outcome = orchestrator.submit_and_wait(filters.snapshot()).await;

        assert_eq!(outcome, QueryOutcome::Ready);
        let analysis = orchestrator.state().analysis().loaded().unwrap();
        assert_eq!(analysis.effective_entries_processed, 0);
        assert!(analysis.per_type_summary.is_empty());
        assert!(analysis.per_location_summary.is_empty());
    }

    #[tokio::test]
    async fn test_decline_sends_no_report_requests() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/initial", 200, catalog_json()).await;
        mount_json(
            &server,
            "POST",
            "/get_entries_count",
            200,
            json!({ "entries_count": 42 }),
        )
        .await;
        for route in ["/get_analysis", "/get_model"] {
            Mock::given(method("POST"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&server)
                .await;
        }
        let client = client_for(&server);
        let filters = FilterState::bootstrap(&client).await.unwrap();
        let mut orchestrator = QueryOrchestrator::new(client, AutoConfirm(false));

        let outcome = orchestrator.submit_and_wait(filters.snapshot()).await;

        assert_eq!(outcome, QueryOutcome::Idle);
        assert_eq!(orchestrator.state().analysis(), &ReportSlot::Empty);
        assert!(!orchestrator.state().is_loading());
    }

    #[tokio::test]
    async fn test_count_failure_stops_before_reports() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/initial", 200, catalog_json()).await;
        mount_json(&server, "POST", "/get_entries_count", 503, json!({})).await;
        let client = client_for(&server);
        let filters = FilterState::bootstrap(&client).await.unwrap();
        let mut orchestrator = QueryOrchestrator::new(client, AutoConfirm(true));

        let outcome = orchestrator.submit_and_wait(filters.snapshot()).await;

        assert!(matches!(outcome, QueryOutcome::PartialFailure { ref error } if error.contains("503")));
        assert_eq!(
            received_paths(&server).await,
            vec!["/initial".to_string(), "/get_entries_count".to_string()]
        );
    }

    #[tokio::test]
    async fn test_model_failure_keeps_analysis() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/initial", 200, catalog_json()).await;
        mount_json(
            &server,
            "POST",
            "/get_entries_count",
            200,
            json!({ "entries_count": 42 }),
        )
        .await;
        mount_json(&server, "POST", "/get_analysis", 200, analysis_json("renting", 42)).await;
        mount_json(&server, "POST", "/get_model", 500, json!({ "error": "training failed" })).await;
        let client = client_for(&server);
        let filters = FilterState::bootstrap(&client).await.unwrap();
        let mut orchestrator = QueryOrchestrator::new(client, AutoConfirm(true));

        let outcome = orchestrator.submit_and_wait(filters.snapshot()).await;

        assert_eq!(outcome, QueryOutcome::Ready);
        let state = orchestrator.state();
        assert!(!state.is_loading());
        assert!(state.analysis().loaded().is_some());
        assert!(state.model().error().unwrap().contains("HTTP 500"));

        let output = TerminalRenderer::new().render(&compose_state(state, false));
        assert!(output.contains("Effective Entries Processed: 42"));
        assert!(output.contains("model report unavailable"));
    }

    #[tokio::test]
    async fn test_fetched_report_written_as_html_and_assets() {
        let server = start_backend(12).await;
        let client = client_for(&server);
        let filters = FilterState::bootstrap(&client).await.unwrap();
        let mut orchestrator = QueryOrchestrator::new(client, AutoConfirm(true));
        orchestrator.submit_and_wait(filters.snapshot()).await;

        let temp_dir = TempDir::new().unwrap();
        let views = compose_state(orchestrator.state(), true);
        let written = write_assets(&views, temp_dir.path()).unwrap();
        let html = HtmlRenderer::new().render(&views);

        assert_eq!(written.len(), 6);
        assert!(temp_dir.path().join("clusters_map.html").exists());
        assert!(html.contains("Features Importance"));
        assert!(html.contains(&format!("data:image/png;base64,{}", FIGURE)));
    }
}

// =============================================================================
// Predictor
// =============================================================================

#[cfg(test)]
mod predictor_tests {
    use super::*;

    #[tokio::test]
    async fn test_single_value_prediction() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/get_prediction"))
            .and(body_partial_json(json!({
                "operation": "renting",
                "size": 85.0,
                "type": 1.0,
                "location": 3.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "prediction": 2750.5 })))
            .mount(&server)
            .await;

        let mut predictor = Predictor::new(Arc::new(client_for(&server)));
        predictor.set(PredictorField::Size, 85.0);
        predictor.set(PredictorField::PropertyTypeFlag, 1i64);
        predictor.set(PredictorField::LocationCode, 3i64);

        assert_eq!(
            predictor.submit().await,
            &PredictionState::Predicted(PredictionResult::Price { prediction: 2750.5 })
        );
    }

    #[tokio::test]
    async fn test_price_and_costs_prediction() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "POST",
            "/get_prediction",
            200,
            json!({ "price": 2750.5, "additional_costs": 512.0 }),
        )
        .await;

        let mut predictor = Predictor::new(Arc::new(client_for(&server)));
        let state = predictor.submit().await.clone();

        match state {
            PredictionState::Predicted(result) => {
                assert_eq!(result.price(), 2750.5);
                assert_eq!(result.additional_costs(), Some(512.0));
            }
            other => panic!("expected prediction, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_prediction_is_reported_inline() {
        let server = MockServer::start().await;
        mount_json(&server, "POST", "/get_prediction", 200, json!({ "unexpected": true })).await;

        let mut predictor = Predictor::new(Arc::new(client_for(&server)));
        let state = predictor.submit().await;

        assert!(matches!(state, PredictionState::Failed(e) if e.contains("Malformed response")));
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[cfg(test)]
mod config_tests {
    use super::*;

    #[tokio::test]
    async fn test_config_file_routes_requests() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/api/v2/initial", 200, catalog_json()).await;

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("estate.toml");
        fs::write(
            &config_path,
            format!(
                "base_url = \"{}\"\ntimeout_seconds = 5\n\n[endpoints]\ncatalog = \"/api/v2/initial\"\n",
                server.uri()
            ),
        )
        .unwrap();

        let config = DefaultConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.endpoints.count, "/get_entries_count");

        let client = report_client::HttpReportClient::new(config).unwrap();
        let catalog = client.fetch_catalog().await.unwrap();
        assert_eq!(catalog.entries, 1200);
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = DefaultConfigLoader::load_or_default(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
