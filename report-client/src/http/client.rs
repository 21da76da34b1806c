use crate::config::ClientConfig;
use crate::error::{ReportClientError, Result};
use crate::http::decode_json;
use crate::traits::ReportApi;
use crate::types::{
    AnalysisReport, EntryCount, FilterSelection, ModelReport, OptionCatalog, PredictionInput,
    PredictionResult,
};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// reqwest-backed implementation of the report endpoints
#[derive(Clone)]
pub struct HttpReportClient {
    client: Client,
    config: ClientConfig,
}

impl HttpReportClient {
    /// Create a new HTTP client with configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint_url(path)?;
        debug!(%method, endpoint = path, "sending request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            ReportClientError::transport(path.to_string(), None, format!("Request failed: {}", e))
        })?;

        decode_json(path, response).await
    }
}

impl ReportApi for HttpReportClient {
    async fn fetch_catalog(&self) -> Result<OptionCatalog> {
        self.send::<(), _>(Method::GET, &self.config.endpoints.catalog, None)
            .await
    }

    async fn count_entries(&self, selection: &FilterSelection) -> Result<u64> {
        let count: EntryCount = self
            .send(Method::POST, &self.config.endpoints.count, Some(selection))
            .await?;
        Ok(count.entries_count)
    }

    async fn fetch_analysis(&self, selection: &FilterSelection) -> Result<AnalysisReport> {
        self.send(Method::POST, &self.config.endpoints.analysis, Some(selection))
            .await
    }

    async fn fetch_model(&self, selection: &FilterSelection) -> Result<ModelReport> {
        self.send(Method::POST, &self.config.endpoints.model, Some(selection))
            .await
    }

    async fn predict(&self, input: &PredictionInput) -> Result<PredictionResult> {
        self.send(Method::POST, &self.config.endpoints.prediction, Some(input))
            .await
    }
}
