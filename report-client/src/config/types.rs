use crate::error::{ReportClientError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default backend origin used when no configuration file is present
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "estate.toml";

/// Main configuration structure for the report client
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Backend origin every endpoint path is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Endpoint path overrides
    #[serde(default)]
    pub endpoints: EndpointConfig,
    /// Report presentation settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Paths of the backend endpoints, relative to `base_url`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub catalog: String,
    pub count: String,
    pub analysis: String,
    pub model: String,
    pub prediction: String,
}

/// Report presentation settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Render the features-importance figure when the model payload has one
    pub show_features_importance: bool,
    /// Directory that decoded figures and map fragments are written to
    pub assets_dir: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            catalog: "/initial".to_string(),
            count: "/get_entries_count".to_string(),
            analysis: "/get_analysis".to_string(),
            model: "/get_model".to_string(),
            prediction: "/get_prediction".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            show_features_importance: false,
            assets_dir: "report-assets".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            endpoints: EndpointConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at a specific backend origin
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Check that the base URL parses and the timeout is usable
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ReportClientError::invalid_config(format!("Invalid base_url '{}': {}", self.base_url, e))
        })?;

        if url.cannot_be_a_base() {
            return Err(ReportClientError::invalid_config(format!(
                "base_url '{}' cannot be used as a base",
                self.base_url
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(ReportClientError::invalid_config(
                "timeout_seconds must be greater than zero",
            ));
        }

        for (name, path) in self.endpoints.named() {
            if path.trim().is_empty() {
                return Err(ReportClientError::invalid_config(format!(
                    "Endpoint '{}' has an empty path",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Resolve an endpoint path against the base URL
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        let base = Url::parse(self.base_url.trim_end_matches('/'))?;
        let joined = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }
}

impl EndpointConfig {
    /// Endpoint paths paired with their configuration key
    pub fn named(&self) -> [(&'static str, &str); 5] {
        [
            ("catalog", self.catalog.as_str()),
            ("count", self.count.as_str()),
            ("analysis", self.analysis.as_str()),
            ("model", self.model.as_str()),
            ("prediction", self.prediction.as_str()),
        ]
    }
}
