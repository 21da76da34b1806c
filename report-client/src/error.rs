use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for report-client operations
pub type Result<T> = std::result::Result<T, ReportClientError>;

/// Error types for catalog, query, report and prediction operations
#[derive(Debug, Error)]
pub enum ReportClientError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Figure decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Request to {endpoint} failed: {message}")]
    TransportFailure {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("Confirmation could not be obtained: {message}")]
    ConfirmationUnavailable { message: String },

    #[error("General error: {message}")]
    General { message: String },
}

impl ReportClientError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a transport failure for an endpoint
    pub fn transport<S: Into<String>>(endpoint: S, status: Option<u16>, message: S) -> Self {
        Self::TransportFailure {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a malformed response error for an endpoint
    pub fn malformed<S: Into<String>>(endpoint: S, message: S) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a confirmation-unavailable error
    pub fn confirmation_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ConfirmationUnavailable {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Whether this error came from the network layer rather than the payload
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportFailure { .. } | Self::Http(_))
    }
}
