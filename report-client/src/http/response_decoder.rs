use crate::error::{ReportClientError, Result};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Turn a backend response into a typed payload.
///
/// Non-2xx statuses become `TransportFailure`; bodies that do not match the
/// expected shape become `MalformedResponse`.
pub async fn decode_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        ReportClientError::transport(endpoint.to_string(), Some(status.as_u16()), e.to_string())
    })?;

    if !status.is_success() {
        warn!(endpoint, status = status.as_u16(), "backend returned an error status");
        return Err(ReportClientError::transport(
            endpoint.to_string(),
            Some(status.as_u16()),
            format!("HTTP {}: {}", status, summarize_body(&body)),
        ));
    }

    decode_body(endpoint, &body)
}

/// Parse a JSON body, classifying failures as malformed responses
pub fn decode_body<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        warn!(endpoint, error = %e, "backend payload did not match the expected shape");
        ReportClientError::malformed(endpoint.to_string(), e.to_string())
    })
}

/// First line of a body, capped for error messages
fn summarize_body(body: &str) -> String {
    let first_line = body.lines().next().unwrap_or_default();
    if first_line.chars().count() > 200 {
        let truncated: String = first_line.chars().take(200).collect();
        format!("{}...", truncated)
    } else {
        first_line.to_string()
    }
}
