use report_client::ReportClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Report(#[from] ReportClientError),

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Other(String),

    #[error("{0}: {1}")]
    WithContext(String, Box<CliError>),
}

impl CliError {
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Io(err) => format!("I/O operation failed: {err}"),
            Self::Report(err) => report_message(err),
            Self::Usage(msg) => format!("{msg} (see --help)"),
            Self::Other(msg) => msg.clone(),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
        }
    }
}

fn report_message(err: &ReportClientError) -> String {
    match err {
        ReportClientError::TransportFailure {
            endpoint,
            status: None,
            message,
        } => format!(
            "Could not reach the backend at {endpoint}: {message}. Check base_url in the configuration or pass --base-url"
        ),
        ReportClientError::TransportFailure {
            endpoint,
            status: Some(status),
            ..
        } => format!("The backend answered {endpoint} with HTTP {status}"),
        ReportClientError::MalformedResponse { endpoint, message } => {
            format!("Unexpected response from {endpoint}: {message}")
        }
        ReportClientError::ConfigNotFound { path } => format!(
            "Configuration file not found: {}. Run `estate init` to create one",
            path.display()
        ),
        ReportClientError::InvalidConfig { message } => format!("Invalid configuration: {message}"),
        ReportClientError::ConfigParse(err) => format!("Failed to parse configuration: {err}"),
        other => other.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

pub trait ResultExt<T, E> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: Into<CliError>,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let cli_err: CliError = err.into();
            cli_err.with_context(context())
        })
    }
}
