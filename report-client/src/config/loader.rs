use crate::config::types::ClientConfig;
use crate::error::{ReportClientError, Result};
use std::path::Path;
use tracing::debug;

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ClientConfig>;
    fn load_or_default<P: AsRef<Path>>(path: P) -> Result<ClientConfig>;
}

/// Default configuration loader implementation
pub struct DefaultConfigLoader;

impl ConfigLoader for DefaultConfigLoader {
    /// Load and validate configuration from a TOML file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ReportClientError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref)?;

        let config: ClientConfig = toml::from_str(&content).map_err(|e| {
            ReportClientError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        config.validate()?;
        debug!(path = %path_ref.display(), base_url = %config.base_url, "loaded configuration");
        Ok(config)
    }

    /// Load configuration, falling back to built-in defaults when the file is absent
    fn load_or_default<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
        match Self::load_from_file(&path) {
            Err(ReportClientError::ConfigNotFound { path }) => {
                debug!(path = %path.display(), "configuration file absent, using defaults");
                Ok(ClientConfig::default())
            }
            other => other,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_from_file(path)
    }

    /// Load configuration or use defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_or_default(path)
    }
}
