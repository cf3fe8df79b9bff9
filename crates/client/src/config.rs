//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BAZAAR_GATEWAY_URL` - Base URL of the API gateway (e.g., `http://localhost:9090`)
//!
//! ## Optional
//! - `BAZAAR_DATA_DIR` - Directory for the local JSON store (default: `.bazaar`)
//! - `BAZAAR_HTTP_TIMEOUT_SECS` - Gateway request timeout in seconds (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Gateway connection configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the API gateway.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Full client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway connection settings.
    pub gateway: GatewayConfig,
    /// Directory backing the local JSON store.
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_required_env("BAZAAR_GATEWAY_URL")?;
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("BAZAAR_GATEWAY_URL".to_string(), e.to_string())
        })?;

        let timeout_secs = get_env_or_default("BAZAAR_HTTP_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BAZAAR_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        let data_dir = PathBuf::from(get_env_or_default("BAZAAR_DATA_DIR", ".bazaar"));

        Ok(Self {
            gateway: GatewayConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            data_dir,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
