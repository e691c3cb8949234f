//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CARTWHEEL_CATALOG_URL` - Base URL of the catalog API
//!   (e.g., <http://localhost:3333>)
//!
//! ## Optional
//! - `CARTWHEEL_STORAGE_PATH` - Path of the cart storage file
//!   (default: cartwheel.json)
//! - `CARTWHEEL_STORAGE_KEY` - Storage slot the cart is kept under
//!   (default: cart)

use std::path::PathBuf;

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

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Base URL of the catalog API
    pub catalog_url: Url,
    /// Path of the cart storage file
    pub storage_path: PathBuf,
    /// Storage slot the cart is kept under
    pub storage_key: String,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_url = get_required_env("CARTWHEEL_CATALOG_URL")?;
        let catalog_url = parse_url("CARTWHEEL_CATALOG_URL", &catalog_url)?;
        let storage_path =
            PathBuf::from(get_env_or_default("CARTWHEEL_STORAGE_PATH", "cartwheel.json"));
        let storage_key = get_env_or_default("CARTWHEEL_STORAGE_KEY", "cart");

        Ok(Self {
            catalog_url,
            storage_path,
            storage_key,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and validate a base URL.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be an absolute http(s) URL".to_string(),
        ));
    }

    Ok(url)
}
