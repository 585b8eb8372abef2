//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CANTEEN_STORE_PATH` - Storage file holding the persisted cart
//!   (default: `.canteen/storage.json`)
//! - `CANTEEN_STORE_QUOTA_BYTES` - Maximum size of the storage file contents;
//!   writes beyond it are rejected like a full browser store
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use thiserror::Error;

/// Default location of the storage file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = ".canteen/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Path of the file-backed key-value store
    pub store_path: PathBuf,
    /// Optional size limit for the store, in bytes
    pub store_quota: Option<usize>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_path = PathBuf::from(
            lookup("CANTEEN_STORE_PATH")
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string()),
        );

        let store_quota = lookup("CANTEEN_STORE_QUOTA_BYTES")
            .map(|raw| {
                raw.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar("CANTEEN_STORE_QUOTA_BYTES".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            store_path,
            store_quota,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }
}
