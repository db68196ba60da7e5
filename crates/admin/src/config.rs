//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Storage (one of)
//! - `BACKOFFICE_DATABASE_URL` (fallback `DATABASE_URL`) - `PostgreSQL` connection string
//! - `BACKOFFICE_SETTINGS_PATH` - JSON file path (default: data/settings.json)
//!
//! ## Optional
//! - `BACKOFFICE_HOST` - Bind address (default: 127.0.0.1)
//! - `BACKOFFICE_PORT` - Listen port (default: 3001)
//! - `BACKOFFICE_SETTINGS_KEY` - Settings row key (default: store.settings)
//! - `BACKOFFICE_WEBHOOK_TIMEOUT_SECS` - Outbound webhook timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sample rates (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::db::DEFAULT_SETTINGS_KEY;

const DEFAULT_SETTINGS_PATH: &str = "data/settings.json";
const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Where the settings record is kept
    pub storage: StorageConfig,
    /// Timeout for outbound webhook requests
    pub webhook_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Settings storage backend selection.
///
/// Implements `Debug` manually to redact the database URL.
#[derive(Clone)]
pub enum StorageConfig {
    /// JSONB row in `admin.settings`.
    Postgres {
        /// Connection string (contains password)
        database_url: SecretString,
        /// Row key of the settings record
        key: String,
    },
    /// JSON file on local disk.
    File {
        path: PathBuf,
    },
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres { key, .. } => f
                .debug_struct("Postgres")
                .field("database_url", &"[REDACTED]")
                .field("key", key)
                .finish(),
            Self::File { path } => f.debug_struct("File").field("path", path).finish(),
        }
    }
}

impl StorageConfig {
    /// Select the storage backend from the environment.
    ///
    /// A database URL wins over the file path.
    ///
    /// # Errors
    ///
    /// Currently infallible; returns `Result` to match the other loaders.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        if let Some(database_url) = get_database_url("BACKOFFICE_DATABASE_URL") {
            return Ok(Self::Postgres {
                database_url,
                key: get_env_or_default("BACKOFFICE_SETTINGS_KEY", DEFAULT_SETTINGS_KEY),
            });
        }

        Ok(Self::File {
            path: PathBuf::from(get_env_or_default(
                "BACKOFFICE_SETTINGS_PATH",
                DEFAULT_SETTINGS_PATH,
            )),
        })
    }

    /// Returns the database URL for the `PostgreSQL` backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when the file backend is selected.
    pub fn database_url(&self) -> Result<&SecretString, ConfigError> {
        match self {
            Self::Postgres { database_url, .. } => Ok(database_url),
            Self::File { .. } => Err(ConfigError::MissingEnvVar(
                "BACKOFFICE_DATABASE_URL".to_string(),
            )),
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("BACKOFFICE_HOST", &get_env_or_default("BACKOFFICE_HOST", "127.0.0.1"))?;
        let port = parse_env("BACKOFFICE_PORT", &get_env_or_default("BACKOFFICE_PORT", "3001"))?;
        let webhook_timeout_secs: u64 = match get_optional_env("BACKOFFICE_WEBHOOK_TIMEOUT_SECS") {
            Some(raw) => parse_env("BACKOFFICE_WEBHOOK_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_WEBHOOK_TIMEOUT_SECS,
        };
        let storage = StorageConfig::from_env()?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            storage,
            webhook_timeout: Duration::from_secs(webhook_timeout_secs),
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Option<SecretString> {
    get_optional_env(primary_key)
        .or_else(|| get_optional_env("DATABASE_URL"))
        .map(SecretString::from)
}

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse a variable's raw value, naming the variable on failure.
fn parse_env<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
