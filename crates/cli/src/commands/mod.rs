//! Subcommand implementations.

pub mod migrate;
pub mod settings;
pub mod users;

use std::path::PathBuf;

use backoffice_admin::config::{ConfigError, StorageConfig};
use backoffice_admin::storage::{self, StorageError};
use backoffice_admin::{SettingsStore, StoreError};
use backoffice_core::UserListError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment could not be read.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The store rejected a change.
    #[error("{0}")]
    Store(StoreError),

    /// A user list edit was rejected.
    #[error("{0}")]
    Users(#[from] UserListError),

    /// Invalid role name.
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input file is not JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Users(e) => Self::Users(e),
            err => Self::Store(err),
        }
    }
}

/// Open the settings store configured in the environment.
pub async fn open_store() -> Result<SettingsStore, CliError> {
    let config = StorageConfig::from_env()?;
    let storage = storage::open(&config).await?;
    Ok(SettingsStore::new(storage))
}
