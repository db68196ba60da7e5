//! Persistence backends for the settings record.
//!
//! A backend stores one JSON value and nothing else; reading it back into
//! typed settings (with defaults for anything missing) is the store's job.
//!
//! - [`PgSettingsStorage`] - JSONB row in `admin.settings`
//! - [`FileSettingsStorage`] - JSON file, replaced atomically
//! - [`MemorySettingsStorage`] - in-process, for tests and dry runs

pub mod file;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::config::StorageConfig;
use crate::db;

pub use crate::db::PgSettingsStorage;
pub use file::FileSettingsStorage;
pub use memory::MemorySettingsStorage;

/// Errors that can occur reading or writing the settings record.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data is not valid JSON, or settings failed to serialize.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend refused the operation (quota exceeded, read-only, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A place the settings record can be kept.
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Read the stored record. `Ok(None)` means nothing has been written yet.
    async fn load(&self) -> Result<Option<JsonValue>, StorageError>;

    /// Replace the stored record with `value`.
    async fn save(&self, value: &JsonValue) -> Result<(), StorageError>;
}

/// Open the backend selected by configuration.
///
/// # Errors
///
/// Returns an error if the database pool cannot be created.
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn SettingsStorage>, StorageError> {
    match config {
        StorageConfig::Postgres { database_url, key } => {
            let pool = db::create_pool(database_url).await?;
            tracing::info!(key = %key, "Using PostgreSQL settings storage");
            Ok(Arc::new(PgSettingsStorage::new(pool, key.clone())))
        }
        StorageConfig::File { path } => {
            tracing::info!(path = %path.display(), "Using file settings storage");
            Ok(Arc::new(FileSettingsStorage::new(path.clone())))
        }
    }
}
