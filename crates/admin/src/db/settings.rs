//! Settings database operations.
//!
//! The whole settings record is one JSONB row in `admin.settings`.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use crate::storage::{SettingsStorage, StorageError};

/// Key of the store settings record.
pub const DEFAULT_SETTINGS_KEY: &str = "store.settings";

/// Get a setting value.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn get_setting(pool: &PgPool, key: &str) -> Result<Option<JsonValue>, sqlx::Error> {
    sqlx::query_scalar::<_, JsonValue>(
        r"
        SELECT value FROM admin.settings
        WHERE key = $1
        ",
    )
    .bind(key)
    .fetch_optional(pool)
    .await
}

/// Set a setting value, inserting or replacing it.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn set_setting(pool: &PgPool, key: &str, value: &JsonValue) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO admin.settings (key, value)
        VALUES ($1, $2)
        ON CONFLICT (key) DO UPDATE SET value = $2, updated_at = NOW()
        ",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Settings storage backed by the `admin.settings` table.
#[derive(Debug, Clone)]
pub struct PgSettingsStorage {
    pool: PgPool,
    key: String,
}

impl PgSettingsStorage {
    #[must_use]
    pub fn new(pool: PgPool, key: impl Into<String>) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }
}

#[async_trait]
impl SettingsStorage for PgSettingsStorage {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn load(&self) -> Result<Option<JsonValue>, StorageError> {
        Ok(get_setting(&self.pool, &self.key).await?)
    }

    async fn save(&self, value: &JsonValue) -> Result<(), StorageError> {
        Ok(set_setting(&self.pool, &self.key, value).await?)
    }
}
