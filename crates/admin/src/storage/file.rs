//! JSON file storage.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::fs;

use super::{SettingsStorage, StorageError};

/// Settings kept in a single JSON file.
///
/// Saves write a sibling `.tmp` file and rename it over the target, so a
/// crash mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct FileSettingsStorage {
    path: PathBuf,
}

impl FileSettingsStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("settings.json"), OsString::from);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SettingsStorage for FileSettingsStorage {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> Result<Option<JsonValue>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, value: &JsonValue) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(value)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
