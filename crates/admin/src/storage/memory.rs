//! In-process storage.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::{SettingsStorage, StorageError};

/// Settings held in memory.
///
/// [`MemorySettingsStorage::fail_writes`] and
/// [`MemorySettingsStorage::fail_reads`] make saves or loads fail the way a
/// full or unavailable backend would.
#[derive(Debug, Default)]
pub struct MemorySettingsStorage {
    value: Mutex<Option<JsonValue>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemorySettingsStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `value` already stored.
    #[must_use]
    pub fn with_value(value: JsonValue) -> Self {
        Self {
            value: Mutex::new(Some(value)),
            ..Self::default()
        }
    }

    /// Make subsequent loads fail (`true`) or succeed (`false`).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent saves fail (`true`) or succeed (`false`).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The currently stored record.
    #[must_use]
    pub fn stored(&self) -> Option<JsonValue> {
        self.value.lock().ok().and_then(|guard| guard.clone())
    }

    /// Number of successful saves.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsStorage for MemorySettingsStorage {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> Result<Option<JsonValue>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("connection refused".to_owned()));
        }
        let guard = self
            .value
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_owned()))?;
        Ok(guard.clone())
    }

    async fn save(&self, value: &JsonValue) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("quota exceeded".to_owned()));
        }
        let mut guard = self
            .value
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_owned()))?;
        *guard = Some(value.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
