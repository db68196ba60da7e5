//! The settings store.
//!
//! One [`SettingsStore`] is built at startup and shared through
//! [`AppState`](crate::state::AppState). It owns the in-memory snapshot of
//! the settings record, loads it lazily from a [`SettingsStorage`] backend,
//! and writes the whole record back on every change.
//!
//! # Guarantees
//!
//! - [`SettingsStore::get`] never fails; unreadable data falls back to defaults.
//!   A backend that cannot be read at all is retried on the next access, and
//!   no write is attempted until a load has succeeded.
//! - A write is committed to memory only after the backend accepted it. A
//!   failed write leaves the snapshot untouched.
//! - Writes are serialized; read-modify-write edits run under the same lock
//!   through [`SettingsStore::update_with`]. Readers always see a whole record.
//!
//! Other processes writing the same backend are not observed.

use std::sync::Arc;

use backoffice_core::{
    SectionError, SectionKind, SectionUpdate, Settings, UserList, UserListError, Validate,
    ValidationErrors,
};
use serde_json::Value as JsonValue;
use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tracing::instrument;

use crate::storage::{SettingsStorage, StorageError};

/// Errors returned by store writes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The section name is not one of the known sections.
    #[error("unknown settings section: {0}")]
    UnknownSection(String),

    /// The payload does not have the section's shape.
    #[error("malformed settings: {0}")]
    Malformed(String),

    /// One or more fields failed validation. Nothing was written.
    #[error("invalid settings: {0}")]
    Validation(#[from] ValidationErrors),

    /// A user list edit was rejected. Nothing was written.
    #[error(transparent)]
    Users(#[from] UserListError),

    /// The backend could not be read or rejected the write. The snapshot is
    /// unchanged.
    #[error("failed to persist settings: {0}")]
    Persistence(#[from] StorageError),
}

impl From<SectionError> for StoreError {
    fn from(err: SectionError) -> Self {
        match err {
            SectionError::Unknown(name) => Self::UnknownSection(name),
            err @ SectionError::Malformed { .. } => Self::Malformed(err.to_string()),
        }
    }
}

/// A committed change, as seen by subscribers.
#[derive(Debug, Clone)]
pub struct SettingsChange {
    /// 0 for the initial load, then +1 per committed write.
    pub revision: u64,
    /// The replaced section, or `None` when the whole record was set or loaded.
    pub section: Option<SectionKind>,
    pub settings: Arc<Settings>,
}

/// The outcome of a committed write.
#[derive(Debug, Clone)]
pub struct Saved<T = ()> {
    pub revision: u64,
    /// The record as it was just before this write.
    pub previous: Settings,
    /// The record as committed by this write.
    pub settings: Arc<Settings>,
    /// Whatever the edit returned.
    pub value: T,
}

struct Snapshot {
    settings: Settings,
    revision: u64,
    /// In memory differs from the stored record.
    dirty: bool,
}

/// Process-wide settings service.
pub struct SettingsStore {
    storage: Arc<dyn SettingsStorage>,
    snapshot: Mutex<Option<Snapshot>>,
    changes: watch::Sender<SettingsChange>,
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("storage", &self.storage.name())
            .finish_non_exhaustive()
    }
}

impl SettingsStore {
    /// Create a store over `storage`. Nothing is read until the first access.
    #[must_use]
    pub fn new(storage: Arc<dyn SettingsStorage>) -> Self {
        let (changes, _) = watch::channel(SettingsChange {
            revision: 0,
            section: None,
            settings: Arc::new(Settings::default()),
        });
        Self {
            storage,
            snapshot: Mutex::new(None),
            changes,
        }
    }

    /// Label of the storage backend.
    #[must_use]
    pub fn storage_name(&self) -> &'static str {
        self.storage.name()
    }

    /// Returns the current settings, loading them on first use.
    ///
    /// If the backend cannot be read, defaults are returned and nothing is
    /// cached; the next access tries the backend again.
    pub async fn get(&self) -> Settings {
        let mut guard = self.snapshot.lock().await;
        self.loaded(&mut guard)
            .await
            .map_or_else(|_| Settings::default(), |snapshot| snapshot.settings.clone())
    }

    /// Replace one section.
    ///
    /// The section is validated first; on success the full record with the
    /// new section is persisted and then committed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if a field is invalid and
    /// [`StoreError::Persistence`] if the backend cannot be read or rejects
    /// the write. In both cases the stored and in-memory settings are
    /// unchanged.
    pub async fn update(&self, update: SectionUpdate) -> Result<Saved, StoreError> {
        self.update_with(|_| Ok((update, ()))).await
    }

    /// Build one section update from the current settings and save it.
    ///
    /// `edit` runs under the store lock, so no other write can land between
    /// the read it sees and the write it produces.
    ///
    /// # Errors
    ///
    /// Returns whatever `edit` returns, otherwise as [`SettingsStore::update`].
    #[instrument(skip_all, fields(section = tracing::field::Empty, backend = self.storage.name()))]
    pub async fn update_with<T>(
        &self,
        edit: impl FnOnce(&Settings) -> Result<(SectionUpdate, T), StoreError>,
    ) -> Result<Saved<T>, StoreError> {
        let mut guard = self.snapshot.lock().await;
        let snapshot = self.loaded(&mut guard).await?;

        let (update, value) = edit(&snapshot.settings)?;
        let kind = update.kind();
        tracing::Span::current().record("section", tracing::field::display(kind));
        update.validate()?;

        let mut candidate = snapshot.settings.clone();
        candidate.apply(update);
        self.persist(&candidate).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Settings write failed");
        })?;

        let saved = self.commit(snapshot, candidate, Some(kind), value);
        tracing::info!(revision = saved.revision, "Settings section saved");
        Ok(saved)
    }

    /// Edit the user list in place and save it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Users`] when `edit` rejects the change, otherwise
    /// as [`SettingsStore::update`].
    pub async fn modify_users<T>(
        &self,
        edit: impl FnOnce(&mut UserList) -> Result<T, UserListError>,
    ) -> Result<Saved<T>, StoreError> {
        self.update_with(|current| {
            let mut users = current.users.clone();
            let value = edit(&mut users)?;
            Ok((SectionUpdate::Users(users), value))
        })
        .await
    }

    /// Replace one section from an untyped name and JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownSection`] for an unknown name and
    /// [`StoreError::Malformed`] for a payload of the wrong shape, neither of
    /// which touches any section; otherwise as [`SettingsStore::update`].
    pub async fn update_json(&self, section: &str, value: JsonValue) -> Result<Saved, StoreError> {
        let update = SectionUpdate::from_json(section, value)?;
        self.update(update).await
    }

    /// Replace the whole record without per-section validation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] if the backend cannot be read or
    /// rejects the write; the snapshot is then unchanged.
    #[instrument(skip(self, settings), fields(backend = self.storage.name()))]
    pub async fn set(&self, settings: Settings) -> Result<Saved, StoreError> {
        let mut guard = self.snapshot.lock().await;
        let snapshot = self.loaded(&mut guard).await?;

        self.persist(&settings).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Settings write failed");
        })?;

        let saved = self.commit(snapshot, settings, None, ());
        tracing::info!(revision = saved.revision, "Settings replaced");
        Ok(saved)
    }

    /// Subscribe to committed changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SettingsChange> {
        self.changes.subscribe()
    }

    /// Write the snapshot back to storage if it differs from the stored record.
    ///
    /// Only a loaded record that had unreadable sections reset is written;
    /// committed changes are already stored.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the write fails.
    pub async fn flush(&self) -> Result<(), StorageError> {
        let mut guard = self.snapshot.lock().await;
        let Some(snapshot) = guard.as_mut().filter(|snapshot| snapshot.dirty) else {
            return Ok(());
        };

        self.persist(&snapshot.settings).await?;
        snapshot.dirty = false;
        tracing::info!(revision = snapshot.revision, "Settings flushed");
        Ok(())
    }

    async fn loaded<'a>(
        &self,
        slot: &'a mut Option<Snapshot>,
    ) -> Result<&'a mut Snapshot, StorageError> {
        let snapshot = match slot.take() {
            Some(snapshot) => snapshot,
            None => self.load().await?,
        };
        Ok(slot.insert(snapshot))
    }

    async fn load(&self) -> Result<Snapshot, StorageError> {
        let (settings, dirty) = match self.storage.load().await {
            Ok(Some(value)) => {
                let stored = Settings::from_stored(value);
                if !stored.recovered.is_empty() {
                    tracing::warn!(
                        sections = ?stored.recovered,
                        "Unreadable settings sections reset to defaults"
                    );
                }
                let dirty = !stored.recovered.is_empty();
                (stored.settings, dirty)
            }
            Ok(None) => {
                tracing::info!("No stored settings, using defaults until first save");
                (Settings::default(), false)
            }
            Err(e) => {
                tracing::error!(error = %e, backend = self.storage.name(), "Failed to load settings, using defaults");
                return Err(e);
            }
        };

        self.changes.send_replace(SettingsChange {
            revision: 0,
            section: None,
            settings: Arc::new(settings.clone()),
        });
        Ok(Snapshot {
            settings,
            revision: 0,
            dirty,
        })
    }

    async fn persist(&self, settings: &Settings) -> Result<(), StorageError> {
        let value = settings.to_stored()?;
        self.storage.save(&value).await
    }

    fn commit<T>(
        &self,
        snapshot: &mut Snapshot,
        settings: Settings,
        section: Option<SectionKind>,
        value: T,
    ) -> Saved<T> {
        snapshot.revision += 1;
        snapshot.dirty = false;
        let committed = Arc::new(settings.clone());
        let previous = std::mem::replace(&mut snapshot.settings, settings);
        self.changes.send_replace(SettingsChange {
            revision: snapshot.revision,
            section,
            settings: Arc::clone(&committed),
        });
        Saved {
            revision: snapshot.revision,
            previous,
            settings: committed,
            value,
        }
    }
}

/// Log every committed change until the store is dropped.
pub async fn log_changes(mut changes: watch::Receiver<SettingsChange>) {
    while changes.changed().await.is_ok() {
        let change = changes.borrow_and_update().clone();
        match change.section {
            Some(section) => tracing::info!(revision = change.revision, %section, "Settings changed"),
            None => tracing::info!(revision = change.revision, "Settings record replaced"),
        }
    }
}
