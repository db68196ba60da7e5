//! Settings inspection and editing commands.
//!
//! # Usage
//!
//! ```bash
//! bo-cli settings show [--section <name>]
//! bo-cli settings set <section> --file <path>
//! bo-cli settings reset
//! ```

use std::path::Path;

use backoffice_admin::{SettingsStore, StoreError};
use backoffice_core::{SectionKind, Settings};
use serde_json::Value as JsonValue;

use super::CliError;

/// Current settings as JSON, optionally narrowed to one section.
pub async fn show(store: &SettingsStore, section: Option<&str>) -> Result<JsonValue, CliError> {
    let settings = store.get().await;
    match section {
        Some(name) => {
            let kind: SectionKind = name
                .parse()
                .map_err(|_| StoreError::UnknownSection(name.to_owned()))?;
            Ok(settings.section_json(kind))
        }
        None => Ok(serde_json::to_value(&settings)?),
    }
}

/// Replace one section with the JSON held in `path`.
pub async fn set_from_file(store: &SettingsStore, section: &str, path: &Path) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let value: JsonValue = serde_json::from_str(&raw)?;

    store.update_json(section, value).await?;
    tracing::info!("Section '{}' replaced from {}", section, path.display());
    Ok(())
}

/// Overwrite every section with its default.
pub async fn reset(store: &SettingsStore) -> Result<(), CliError> {
    store.set(Settings::default()).await?;
    tracing::info!("Settings reset to defaults");
    Ok(())
}
