//! The aggregate store settings record.
//!
//! # Layout
//!
//! ```text
//! {
//!   general:       { brandName, supportEmail, currency, timezone, storefrontUrl, address },
//!   branding:      { logoUrl, faviconUrl, primary, accent, dark, sidebarDensity },
//!   integrations:  { specialsWebhook, shiplogicWebhook, payfast: {..}, shiplogic: {..} },
//!   notifications: { newOrder, lowStock, review, payout },
//!   users:         [ { email, role, status }, .. ]
//! }
//! ```
//!
//! Each section is replaced whole; nothing is deep-merged.

pub mod section;
pub mod sections;
pub mod users;
pub mod validate;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub use section::{SectionError, SectionKind, SectionUpdate};
pub use sections::{
    BrandingSettings, GeneralSettings, IntegrationSettings, NotificationSettings,
    PayfastCredentials, ShiplogicCredentials,
};
pub use users::{UserEntry, UserList, UserListError};
pub use validate::{FieldError, Validate, ValidationErrors};

/// All store settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub branding: BrandingSettings,
    pub integrations: IntegrationSettings,
    pub notifications: NotificationSettings,
    pub users: UserList,
}

/// Result of reading a persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSettings {
    pub settings: Settings,
    /// Sections that could not be read and were reset to defaults.
    pub recovered: Vec<SectionKind>,
}

impl Settings {
    /// Read a persisted record, tolerating old or damaged data.
    ///
    /// Missing sections and fields take their defaults. A section whose
    /// stored value has the wrong shape is reset to defaults on its own and
    /// reported in [`StoredSettings::recovered`]. A value that is not an
    /// object at all yields full defaults with every section reported.
    #[must_use]
    pub fn from_stored(value: JsonValue) -> StoredSettings {
        let JsonValue::Object(mut record) = value else {
            return StoredSettings {
                settings: Self::default(),
                recovered: SectionKind::ALL.to_vec(),
            };
        };

        let mut settings = Self::default();
        let mut recovered = Vec::new();
        for kind in SectionKind::ALL {
            let Some(raw) = record.remove(kind.key()) else {
                continue;
            };
            match SectionUpdate::from_kind_json(kind, raw) {
                Ok(update) => settings.apply(update),
                Err(_) => recovered.push(kind),
            }
        }

        StoredSettings {
            settings,
            recovered,
        }
    }

    /// Replace one section with `update`.
    pub fn apply(&mut self, update: SectionUpdate) {
        match update {
            SectionUpdate::General(v) => self.general = v,
            SectionUpdate::Branding(v) => self.branding = v,
            SectionUpdate::Integrations(v) => self.integrations = v,
            SectionUpdate::Notifications(v) => self.notifications = v,
            SectionUpdate::Users(v) => self.users = v,
        }
    }

    /// Returns a copy of one section.
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> SectionUpdate {
        match kind {
            SectionKind::General => SectionUpdate::General(self.general.clone()),
            SectionKind::Branding => SectionUpdate::Branding(self.branding.clone()),
            SectionKind::Integrations => SectionUpdate::Integrations(self.integrations.clone()),
            SectionKind::Notifications => SectionUpdate::Notifications(self.notifications),
            SectionKind::Users => SectionUpdate::Users(self.users.clone()),
        }
    }

    /// Returns one section in its stored JSON shape.
    #[must_use]
    pub fn section_json(&self, kind: SectionKind) -> JsonValue {
        self.section(kind).to_json()
    }

    /// Serializes the whole record in its stored JSON shape.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_stored(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{Currency, Role, SidebarDensity};

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.general.brand_name, "My Store");
        assert_eq!(settings.general.currency, Currency::Zar);
        assert_eq!(settings.general.timezone, "Africa/Johannesburg");
        assert_eq!(settings.branding.primary, "#6EC1FF");
        assert_eq!(settings.branding.sidebar_density, SidebarDensity::Cozy);
        assert!(settings.notifications.low_stock);
        assert!(!settings.notifications.payout);
        assert!(settings.users.is_empty());
    }

    #[test]
    fn test_stored_shape_keys() {
        let value = Settings::default().to_stored().unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["branding", "general", "integrations", "notifications", "users"]
        );
        assert_eq!(value["general"]["currency"], "ZAR");
        assert!(value["integrations"]["payfast"].is_object());
    }

    #[test]
    fn test_apply_replaces_whole_section() {
        let mut settings = Settings::default();
        settings.branding.logo_url = Some("https://example.com/logo.png".to_owned());

        let replacement = BrandingSettings {
            primary: "#000000".to_owned(),
            ..BrandingSettings::default()
        };
        settings.apply(SectionUpdate::Branding(replacement.clone()));

        assert_eq!(settings.branding, replacement);
        assert_eq!(settings.branding.logo_url, None);
    }

    #[test]
    fn test_section_reads_back() {
        let mut settings = Settings::default();
        settings.users.invite("owner@example.com", Role::Owner).unwrap();
        let SectionUpdate::Users(users) = settings.section(SectionKind::Users) else {
            panic!("wrong variant");
        };
        assert_eq!(users.len(), 1);
        assert_eq!(settings.section_json(SectionKind::Users)[0]["role"], "owner");
    }

    #[test]
    fn test_from_stored_fills_missing_sections_and_fields() {
        let stored = Settings::from_stored(json!({
            "general": { "brandName": "Fynbos Goods" },
            "notifications": { "lowStock": false }
        }));
        assert!(stored.recovered.is_empty());
        let settings = stored.settings;
        assert_eq!(settings.general.brand_name, "Fynbos Goods");
        assert_eq!(settings.general.timezone, "Africa/Johannesburg");
        assert!(!settings.notifications.low_stock);
        assert!(settings.notifications.new_order);
        assert_eq!(settings.branding, BrandingSettings::default());
    }

    #[test]
    fn test_from_stored_recovers_corrupt_section_only() {
        let stored = Settings::from_stored(json!({
            "general": { "brandName": "Fynbos Goods" },
            "branding": "garbage",
            "users": [{ "email": "a@example.com" }]
        }));
        assert_eq!(
            stored.recovered,
            vec![SectionKind::Branding, SectionKind::Users]
        );
        assert_eq!(stored.settings.general.brand_name, "Fynbos Goods");
        assert_eq!(stored.settings.branding, BrandingSettings::default());
        assert!(stored.settings.users.is_empty());
    }

    #[test]
    fn test_from_stored_non_object() {
        let stored = Settings::from_stored(json!([1, 2, 3]));
        assert_eq!(stored.settings, Settings::default());
        assert_eq!(stored.recovered.len(), 5);
    }

    #[test]
    fn test_from_stored_ignores_unknown_keys() {
        let stored = Settings::from_stored(json!({ "legacy": true }));
        assert!(stored.recovered.is_empty());
        assert_eq!(stored.settings, Settings::default());
    }
}
