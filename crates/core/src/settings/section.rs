//! Section names and typed section payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::sections::{BrandingSettings, GeneralSettings, IntegrationSettings, NotificationSettings};
use super::users::UserList;
use super::validate::{Validate, ValidationErrors};

/// Errors from turning untyped input into a [`SectionUpdate`].
#[derive(thiserror::Error, Debug)]
pub enum SectionError {
    #[error("unknown settings section: {0}")]
    Unknown(String),
    #[error("malformed {section} section: {source}")]
    Malformed {
        section: SectionKind,
        #[source]
        source: serde_json::Error,
    },
}

/// The five sections of the settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    General,
    Branding,
    Integrations,
    Notifications,
    Users,
}

impl SectionKind {
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Branding,
        Self::Integrations,
        Self::Notifications,
        Self::Users,
    ];

    /// Key of this section in the stored record.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Branding => "branding",
            Self::Integrations => "integrations",
            Self::Notifications => "notifications",
            Self::Users => "users",
        }
    }

    /// Heading used in toasts and on the settings page.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Branding => "Branding",
            Self::Integrations => "Integrations",
            Self::Notifications => "Notifications",
            Self::Users => "Users",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for SectionKind {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| SectionError::Unknown(s.to_owned()))
    }
}

/// A whole-section replacement value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionUpdate {
    General(GeneralSettings),
    Branding(BrandingSettings),
    Integrations(IntegrationSettings),
    Notifications(NotificationSettings),
    Users(UserList),
}

impl SectionUpdate {
    #[must_use]
    pub const fn kind(&self) -> SectionKind {
        match self {
            Self::General(_) => SectionKind::General,
            Self::Branding(_) => SectionKind::Branding,
            Self::Integrations(_) => SectionKind::Integrations,
            Self::Notifications(_) => SectionKind::Notifications,
            Self::Users(_) => SectionKind::Users,
        }
    }

    /// Build an update from a section name and a JSON payload.
    ///
    /// Fields missing from the payload take their defaults, matching how a
    /// stored record is read.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::Unknown`] for a name outside the five sections
    /// and [`SectionError::Malformed`] if the payload has the wrong shape.
    pub fn from_json(name: &str, value: JsonValue) -> Result<Self, SectionError> {
        let kind: SectionKind = name.parse()?;
        Self::from_kind_json(kind, value)
    }

    /// Like [`SectionUpdate::from_json`] for an already-resolved kind.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::Malformed`] if the payload has the wrong shape.
    pub fn from_kind_json(kind: SectionKind, value: JsonValue) -> Result<Self, SectionError> {
        let malformed = |source| SectionError::Malformed {
            section: kind,
            source,
        };
        let update = match kind {
            SectionKind::General => Self::General(serde_json::from_value(value).map_err(malformed)?),
            SectionKind::Branding => {
                Self::Branding(serde_json::from_value(value).map_err(malformed)?)
            }
            SectionKind::Integrations => {
                Self::Integrations(serde_json::from_value(value).map_err(malformed)?)
            }
            SectionKind::Notifications => {
                Self::Notifications(serde_json::from_value(value).map_err(malformed)?)
            }
            SectionKind::Users => Self::Users(serde_json::from_value(value).map_err(malformed)?),
        };
        Ok(update)
    }

    /// Serializes the payload in the stored JSON shape.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let value = match self {
            Self::General(v) => serde_json::to_value(v),
            Self::Branding(v) => serde_json::to_value(v),
            Self::Integrations(v) => serde_json::to_value(v),
            Self::Notifications(v) => serde_json::to_value(v),
            Self::Users(v) => serde_json::to_value(v),
        };
        value.unwrap_or(JsonValue::Null)
    }
}

impl Validate for SectionUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::General(v) => v.validate(),
            Self::Branding(v) => v.validate(),
            Self::Integrations(v) => v.validate(),
            Self::Notifications(v) => v.validate(),
            Self::Users(v) => v.validate(),
        }
    }
}
