//! The fixed-shape settings sections.
//!
//! Every struct is `#[serde(default)]` so a record written before a field
//! existed still reads, picking up that field's default.

use serde::{Deserialize, Serialize};

use super::validate::{Validate, ValidationErrors};
use crate::types::{Currency, Email, HexColor, SidebarDensity, check_optional_url, non_blank};

pub const DEFAULT_BRAND_NAME: &str = "My Store";
pub const DEFAULT_TIMEZONE: &str = "Africa/Johannesburg";
pub const DEFAULT_PRIMARY: &str = "#6EC1FF";
pub const DEFAULT_ACCENT: &str = "#F5A524";

/// Store identity and contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    pub brand_name: String,
    pub support_email: Option<String>,
    pub currency: Currency,
    pub timezone: String,
    pub storefront_url: Option<String>,
    pub address: Option<String>,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            brand_name: DEFAULT_BRAND_NAME.to_owned(),
            support_email: None,
            currency: Currency::Zar,
            timezone: DEFAULT_TIMEZONE.to_owned(),
            storefront_url: None,
            address: None,
        }
    }
}

impl Validate for GeneralSettings {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.brand_name.trim().is_empty() {
            errors.push("general.brandName", "brand name is required");
        }
        if self.timezone.trim().is_empty() {
            errors.push("general.timezone", "timezone is required");
        }
        if let Some(email) = non_blank(self.support_email.as_deref()) {
            errors.check("general.supportEmail", Email::parse(email));
        }
        errors.check(
            "general.storefrontUrl",
            check_optional_url(self.storefront_url.as_deref()),
        );
        errors.into_result()
    }
}

/// Console look and feel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandingSettings {
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub primary: String,
    pub accent: String,
    pub dark: bool,
    pub sidebar_density: SidebarDensity,
}

impl Default for BrandingSettings {
    fn default() -> Self {
        Self {
            logo_url: None,
            favicon_url: None,
            primary: DEFAULT_PRIMARY.to_owned(),
            accent: DEFAULT_ACCENT.to_owned(),
            dark: false,
            sidebar_density: SidebarDensity::Cozy,
        }
    }
}

impl Validate for BrandingSettings {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("branding.logoUrl", check_optional_url(self.logo_url.as_deref()));
        errors.check(
            "branding.faviconUrl",
            check_optional_url(self.favicon_url.as_deref()),
        );
        errors.check("branding.primary", HexColor::parse(&self.primary));
        errors.check("branding.accent", HexColor::parse(&self.accent));
        errors.into_result()
    }
}

/// PayFast merchant credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayfastCredentials {
    pub merchant_id: Option<String>,
    pub passphrase: Option<String>,
}

impl std::fmt::Debug for PayfastCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayfastCredentials")
            .field("merchant_id", &self.merchant_id)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// ShipLogic courier API credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShiplogicCredentials {
    pub api_key: Option<String>,
    pub account_code: Option<String>,
}

impl std::fmt::Debug for ShiplogicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShiplogicCredentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("account_code", &self.account_code)
            .finish()
    }
}

/// Outbound webhooks and third-party credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationSettings {
    pub specials_webhook: Option<String>,
    pub shiplogic_webhook: Option<String>,
    pub payfast: PayfastCredentials,
    pub shiplogic: ShiplogicCredentials,
}

impl IntegrationSettings {
    /// Placeholder shown instead of a stored secret.
    pub const MASK: &'static str = "********";

    /// Copy with stored secrets replaced by [`IntegrationSettings::MASK`].
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mask = |secret: &Option<String>| secret.as_ref().map(|_| Self::MASK.to_owned());
        Self {
            payfast: PayfastCredentials {
                merchant_id: self.payfast.merchant_id.clone(),
                passphrase: mask(&self.payfast.passphrase),
            },
            shiplogic: ShiplogicCredentials {
                api_key: mask(&self.shiplogic.api_key),
                account_code: self.shiplogic.account_code.clone(),
            },
            ..self.clone()
        }
    }
}

impl Validate for IntegrationSettings {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            "integrations.specialsWebhook",
            check_optional_url(self.specials_webhook.as_deref()),
        );
        errors.check(
            "integrations.shiplogicWebhook",
            check_optional_url(self.shiplogic_webhook.as_deref()),
        );
        errors.into_result()
    }
}

/// Which events notify the store owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub new_order: bool,
    pub low_stock: bool,
    pub review: bool,
    pub payout: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            new_order: true,
            low_stock: true,
            review: true,
            payout: false,
        }
    }
}

impl Validate for NotificationSettings {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}
