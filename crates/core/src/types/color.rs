//! Hex colour type used by the branding section.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`HexColor`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HexColorError {
    /// The value does not start with `#`.
    #[error("colour must start with #")]
    MissingHash,
    /// The value does not have exactly six digits after `#`.
    #[error("colour must have exactly 6 hex digits (got {0})")]
    WrongLength(usize),
    /// A character after `#` is not a hex digit.
    #[error("colour contains a non-hex digit '{0}'")]
    InvalidDigit(char),
}

/// A `#RRGGBB` colour.
///
/// Digits are accepted in either case and stored upper-case.
///
/// ```
/// use backoffice_core::HexColor;
///
/// assert_eq!(HexColor::parse("#6ec1ff").unwrap().as_str(), "#6EC1FF");
/// assert!(HexColor::parse("6EC1FF").is_err());
/// assert!(HexColor::parse("#6EC1F").is_err());
/// assert!(HexColor::parse("#6EC1FG").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Parse a colour from a form value.
    ///
    /// # Errors
    ///
    /// Returns a [`HexColorError`] if the value is not `#` followed by six hex digits.
    pub fn parse(s: &str) -> Result<Self, HexColorError> {
        let digits = s.strip_prefix('#').ok_or(HexColorError::MissingHash)?;

        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(HexColorError::InvalidDigit(bad));
        }

        if digits.len() != 6 {
            return Err(HexColorError::WrongLength(digits.len()));
        }

        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    /// Returns the normalized `#RRGGBB` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
