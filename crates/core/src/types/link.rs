//! URL checks for optional link fields.
//!
//! Settings store URLs as plain strings so that a blank form field can round
//! trip. These helpers decide whether such a field is acceptable.

use url::Url;

/// Errors that can occur when checking a URL field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// The value could not be parsed as an absolute URL.
    #[error("'{value}' is not a valid URL: {reason}")]
    Invalid {
        /// The rejected input.
        value: String,
        /// Parser message.
        reason: String,
    },
}

/// Parse a URL that is required to be present.
///
/// # Errors
///
/// Returns [`UrlError::Invalid`] if the value is not an absolute URL.
pub fn parse_url(value: &str) -> Result<Url, UrlError> {
    Url::parse(value.trim()).map_err(|e| UrlError::Invalid {
        value: value.to_owned(),
        reason: e.to_string(),
    })
}

/// Check an optional URL field.
///
/// `None`, the empty string and whitespace-only strings are accepted.
///
/// ```
/// use backoffice_core::check_optional_url;
///
/// assert!(check_optional_url(Some("")).is_ok());
/// assert!(check_optional_url(Some("https://example.com/x.png")).is_ok());
/// assert!(check_optional_url(Some("not-a-url")).is_err());
/// ```
///
/// # Errors
///
/// Returns [`UrlError::Invalid`] if a non-blank value is not an absolute URL.
pub fn check_optional_url(value: Option<&str>) -> Result<(), UrlError> {
    match value.map(str::trim) {
        None | Some("") => Ok(()),
        Some(v) => parse_url(v).map(|_| ()),
    }
}

/// Returns the trimmed value if it is present and non-blank.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
