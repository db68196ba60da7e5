//! Field-level validation results.

use core::fmt;

use serde::Serialize;

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field path in the stored JSON shape, e.g. `branding.primary`.
    pub field: String,
    /// Message suitable for a toast.
    pub message: String,
}

/// All field errors found in one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Creates an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Records an error for `field`.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Records `result`'s error, if any, against `field`.
    pub fn check<E: fmt::Display>(&mut self, field: &str, result: Result<impl Sized, E>) {
        if let Err(e) = result {
            self.push(field, e.to_string());
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if `field` has at least one error.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Text for the error toast: the first failing field.
    #[must_use]
    pub fn first_message(&self) -> String {
        self.0.first().map_or_else(
            || "Invalid settings".to_owned(),
            |e| format!("{}: {}", e.field, e.message),
        )
    }

    /// Converts the collected errors into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns `self` if any error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

/// A settings section that can check its own fields.
pub trait Validate {
    /// Checks every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the collected [`ValidationErrors`] if any field is invalid.
    fn validate(&self) -> Result<(), ValidationErrors>;
}
