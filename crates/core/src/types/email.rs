//! Email address type used as the user uniqueness key.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when reading an [`Email`] from a request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The field is absent, null, or an empty string.
    #[error("email is required")]
    Missing,
    /// The field is present but not a string.
    #[error("email must be a string")]
    NotAString,
}

/// An email address as supplied by the identity provider.
///
/// Only presence is checked. The value is kept byte-for-byte so that lookups
/// match exactly what was stored.
///
/// ## Examples
///
/// ```
/// use food_core::Email;
///
/// assert!(Email::parse("user@example.com").is_ok());
/// assert!(Email::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::Missing`] if the input is empty.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Missing);
        }
        Ok(Self(s.to_owned()))
    }

    /// Read an `Email` from an optional JSON field.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::Missing`] for an absent, null, or empty value and
    /// [`EmailError::NotAString`] for any other non-string value.
    pub fn from_field(value: Option<&serde_json::Value>) -> Result<Self, EmailError> {
        match value {
            None | Some(serde_json::Value::Null) => Err(EmailError::Missing),
            Some(serde_json::Value::String(s)) => Self::parse(s),
            Some(_) => Err(EmailError::NotAString),
        }
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
