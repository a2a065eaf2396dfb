//! Registration requests for Google-authenticated users.

use super::{Email, EmailError, ID_FIELD, Record};

/// The only identity provider accepted for registration.
pub const GOOGLE_PROVIDER: &str = "google";

/// Reasons a registration request is rejected before touching storage.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// `provider` is not exactly `"google"`.
    #[error("Only Google users can be saved")]
    UnsupportedProvider,
    /// `email` is missing, empty, or not a string.
    #[error("Email is required")]
    InvalidEmail(#[source] EmailError),
}

/// A validated registration request.
///
/// The full record is kept so that every caller-supplied field is persisted
/// verbatim, except `_id`: identifiers are always assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    email: Email,
    record: Record,
}

impl NewUser {
    /// Validate a registration record.
    ///
    /// The provider is checked before the email, so a non-Google request is
    /// always rejected as [`RegistrationError::UnsupportedProvider`].
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] describing the first failed check.
    pub fn from_record(mut record: Record) -> Result<Self, RegistrationError> {
        match record.get("provider") {
            Some(serde_json::Value::String(p)) if p == GOOGLE_PROVIDER => {}
            _ => return Err(RegistrationError::UnsupportedProvider),
        }

        let email =
            Email::from_field(record.get("email")).map_err(RegistrationError::InvalidEmail)?;

        record.shift_remove(ID_FIELD);
        Ok(Self { email, record })
    }

    /// The uniqueness key of this user.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub const fn record(&self) -> &Record {
        &self.record
    }

    #[must_use]
    pub fn into_record(self) -> Record {
        self.record
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_google_user_accepted() {
        let user = NewUser::from_record(record(json!({
            "provider": "google",
            "email": "cook@example.com",
            "name": "Cook",
            "photo": "https://example.com/p.png"
        })))
        .unwrap();

        assert_eq!(user.email().as_str(), "cook@example.com");
        assert_eq!(user.record().get("name"), Some(&json!("Cook")));
        assert_eq!(user.into_record().len(), 4);
    }

    #[test]
    fn test_other_provider_rejected() {
        for provider in [json!("github"), json!("Google"), json!(null), json!(1)] {
            let result = NewUser::from_record(record(json!({
                "provider": provider,
                "email": "cook@example.com"
            })));
            assert_eq!(result, Err(RegistrationError::UnsupportedProvider));
        }
    }

    #[test]
    fn test_missing_provider_rejected_before_email() {
        let result = NewUser::from_record(record(json!({})));
        assert_eq!(result, Err(RegistrationError::UnsupportedProvider));
    }

    #[test]
    fn test_missing_email_rejected() {
        let result = NewUser::from_record(record(json!({"provider": "google", "email": ""})));
        assert_eq!(
            result,
            Err(RegistrationError::InvalidEmail(EmailError::Missing))
        );

        let result = NewUser::from_record(record(json!({"provider": "google"})));
        assert!(matches!(result, Err(RegistrationError::InvalidEmail(_))));
    }

    #[test]
    fn test_caller_id_dropped() {
        let user = NewUser::from_record(record(json!({
            "_id": "attacker-chosen",
            "provider": "google",
            "email": "cook@example.com"
        })))
        .unwrap();
        assert!(!user.record().contains_key("_id"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RegistrationError::UnsupportedProvider.to_string(),
            "Only Google users can be saved"
        );
        assert_eq!(
            RegistrationError::InvalidEmail(EmailError::Missing).to_string(),
            "Email is required"
        );
    }
}
