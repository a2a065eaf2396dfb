//! Store-generated record identifiers.
//!
//! Records are keyed by a 12-byte `ObjectId` assigned by the document store.
//! On the wire the identifier travels as its 24-character lowercase hex form,
//! which is what [`RecordId`] holds.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`RecordId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordIdError {
    /// The input has the wrong number of characters.
    #[error(
        "input must be a {expected} character hex string, got {actual} characters"
    )]
    InvalidLength {
        /// Required number of hex characters.
        expected: usize,
        /// Number of characters supplied.
        actual: usize,
    },
    /// The input contains a non-hex character.
    #[error("invalid hex character {found:?} at position {position}")]
    InvalidCharacter {
        /// The offending character.
        found: char,
        /// Byte offset of the offending character.
        position: usize,
    },
}

/// Identifier of a stored record.
///
/// ## Examples
///
/// ```
/// use food_core::RecordId;
///
/// let id = RecordId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
/// assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
///
/// assert!(RecordId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Number of hex characters in an identifier.
    pub const HEX_LENGTH: usize = 24;

    /// Parse a `RecordId` from its hex form.
    ///
    /// Uppercase hex digits are accepted and normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 24 hex characters.
    pub fn parse(s: &str) -> Result<Self, RecordIdError> {
        let actual = s.chars().count();
        if actual != Self::HEX_LENGTH {
            return Err(RecordIdError::InvalidLength {
                expected: Self::HEX_LENGTH,
                actual,
            });
        }

        if let Some((position, found)) = s.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(RecordIdError::InvalidCharacter { found, position });
        }

        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Returns the identifier as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `RecordId` and returns its hex string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let id = RecordId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_parse_normalizes_case() {
        let id = RecordId::parse("65A1F0C2E4B0A1B2C3D4E5F6").unwrap();
        assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(
            RecordId::parse("abc"),
            Err(RecordIdError::InvalidLength {
                expected: 24,
                actual: 3
            })
        );
        assert!(RecordId::parse("").is_err());
    }

    #[test]
    fn test_parse_non_hex() {
        assert_eq!(
            RecordId::parse("65a1f0c2e4b0a1b2c3d4e5fz"),
            Err(RecordIdError::InvalidCharacter {
                found: 'z',
                position: 23
            })
        );
    }

    #[test]
    fn test_parse_multibyte_input() {
        // 24 chars but not ASCII
        let input = "é".repeat(24);
        assert!(matches!(
            RecordId::parse(&input),
            Err(RecordIdError::InvalidCharacter { found: 'é', .. })
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let id = RecordId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"65a1f0c2e4b0a1b2c3d4e5f6\"");

        let bad: Result<RecordId, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
