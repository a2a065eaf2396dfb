//! Schemaless records and insert results.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// A semi-structured record as exchanged with clients.
///
/// Field order is preserved as received.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Field holding a stored record's identifier.
pub const ID_FIELD: &str = "_id";

/// Outcome of a single-record insert.
///
/// Serializes as `{"acknowledged": true, "insertedId": "<hex>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    /// Whether the store acknowledged the write.
    pub acknowledged: bool,
    /// Identifier assigned to the new record.
    pub inserted_id: RecordId,
}

impl InsertOutcome {
    /// An acknowledged insert of `inserted_id`.
    #[must_use]
    pub const fn acknowledged(inserted_id: RecordId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Returns `true` if `field` holds a non-empty string.
#[must_use]
pub fn has_text(record: &Record, field: &str) -> bool {
    matches!(record.get(field), Some(serde_json::Value::String(s)) if !s.is_empty())
}
