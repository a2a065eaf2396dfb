//! Conversion between client JSON records and stored BSON documents.
//!
//! Outbound records render `ObjectId`s as bare hex strings, the form clients
//! use in `/foods/{id}` paths. Every other BSON value uses relaxed extended
//! JSON, so numbers stay numbers and dates become `{"$date": ...}`.

use mongodb::bson::{self, Bson, Document};
use serde_json::Value;

use food_core::Record;

use super::StoreError;

/// Encode a client record as a BSON document.
///
/// # Errors
///
/// Returns [`StoreError::Encoding`] if a value has no BSON representation,
/// such as an unsigned integer above `i64::MAX`.
pub fn record_to_document(record: &Record) -> Result<Document, StoreError> {
    bson::to_document(record).map_err(|e| StoreError::Encoding(e.to_string()))
}

/// Render a stored document as a client record.
#[must_use]
pub fn document_to_record(document: Document) -> Record {
    document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect()
}

/// Render a single BSON value as client JSON.
#[must_use]
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(document) => Value::Object(document_to_record(document)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
