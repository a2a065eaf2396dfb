//! Food creation requests.

use super::{ID_FIELD, Record, has_text};

/// Fields every food record must carry as non-empty strings.
pub const REQUIRED_FOOD_FIELDS: [&str; 2] = ["title", "description"];

/// Reasons a food creation request is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FoodValidationError {
    /// A required text field is missing or empty.
    #[error("Title and Description are required")]
    MissingField(&'static str),
}

/// A validated food creation request.
///
/// Fields beyond `title` and `description`, such as `price`, pass through
/// unchanged. A caller-supplied `_id` is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFood {
    record: Record,
}

impl NewFood {
    /// Validate a food record.
    ///
    /// # Errors
    ///
    /// Returns [`FoodValidationError::MissingField`] naming the first required
    /// field that is absent or empty.
    pub fn from_record(mut record: Record) -> Result<Self, FoodValidationError> {
        if let Some(field) = REQUIRED_FOOD_FIELDS
            .into_iter()
            .find(|field| !has_text(&record, field))
        {
            return Err(FoodValidationError::MissingField(field));
        }
        record.shift_remove(ID_FIELD);
        Ok(Self { record })
    }

    #[must_use]
    pub const fn record(&self) -> &Record {
        &self.record
    }

    #[must_use]
    pub fn into_record(self) -> Record {
        self.record
    }

    /// The record's title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.record
            .get("title")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
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
    fn test_valid_food_keeps_extra_fields() {
        let food = NewFood::from_record(record(json!({
            "title": "Pad Thai",
            "description": "Rice noodles",
            "price": 12.5,
            "tags": ["noodles"]
        })))
        .unwrap();

        assert_eq!(food.title(), "Pad Thai");
        assert_eq!(food.record().get("price"), Some(&json!(12.5)));
        assert_eq!(food.into_record().len(), 4);
    }

    #[test]
    fn test_missing_title() {
        let result = NewFood::from_record(record(json!({"description": "Rice noodles"})));
        assert_eq!(result, Err(FoodValidationError::MissingField("title")));
    }

    #[test]
    fn test_empty_description() {
        let result = NewFood::from_record(record(json!({"title": "Pad Thai", "description": ""})));
        assert_eq!(result, Err(FoodValidationError::MissingField("description")));
    }

    #[test]
    fn test_caller_id_dropped() {
        let food = NewFood::from_record(record(json!({
            "_id": 7,
            "title": "Pho",
            "description": "Soup"
        })))
        .unwrap();
        assert!(!food.record().contains_key("_id"));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            FoodValidationError::MissingField("title").to_string(),
            "Title and Description are required"
        );
    }
}
