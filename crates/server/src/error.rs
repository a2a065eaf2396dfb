//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding. All route handlers return `Result<T, AppError>`.
//!
//! Every error response is JSON with a `message` field. `Forbidden` also
//! carries `"success": false`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use food_core::{FoodValidationError, RecordIdError, RegistrationError};

use crate::db::StoreError;

/// Application-level error type for the food API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required input is missing.
    #[error("{0}")]
    BadRequest(String),

    /// The request is well-formed but not allowed.
    #[error("{0}")]
    Forbidden(String),

    /// No record matches the identifier.
    #[error("{0}")]
    NotFound(String),

    /// The path identifier cannot name any record.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] RecordIdError),

    /// Persistence failed; `context` is the message shown to the client.
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wrap a store failure with the message clients should see.
    #[must_use]
    pub const fn store(context: &'static str, source: StoreError) -> Self {
        Self::Store { context, source }
    }

    /// HTTP status for this error.
    ///
    /// Malformed identifiers share 500 with storage failures so existing
    /// clients keep seeing the same status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidIdentifier(_) | Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RegistrationError> for AppError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::UnsupportedProvider => Self::Forbidden(err.to_string()),
            RegistrationError::InvalidEmail(_) => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<FoodValidationError> for AppError {
    fn from(err: FoodValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if let Self::Store { .. } = self {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let status = self.status();

        // Don't expose driver details to clients
        let body = match &self {
            Self::Forbidden(message) => json!({ "success": false, "message": message }),
            Self::Store { context, .. } => json!({ "message": context }),
            Self::InvalidIdentifier(err) => json!({ "message": err.to_string() }),
            Self::BadRequest(message) | Self::NotFound(message) => json!({ "message": message }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
