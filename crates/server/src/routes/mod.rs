//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /               - Plaintext greeting
//! GET    /health         - Liveness check
//! GET    /health/ready   - Readiness check (store ping)
//!
//! # Users
//! POST   /users          - Register a Google user (idempotent per email)
//!
//! # Foods
//! GET    /foods          - List foods by price (?sort=asc|desc)
//! POST   /foods          - Create a food
//!                          (also served at /foods/)
//! GET    /foods/{id}     - Fetch one food
//! DELETE /foods/{id}     - Delete one food
//! ```

pub mod foods;
pub mod health;
pub mod home;
pub mod users;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRequest, Request},
    routing::{get, post},
};

use food_core::Record;

use crate::error::AppError;
use crate::state::AppState;

/// Create the food routes router.
pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(foods::index).post(foods::create))
        .route("/{id}", get(foods::show).delete(foods::destroy))
}

/// Create the complete application router (without middleware).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::greeting))
        .route("/health", get(health::live))
        .route("/health/ready", get(health::ready))
        .route("/users", post(users::register))
        // Trailing slash on the collection path is served like the bare path
        .route("/foods/", get(foods::index).post(foods::create))
        .nest("/foods", food_routes())
}

/// JSON object body whose rejections render as [`AppError::BadRequest`].
///
/// An empty or whitespace-only body reads as an empty object, so validation
/// still decides the response (a bodiless registration is forbidden, not
/// malformed). Keeps every error response on the API in the same
/// `{"message": ...}` shape, including malformed bodies.
#[derive(Debug)]
pub struct RecordBody(pub Record);

impl<S> FromRequest<S> for RecordBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Record::new()));
        }

        let Json(record) = Json::<Record>::from_bytes(&bytes)
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(record))
    }
}
