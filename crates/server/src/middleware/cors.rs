//! Cross-origin policy.
//!
//! The API is called directly from browser clients served on other origins,
//! so every origin is allowed. Credentials are not, which keeps the wildcard
//! origin legal.

use std::time::Duration;

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// How long browsers may cache a preflight response.
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Build the CORS layer applied to every route.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any)
        .max_age(PREFLIGHT_MAX_AGE)
}
