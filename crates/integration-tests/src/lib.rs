//! End-to-end tests for the food API.
//!
//! These tests talk to a running server over HTTP and are ignored by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server against a scratch database
//! DB_NAME=food_db_test cargo run -p food-server
//!
//! # Run the ignored tests
//! cargo test -p food-integration-tests -- --ignored
//! ```
//!
//! Set `API_BASE_URL` to target a server other than `http://localhost:3000`.

use reqwest::Client;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Build an HTTP client for the tests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// An email address no other test run has used.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@example.com", uuid::Uuid::new_v4())
}
