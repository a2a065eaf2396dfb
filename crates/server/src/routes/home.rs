//! Root greeting.

/// Plaintext greeting served at `/`.
pub async fn greeting() -> &'static str {
    "Hello World!"
}
