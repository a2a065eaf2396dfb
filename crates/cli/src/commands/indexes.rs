//! Index management.
//!
//! ```bash
//! food-cli indexes
//! ```
//!
//! Creates the unique index on `users.email`. Safe to run repeatedly; it
//! fails if existing data already holds duplicate emails.

use super::CommandError;

/// Ensure all indexes exist.
///
/// # Errors
///
/// Returns an error if configuration is missing or index creation fails.
pub async fn run() -> Result<(), CommandError> {
    let store = super::connect().await?;
    store.ensure_indexes().await?;
    tracing::info!("Indexes are in place");
    Ok(())
}
