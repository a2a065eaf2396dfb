//! Connectivity check.

use food_server::db::StoreHealth;

use super::CommandError;

/// Ping the configured deployment.
///
/// # Errors
///
/// Returns an error if configuration is missing or the deployment does not
/// answer.
pub async fn run() -> Result<(), CommandError> {
    let store = super::connect().await?;
    store.ping().await?;
    tracing::info!("Pinged your deployment. You successfully connected to MongoDB!");
    Ok(())
}
