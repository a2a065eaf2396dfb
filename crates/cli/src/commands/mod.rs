//! Subcommand implementations.

pub mod indexes;
pub mod ping;
pub mod seed;

use food_server::config::{ConfigError, DatabaseConfig};
use food_server::db::{MongoStore, StoreError};

/// Errors surfaced by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Connect to the database named by the environment.
async fn connect() -> Result<MongoStore, CommandError> {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let config = DatabaseConfig::from_env()?;
    tracing::info!(database = %config.name, "Connecting to MongoDB...");
    Ok(MongoStore::connect(&config).await?)
}
