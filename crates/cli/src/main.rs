//! Food CLI - Database management tools for the food API.
//!
//! # Usage
//!
//! ```bash
//! # Create the unique index on users.email
//! food-cli indexes
//!
//! # Check that the deployment answers
//! food-cli ping
//!
//! # Load foods from a YAML file, replacing existing ones
//! food-cli seed foods.yaml --clear
//! ```
//!
//! Connection settings are read from the same environment variables as the
//! server (`MONGODB_URI`, or `DB_USER`/`DB_PASS`, plus `DB_NAME`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "food-cli")]
#[command(author, version, about = "Food API CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create database indexes
    Indexes,
    /// Check database connectivity
    Ping,
    /// Seed foods from a YAML file
    Seed {
        /// Path to the YAML file
        file: PathBuf,

        /// Delete all existing foods first
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "food_cli=info,food_server=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Indexes => commands::indexes::run().await,
        Commands::Ping => commands::ping::run().await,
        Commands::Seed { file, clear } => commands::seed::run(&file, clear).await,
    }
}
