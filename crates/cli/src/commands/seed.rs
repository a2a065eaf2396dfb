//! Seed the `foods` collection from a YAML file.
//!
//! The file holds a list of food records:
//!
//! ```yaml
//! - title: Biryani
//!   description: Spiced rice with chicken
//!   price: 12
//! - title: Dal
//!   description: Yellow lentils
//!   price: 6
//! ```
//!
//! Entries without a `title` or `description` are reported and skipped;
//! the rest are inserted exactly as the HTTP API would insert them.

use std::path::Path;

use food_core::{NewFood, Record};
use food_server::db::{FoodStore, StoreError};
use tracing::{info, warn};

use super::CommandError;

/// Result of a seeding run.
#[derive(Debug, Default)]
pub struct SeedSummary {
    /// Foods removed before seeding (`--clear`)
    pub cleared: u64,
    /// Foods inserted
    pub inserted: usize,
    /// Rejected entries as (position in file, reason)
    pub skipped: Vec<(usize, String)>,
}

/// Seed foods from `file_path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, configuration is
/// missing, or a database operation fails.
pub async fn run(file_path: &Path, clear_existing: bool) -> Result<(), CommandError> {
    info!(path = %file_path.display(), "Loading foods from file");

    // Read and parse before connecting to the database
    let content = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|source| CommandError::Read {
            path: file_path.display().to_string(),
            source,
        })?;
    let entries = parse_foods(&content)?;
    info!(entries = entries.len(), "Parsed seed file");

    let store = super::connect().await?;
    let summary = seed_foods(&store, entries, clear_existing).await?;

    info!("Seeding complete!");
    if clear_existing {
        info!("  Foods cleared: {}", summary.cleared);
    }
    info!("  Foods inserted: {}", summary.inserted);
    if !summary.skipped.is_empty() {
        warn!("  Entries skipped: {}", summary.skipped.len());
        for (position, reason) in &summary.skipped {
            warn!("    - entry {position}: {reason}");
        }
    }

    Ok(())
}

/// Parse a YAML list of food records.
///
/// # Errors
///
/// Returns an error if the document is not a list of mappings.
pub fn parse_foods(content: &str) -> Result<Vec<Record>, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Validate and insert `entries`, optionally clearing existing foods first.
///
/// Invalid entries are collected in the summary rather than aborting the run.
/// Positions are 1-based.
///
/// # Errors
///
/// Returns the first store error; foods inserted before it remain stored.
pub async fn seed_foods(
    store: &dyn FoodStore,
    entries: Vec<Record>,
    clear_existing: bool,
) -> Result<SeedSummary, StoreError> {
    let mut summary = SeedSummary::default();

    if clear_existing {
        summary.cleared = store.clear_foods().await?;
    }

    for (position, entry) in entries.into_iter().enumerate().map(|(i, e)| (i + 1, e)) {
        match NewFood::from_record(entry) {
            Ok(food) => {
                store.insert_food(food).await?;
                summary.inserted += 1;
            }
            Err(e) => summary.skipped.push((position, e.to_string())),
        }
    }

    Ok(summary)
}
