//! Persistence for the `users` and `foods` collections.
//!
//! # Database: `food_db`
//!
//! ## Collections
//!
//! - `users` - Google-registered users, unique on `email`
//! - `foods` - Food items, sorted by `price` when listed
//!
//! Handlers never touch the driver directly. They go through the
//! [`UserStore`], [`FoodStore`], and [`StoreHealth`] ports, which the
//! application state holds as shared trait objects. [`MongoStore`] serves
//! production; [`MemoryStore`] backs tests and local experiments.
//!
//! # Indexes
//!
//! The unique `email` index is created at server startup and by:
//! ```bash
//! cargo run -p food-cli -- indexes
//! ```

mod convert;
mod memory;
mod mongo;

use async_trait::async_trait;
use thiserror::Error;

use food_core::{Email, InsertOutcome, NewFood, NewUser, Record, RecordId, SortOrder};

pub use convert::{bson_to_json, document_to_record, record_to_document};
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Errors surfaced by store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Driver or server error.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A unique index rejected the write.
    #[error("duplicate key: {0}")]
    Duplicate(String),

    /// A record could not be converted to or from its stored form.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The store cannot serve requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Access to the `users` collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find the user stored under exactly this email.
    async fn find_user_by_email(&self, email: &Email) -> Result<Option<Record>, StoreError>;

    /// Insert a validated user.
    ///
    /// Returns [`StoreError::Duplicate`] if a user with the same email
    /// already exists.
    async fn insert_user(&self, user: NewUser) -> Result<InsertOutcome, StoreError>;
}

/// Access to the `foods` collection.
#[async_trait]
pub trait FoodStore: Send + Sync {
    /// Every stored food, ordered by `price`.
    async fn list_foods(&self, order: SortOrder) -> Result<Vec<Record>, StoreError>;

    /// Insert a validated food.
    async fn insert_food(&self, food: NewFood) -> Result<InsertOutcome, StoreError>;

    async fn find_food(&self, id: &RecordId) -> Result<Option<Record>, StoreError>;

    /// Delete one food, returning the number of records removed (0 or 1).
    async fn delete_food(&self, id: &RecordId) -> Result<u64, StoreError>;

    /// Delete every food, returning the number of records removed.
    async fn clear_foods(&self) -> Result<u64, StoreError>;
}

/// Await an index build, logging a failure instead of returning it.
///
/// Returns `true` if the indexes are in place.
pub async fn ensure_indexes_or_warn<F>(ensure: F) -> bool
where
    F: Future<Output = Result<(), StoreError>>,
{
    match ensure.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Unique email index not created; run `food-cli indexes` after removing duplicates"
            );
            false
        }
    }
}

/// Connectivity probe used by the readiness endpoint.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}
