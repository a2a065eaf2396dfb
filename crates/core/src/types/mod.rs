//! Core types for the food API.
//!
//! This module provides type-safe wrappers and validated request types for
//! the `users` and `foods` collections.

pub mod email;
pub mod food;
pub mod id;
pub mod record;
pub mod sort;
pub mod user;

pub use email::{Email, EmailError};
pub use food::{FoodValidationError, NewFood, REQUIRED_FOOD_FIELDS};
pub use id::{RecordId, RecordIdError};
pub use record::{ID_FIELD, InsertOutcome, Record, has_text};
pub use sort::SortOrder;
pub use user::{GOOGLE_PROVIDER, NewUser, RegistrationError};
