//! In-process store with the same observable behavior as [`super::MongoStore`].
//!
//! Used by route tests and for running the API without a deployment. It
//! enforces email uniqueness the way the unique index does, assigns
//! `ObjectId` identifiers, and sorts by `price` following the store's
//! cross-type ordering: missing or null first, then numbers, then strings,
//! then everything else.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;

use food_core::{Email, ID_FIELD, InsertOutcome, NewFood, NewUser, Record, RecordId, SortOrder};

use super::{FoodStore, StoreError, StoreHealth, UserStore};

/// Store that keeps both collections in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<Record>>,
    foods: RwLock<Vec<Record>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, AtomicOrdering::SeqCst);
    }

    /// Number of stored users with exactly this email.
    pub async fn count_users_with_email(&self, email: &str) -> usize {
        self.users
            .read()
            .await
            .iter()
            .filter(|user| user.get("email").and_then(Value::as_str) == Some(email))
            .count()
    }

    /// Number of stored foods.
    pub async fn food_count(&self) -> usize {
        self.foods.read().await.len()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Unavailable("memory store marked unavailable".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &Email) -> Result<Option<Record>, StoreError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|user| user.get("email").and_then(Value::as_str) == Some(email.as_str()))
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<InsertOutcome, StoreError> {
        self.check_available()?;
        // Hold the write lock across check and insert, as the unique index would.
        let mut users = self.users.write().await;
        let email = user.email().as_str();
        if users
            .iter()
            .any(|existing| existing.get("email").and_then(Value::as_str) == Some(email))
        {
            return Err(StoreError::Duplicate(format!("email {email}")));
        }

        let (id, record) = with_new_id(user.into_record())?;
        users.push(record);
        Ok(InsertOutcome::acknowledged(id))
    }
}

#[async_trait]
impl FoodStore for MemoryStore {
    async fn list_foods(&self, order: SortOrder) -> Result<Vec<Record>, StoreError> {
        self.check_available()?;
        let mut foods = self.foods.read().await.clone();
        foods.sort_by(|a, b| {
            let ordering = compare_prices(a.get("price"), b.get("price"));
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        Ok(foods)
    }

    async fn insert_food(&self, food: NewFood) -> Result<InsertOutcome, StoreError> {
        self.check_available()?;
        let (id, record) = with_new_id(food.into_record())?;
        self.foods.write().await.push(record);
        Ok(InsertOutcome::acknowledged(id))
    }

    async fn find_food(&self, id: &RecordId) -> Result<Option<Record>, StoreError> {
        self.check_available()?;
        let foods = self.foods.read().await;
        Ok(foods.iter().find(|food| has_id(food, id)).cloned())
    }

    async fn delete_food(&self, id: &RecordId) -> Result<u64, StoreError> {
        self.check_available()?;
        let mut foods = self.foods.write().await;
        let Some(position) = foods.iter().position(|food| has_id(food, id)) else {
            return Ok(0);
        };
        foods.remove(position);
        Ok(1)
    }

    async fn clear_foods(&self) -> Result<u64, StoreError> {
        self.check_available()?;
        let mut foods = self.foods.write().await;
        let removed = foods.len() as u64;
        foods.clear();
        Ok(removed)
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

/// Assign a fresh identifier, placing `_id` first like the store does.
fn with_new_id(fields: Record) -> Result<(RecordId, Record), StoreError> {
    let id = RecordId::parse(&ObjectId::new().to_hex())
        .map_err(|e| StoreError::Encoding(e.to_string()))?;

    let mut record = Record::with_capacity(fields.len() + 1);
    record.insert(ID_FIELD.to_owned(), Value::String(id.to_string()));
    record.extend(fields);
    Ok((id, record))
}

fn has_id(record: &Record, id: &RecordId) -> bool {
    record.get(ID_FIELD).and_then(Value::as_str) == Some(id.as_str())
}

/// Rank of a value in the store's cross-type sort order.
fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

fn compare_prices(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
