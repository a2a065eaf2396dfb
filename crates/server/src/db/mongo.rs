//! MongoDB-backed store.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Bson, Document, doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion},
    results::InsertOneResult,
};
use secrecy::ExposeSecret;

use food_core::{Email, InsertOutcome, NewFood, NewUser, Record, RecordId, SortOrder};

use super::{FoodStore, StoreError, StoreHealth, UserStore, document_to_record, record_to_document};
use crate::config::DatabaseConfig;

const USERS_COLLECTION: &str = "users";
const FOODS_COLLECTION: &str = "foods";
const EMAIL_INDEX_NAME: &str = "email_unique";

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Store backed by a MongoDB deployment.
///
/// Cloning is cheap: the driver client is internally reference counted and
/// pools its own connections.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    users: Collection<Document>,
    foods: Collection<Document>,
}

impl MongoStore {
    /// Connect using the Stable API (version 1, strict, deprecation errors).
    ///
    /// The driver connects lazily; call [`StoreHealth::ping`] to verify the
    /// deployment is reachable.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the connection string is invalid.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.uri.expose_secret()).await?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options)?;
        let database = client.database(&config.name);
        Ok(Self::new(client, &database))
    }

    /// Wrap an existing client and database.
    #[must_use]
    pub fn new(client: Client, database: &Database) -> Self {
        Self {
            users: database.collection(USERS_COLLECTION),
            foods: database.collection(FOODS_COLLECTION),
            client,
        }
    }

    /// Ensure the unique index on `users.email` exists.
    ///
    /// Idempotent: creating an index that already exists with the same
    /// definition is a no-op on the server.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the index cannot be created, for
    /// example because duplicate emails are already stored. Until the
    /// duplicates are removed, uniqueness rests on the registration
    /// handler's lookup alone and concurrent registrations can still race.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name(EMAIL_INDEX_NAME.to_owned())
                    .unique(true)
                    .build(),
            )
            .build();

        self.users.create_index(model).await?;
        tracing::info!(collection = USERS_COLLECTION, index = EMAIL_INDEX_NAME, "Index ensured");
        Ok(())
    }
}

#[async_trait]
impl UserStore for MongoStore {
    async fn find_user_by_email(&self, email: &Email) -> Result<Option<Record>, StoreError> {
        let found = self
            .users
            .find_one(doc! { "email": email.as_str() })
            .await?;
        Ok(found.map(document_to_record))
    }

    async fn insert_user(&self, user: NewUser) -> Result<InsertOutcome, StoreError> {
        let document = record_to_document(user.record())?;
        let result = self.users.insert_one(document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                return StoreError::Duplicate(format!("email {}", user.email()));
            }
            StoreError::Database(e)
        })?;
        insert_outcome(&result)
    }
}

#[async_trait]
impl FoodStore for MongoStore {
    async fn list_foods(&self, order: SortOrder) -> Result<Vec<Record>, StoreError> {
        let documents: Vec<Document> = self
            .foods
            .find(doc! {})
            .sort(doc! { "price": order.direction() })
            .await?
            .try_collect()
            .await?;
        Ok(documents.into_iter().map(document_to_record).collect())
    }

    async fn insert_food(&self, food: NewFood) -> Result<InsertOutcome, StoreError> {
        let document = record_to_document(food.record())?;
        let result = self.foods.insert_one(document).await?;
        insert_outcome(&result)
    }

    async fn find_food(&self, id: &RecordId) -> Result<Option<Record>, StoreError> {
        let found = self.foods.find_one(id_filter(id)?).await?;
        Ok(found.map(document_to_record))
    }

    async fn delete_food(&self, id: &RecordId) -> Result<u64, StoreError> {
        let result = self.foods.delete_one(id_filter(id)?).await?;
        Ok(result.deleted_count)
    }

    async fn clear_foods(&self) -> Result<u64, StoreError> {
        let result = self.foods.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }
}

#[async_trait]
impl StoreHealth for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

/// Filter matching a single record by identifier.
fn id_filter(id: &RecordId) -> Result<Document, StoreError> {
    let oid = ObjectId::parse_str(id.as_str()).map_err(|e| StoreError::Encoding(e.to_string()))?;
    Ok(doc! { "_id": oid })
}

/// Convert a driver insert result into the client-facing outcome.
fn insert_outcome(result: &InsertOneResult) -> Result<InsertOutcome, StoreError> {
    let Bson::ObjectId(oid) = &result.inserted_id else {
        return Err(StoreError::Encoding(format!(
            "inserted id is not an ObjectId: {}",
            result.inserted_id
        )));
    };
    let id = RecordId::parse(&oid.to_hex()).map_err(|e| StoreError::Encoding(e.to_string()))?;
    Ok(InsertOutcome::acknowledged(id))
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}
