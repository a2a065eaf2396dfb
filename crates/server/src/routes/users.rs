//! User registration.
//!
//! Only users authenticated through Google are stored. Registration is
//! idempotent per email: a repeat request returns the stored record with
//! `"success": false` instead of an error.

use axum::{Json, extract::State};
use serde::Serialize;

use food_core::{Email, InsertOutcome, NewUser, Record};

use super::RecordBody;
use crate::db::StoreError;
use crate::error::{AppError, Result};
use crate::state::AppState;

const SAVE_FAILED: &str = "Failed to save user";

/// Response for a registration request.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: &'static str,
    /// Insert result, present when a new user was stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InsertOutcome>,
    /// Previously stored record, present when the email was already registered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Record>,
}

impl RegisterResponse {
    const fn saved(outcome: InsertOutcome) -> Self {
        Self {
            success: true,
            message: "Google user saved successfully",
            data: Some(outcome),
            user: None,
        }
    }

    const fn already_exists(user: Record) -> Self {
        Self {
            success: false,
            message: "User already exists",
            data: None,
            user: Some(user),
        }
    }
}

/// Register a Google user.
///
/// # Errors
///
/// - `Forbidden` if `provider` is not `"google"`
/// - `BadRequest` if `email` is missing
/// - `Store` if the lookup or insert fails
pub async fn register(
    State(state): State<AppState>,
    RecordBody(body): RecordBody,
) -> Result<Json<RegisterResponse>> {
    tracing::debug!(user = ?body, "Google user received");

    let user = NewUser::from_record(body)?;

    if let Some(existing) = find_existing(&state, user.email()).await? {
        return Ok(Json(RegisterResponse::already_exists(existing)));
    }

    let email = user.email().clone();
    match state.users().insert_user(user).await {
        Ok(outcome) => {
            tracing::info!(email = %email, id = %outcome.inserted_id, "Google user saved");
            Ok(Json(RegisterResponse::saved(outcome)))
        }
        // Lost a race with a concurrent registration; the unique index kept
        // the other insert, so report it as already registered.
        Err(StoreError::Duplicate(detail)) => match find_existing(&state, &email).await? {
            Some(existing) => Ok(Json(RegisterResponse::already_exists(existing))),
            None => Err(AppError::store(SAVE_FAILED, StoreError::Duplicate(detail))),
        },
        Err(e) => Err(AppError::store(SAVE_FAILED, e)),
    }
}

async fn find_existing(state: &AppState, email: &Email) -> Result<Option<Record>> {
    state
        .users()
        .find_user_by_email(email)
        .await
        .map_err(|e| AppError::store(SAVE_FAILED, e))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use serde_json::json;

    use food_core::{Email, InsertOutcome, NewUser, Record};

    use crate::db::{MemoryStore, StoreError, UserStore};
    use crate::test_utils::TestApp;

    /// User store whose first `misses` lookups find nothing, as when another
    /// registration commits between the lookup and the insert.
    struct StaleLookups {
        inner: MemoryStore,
        misses: AtomicUsize,
    }

    impl StaleLookups {
        fn new(misses: usize) -> Self {
            Self {
                inner: MemoryStore::new(),
                misses: AtomicUsize::new(misses),
            }
        }
    }

    #[async_trait]
    impl UserStore for StaleLookups {
        async fn find_user_by_email(&self, email: &Email) -> Result<Option<Record>, StoreError> {
            if self
                .misses
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Ok(None);
            }
            self.inner.find_user_by_email(email).await
        }

        async fn insert_user(&self, user: NewUser) -> Result<InsertOutcome, StoreError> {
            self.inner.insert_user(user).await
        }
    }

    async fn seed_user(store: &StaleLookups, email: &str, name: &str) {
        let user = NewUser::from_record(
            json!({"provider": "google", "email": email, "name": name})
                .as_object()
                .cloned()
                .unwrap(),
        )
        .unwrap();
        store.inner.insert_user(user).await.unwrap();
    }

    #[tokio::test]
    async fn test_register_new_google_user() {
        let app = TestApp::new();
        let response = app
            .post_json(
                "/users",
                &json!({"provider": "google", "email": "cook@example.com", "name": "Cook"}),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        let body = response.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("Google user saved successfully"));
        assert_eq!(body["data"]["acknowledged"], json!(true));
        assert_eq!(body["data"]["insertedId"].as_str().unwrap().len(), 24);
        assert!(body.get("user").is_none());
        assert_eq!(app.store.count_users_with_email("cook@example.com").await, 1);
    }

    #[tokio::test]
    async fn test_register_twice_returns_existing() {
        let app = TestApp::new();
        let user = json!({"provider": "google", "email": "cook@example.com", "name": "Cook"});

        let first = app.post_json("/users", &user).await.json();
        let second = app
            .post_json(
                "/users",
                &json!({"provider": "google", "email": "cook@example.com", "name": "Other"}),
            )
            .await;

        assert_eq!(second.status, StatusCode::OK);
        let body = second.json();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("User already exists"));
        assert_eq!(body["user"]["_id"], first["data"]["insertedId"]);
        assert_eq!(body["user"]["name"], json!("Cook"));
        assert!(body.get("data").is_none());
        assert_eq!(app.store.count_users_with_email("cook@example.com").await, 1);
    }

    #[tokio::test]
    async fn test_non_google_provider_forbidden() {
        let app = TestApp::new();
        for body in [
            json!({"provider": "github", "email": "cook@example.com"}),
            json!({"email": "cook@example.com"}),
            json!({"provider": "github"}),
        ] {
            let response = app.post_json("/users", &body).await;
            assert_eq!(response.status, StatusCode::FORBIDDEN);
            assert_eq!(
                response.json(),
                json!({"success": false, "message": "Only Google users can be saved"})
            );
        }
        assert_eq!(app.store.count_users_with_email("cook@example.com").await, 0);
    }

    #[tokio::test]
    async fn test_missing_email_bad_request() {
        let app = TestApp::new();
        for body in [
            json!({"provider": "google"}),
            json!({"provider": "google", "email": ""}),
        ] {
            let response = app.post_json("/users", &body).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert_eq!(response.json(), json!({"message": "Email is required"}));
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let app = TestApp::new();
        app.store.set_unavailable(true);

        let response = app
            .post_json("/users", &json!({"provider": "google", "email": "cook@example.com"}))
            .await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json(), json!({"message": "Failed to save user"}));
    }

    #[tokio::test]
    async fn test_malformed_body_bad_request() {
        let app = TestApp::new();
        let response = app.post_raw("/users", "not json").await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.json()["message"].is_string());
    }

    #[tokio::test]
    async fn test_empty_body_forbidden() {
        let app = TestApp::new();
        for body in ["", " \r\n"] {
            let response = app.post_raw("/users", body).await;
            assert_eq!(response.status, StatusCode::FORBIDDEN);
            assert_eq!(
                response.json(),
                json!({"success": false, "message": "Only Google users can be saved"})
            );
        }
    }

    #[tokio::test]
    async fn test_lost_insert_race_returns_existing() {
        let users = Arc::new(StaleLookups::new(1));
        seed_user(&users, "cook@example.com", "Winner").await;
        let app = TestApp::with_user_store(users.clone());

        let response = app
            .post_json(
                "/users",
                &json!({"provider": "google", "email": "cook@example.com", "name": "Loser"}),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        let body = response.json();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("User already exists"));
        assert_eq!(body["user"]["name"], json!("Winner"));
        assert_eq!(users.inner.count_users_with_email("cook@example.com").await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_without_stored_user_is_internal() {
        let users = Arc::new(StaleLookups::new(2));
        seed_user(&users, "cook@example.com", "Winner").await;
        let app = TestApp::with_user_store(users.clone());

        let response = app
            .post_json("/users", &json!({"provider": "google", "email": "cook@example.com"}))
            .await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json(), json!({"message": "Failed to save user"}));
        assert_eq!(users.inner.count_users_with_email("cook@example.com").await, 1);
    }
}
