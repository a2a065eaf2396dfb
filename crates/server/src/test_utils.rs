//! Helpers for driving the router in tests.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use crate::db::{MemoryStore, UserStore};
use crate::state::AppState;

/// The full application over a fresh in-memory store.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
}

impl TestResponse {
    /// Parse the body as JSON, panicking with the raw text if it is not.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text)
            .unwrap_or_else(|e| panic!("response is not JSON ({e}): {}", self.text))
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = crate::app(AppState::new(store.clone()));
        Self { store, router }
    }

    /// The application with `users` served by `users` instead of `store`.
    pub fn with_user_store(users: Arc<dyn UserStore>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = crate::app(AppState::with_stores(users, store.clone(), store.clone()));
        Self { store, router }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, Body::empty(), None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, Body::empty(), None).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.post_raw(uri, &body.to_string()).await
    }

    /// POST `body` verbatim with a JSON content type.
    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            Body::from(body.to_owned()),
            Some("application/json"),
        )
        .await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).expect("valid request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        TestResponse {
            status,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
