//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::{FoodStore, StoreHealth, UserStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The persistence handle is injected here
/// rather than held in a global, so tests can swap in
/// [`MemoryStore`](crate::db::MemoryStore).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    users: Arc<dyn UserStore>,
    foods: Arc<dyn FoodStore>,
    health: Arc<dyn StoreHealth>,
}

impl AppState {
    /// Create application state over a single store serving both collections.
    #[must_use]
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: UserStore + FoodStore + StoreHealth + 'static,
    {
        Self::with_stores(store.clone(), store.clone(), store)
    }

    /// Create application state from separate stores per collection.
    #[must_use]
    pub fn with_stores(
        users: Arc<dyn UserStore>,
        foods: Arc<dyn FoodStore>,
        health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                users,
                foods,
                health,
            }),
        }
    }

    /// Get the `users` collection.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    /// Get the `foods` collection.
    #[must_use]
    pub fn foods(&self) -> &dyn FoodStore {
        self.inner.foods.as_ref()
    }

    #[must_use]
    pub fn health(&self) -> &dyn StoreHealth {
        self.inner.health.as_ref()
    }
}
