//! Food item handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use food_core::{InsertOutcome, NewFood, Record, RecordId, SortOrder};

use super::RecordBody;
use crate::error::{AppError, Result};
use crate::state::AppState;

const FOOD_NOT_FOUND: &str = "Food not found";

/// Query parameters for the food listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// `asc` (default) or `desc`.
    pub sort: Option<String>,
}

/// Response for a created food.
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub success: bool,
    pub data: InsertOutcome,
}

/// Response for a deleted food.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: &'static str,
}

/// List every food ordered by price.
///
/// An unparseable query string is treated like an absent one.
///
/// # Errors
///
/// Returns `Store` if the listing fails; no partial results are returned.
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Record>>> {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let order = SortOrder::from_param(query.sort.as_deref());

    let foods = state
        .foods()
        .list_foods(order)
        .await
        .map_err(|e| AppError::store("Failed to fetch foods", e))?;

    tracing::debug!(count = foods.len(), %order, "Listed foods");
    Ok(Json(foods))
}

/// Create a food.
///
/// # Errors
///
/// Returns `BadRequest` if `title` or `description` is missing, `Store` if
/// the insert fails.
pub async fn create(
    State(state): State<AppState>,
    RecordBody(body): RecordBody,
) -> Result<Json<CreateResponse>> {
    let food = NewFood::from_record(body)?;
    let title = food.title().to_owned();

    let outcome = state
        .foods()
        .insert_food(food)
        .await
        .map_err(|e| AppError::store("Failed to save food", e))?;

    tracing::info!(id = %outcome.inserted_id, title = %title, "Food created");
    Ok(Json(CreateResponse {
        success: true,
        data: outcome,
    }))
}

/// Fetch one food by identifier.
///
/// # Errors
///
/// Returns `InvalidIdentifier` for a malformed id, `NotFound` if no food
/// matches, `Store` if the lookup fails.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Record>> {
    let id = RecordId::parse(&id)?;

    state
        .foods()
        .find_food(&id)
        .await
        .map_err(|e| AppError::store("Failed to fetch food", e))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(FOOD_NOT_FOUND.to_owned()))
}

/// Delete one food by identifier.
///
/// # Errors
///
/// Returns `InvalidIdentifier` for a malformed id, `NotFound` if nothing was
/// deleted, `Store` if the deletion fails.
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = RecordId::parse(&id)?;

    let deleted = state
        .foods()
        .delete_food(&id)
        .await
        .map_err(|e| AppError::store("Failed to delete food", e))?;

    if deleted == 0 {
        return Err(AppError::NotFound(FOOD_NOT_FOUND.to_owned()));
    }

    tracing::info!(id = %id, "Food deleted");
    Ok(Json(DeleteResponse {
        success: true,
        message: "Food deleted successfully",
    }))
}
