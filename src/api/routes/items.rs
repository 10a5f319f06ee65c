//! Item Registry Routes
//!
//! - GET /api/v1/items - All items across all dates
//! - POST /api/v1/items - Add an item dated today
//! - PUT /api/v1/items/:id - Replace the editable fields of an item
//! - DELETE /api/v1/items/:id - Delete an item
//! - DELETE /api/v1/items?confirm=true - Clear the whole collection

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ConfirmParams, ItemRequest, ResetResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::ledger::ItemForm;
use crate::storage::{Item, ItemId};

/// GET /api/v1/items
pub async fn list_items(State(state): State<Arc<AppState>>) -> Json<Vec<Item>> {
    Json(state.registry().items().await)
}

/// POST /api/v1/items
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ItemRequest>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let form = ItemForm::from(req);
    let item = state.registry().add(&form).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/v1/items/:id
///
/// Id and date are kept; all four fields are required.
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<ItemRequest>,
) -> ApiResult<Json<Item>> {
    let form = ItemForm::from(req);
    let item = state.registry().update(ItemId(id), &form).await?;
    Ok(Json(item))
}

/// DELETE /api/v1/items/:id
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Item>> {
    let removed = state.registry().delete(ItemId(id)).await?;
    Ok(Json(removed))
}

/// DELETE /api/v1/items?confirm=true
pub async fn reset_items(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConfirmParams>,
) -> ApiResult<Json<ResetResponse>> {
    let cleared = state.registry().reset_all(|_| params.confirm).await?;
    if !cleared {
        return Err(ApiError::Validation(
            "reset requires confirm=true".to_string(),
        ));
    }

    Ok(Json(ResetResponse {
        status: "cleared".to_string(),
    }))
}
