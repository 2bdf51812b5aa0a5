//! Inventory request endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use serde::Deserialize;
use shared::AppError;
use shared::models::{InventoryRequest, InventoryRequestCreate, InventoryRequestDetail};

use crate::auth::CurrentUser;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/inventory-requests", get(list).post(submit))
        .route("/api/inventory-requests/{id}/approve", patch(approve))
        .route("/api/inventory-requests/{id}/reject", patch(reject))
}

/// POST /api/inventory-requests [courier|admin|operator]
pub async fn submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<InventoryRequestCreate>,
) -> Result<(http::StatusCode, Json<InventoryRequest>), AppError> {
    let request = db::inventory::submit(&state.db, &user, &payload).await?;
    Ok((http::StatusCode::CREATED, Json(request)))
}

/// GET /api/inventory-requests [admin|operator] — newest first
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Vec<InventoryRequestDetail>> {
    if !user.role.can_review_inventory() {
        return Err(AppError::forbidden("Insufficient permissions"));
    }
    Ok(Json(db::inventory::list(&state.db.read).await?))
}

/// PATCH /api/inventory-requests/{id}/approve body
#[derive(Deserialize)]
pub struct ApproveBody {
    pub approved_quantity: Option<i64>,
}

/// PATCH /api/inventory-requests/{id}/approve [admin|operator]
pub async fn approve(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ApproveBody>,
) -> ApiResult<serde_json::Value> {
    if !user.role.can_review_inventory() {
        return Err(AppError::forbidden("Insufficient permissions"));
    }
    let request = db::inventory::approve(&state.db, id, payload.approved_quantity).await?;
    Ok(Json(serde_json::json!({
        "message": "Request approved and stock updated",
        "request": request,
    })))
}

/// PATCH /api/inventory-requests/{id}/reject body
#[derive(Deserialize)]
pub struct RejectBody {
    pub reason: Option<String>,
}

/// PATCH /api/inventory-requests/{id}/reject [admin|operator]
pub async fn reject(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RejectBody>,
) -> ApiResult<serde_json::Value> {
    if !user.role.can_review_inventory() {
        return Err(AppError::forbidden("Insufficient permissions"));
    }
    let request = db::inventory::reject(&state.db, id, payload.reason).await?;
    Ok(Json(serde_json::json!({
        "message": "Request rejected",
        "request": request,
    })))
}
