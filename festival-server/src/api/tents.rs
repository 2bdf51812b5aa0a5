//! Tent endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, put},
};
use shared::AppError;
use shared::models::{Role, Tent, TentCreate, TentUpdate};

use crate::auth::CurrentUser;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tents", get(list).post(create))
        .route("/api/tents/{id}", put(update).delete(delete))
        .route("/api/tents/{id}/toggle", patch(toggle))
}

/// GET /api/tents [*] — couriers only see active tents
pub async fn list(State(state): State<AppState>, user: CurrentUser) -> ApiResult<Vec<Tent>> {
    let active_only = matches!(user.role, Role::Courier);
    Ok(Json(db::tents::list(&state.db.read, active_only).await?))
}

/// POST /api/tents [admin|operator]
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<TentCreate>,
) -> Result<(http::StatusCode, Json<Tent>), AppError> {
    if !user.role.can_manage_catalog() {
        return Err(AppError::forbidden("Insufficient permissions"));
    }
    let tent = db::tents::create(&state.db.write, &payload).await?;
    Ok((http::StatusCode::CREATED, Json(tent)))
}

/// PUT /api/tents/{id} [admin|operator] — partial update
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<TentUpdate>,
) -> ApiResult<Tent> {
    if !user.role.can_manage_catalog() {
        return Err(AppError::forbidden("Insufficient permissions"));
    }
    Ok(Json(db::tents::update(&state.db.write, id, &payload).await?))
}

/// PATCH /api/tents/{id}/toggle [admin|operator]
pub async fn toggle(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    if !user.role.can_manage_catalog() {
        return Err(AppError::forbidden("Insufficient permissions"));
    }
    let tent = db::tents::toggle_active(&state.db.write, id).await?;
    let status = if tent.is_active { "activated" } else { "hidden" };
    Ok(Json(serde_json::json!({
        "message": format!("Tent {status}"),
        "tent": tent,
    })))
}

/// DELETE /api/tents/{id} [admin] — refused while orders reference the tent
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    if !user.role.can_delete_resources() {
        return Err(AppError::forbidden("Insufficient permissions"));
    }
    let tent = db::tents::delete(&state.db.write, id).await?;
    Ok(Json(serde_json::json!({
        "message": "Tent deleted",
        "tent": tent,
    })))
}
