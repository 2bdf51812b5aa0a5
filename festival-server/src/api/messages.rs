//! Message endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use shared::AppError;
use shared::models::{Message, MessageCreate, MessageDetail};

use crate::auth::CurrentUser;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/messages", get(list).post(create))
        .route("/api/messages/{id}", axum::routing::delete(delete))
}

/// GET /api/messages [*] — own + broadcast, deleted excluded, oldest first
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Vec<MessageDetail>> {
    Ok(Json(db::messages::list_for_user(&state.db.read, user.id).await?))
}

/// POST /api/messages [*]
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<MessageCreate>,
) -> Result<(http::StatusCode, Json<Message>), AppError> {
    let message = db::messages::create(&state.db, &user, &payload).await?;
    Ok((http::StatusCode::CREATED, Json(message)))
}

/// DELETE /api/messages/{id} [*] — soft delete; senders their own,
/// admin/operator any
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::messages::soft_delete(&state.db, id, &user).await?;
    Ok(Json(serde_json::json!({
        "message": "Message deleted",
        "deleted_message": deleted,
    })))
}
