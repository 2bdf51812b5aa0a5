//! Order endpoints
//!
//! Placement is public (guests order by scanning a tent's QR code); listing
//! and status changes require a token.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use shared::AppError;
use shared::models::{Order, OrderDetail, OrderRequest, PlacedOrder, StatusUpdate};

use crate::auth::CurrentUser;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list).post(place))
        .route("/api/orders/{id}/status", put(set_status))
}

/// POST /api/orders — the placement transaction; no auth, guests order
/// straight from the tent
pub async fn place(
    State(state): State<AppState>,
    Json(payload): Json<OrderRequest>,
) -> Result<(http::StatusCode, Json<PlacedOrder>), AppError> {
    let placed = db::orders::place_order(&state.db, &payload).await?;
    Ok((http::StatusCode::CREATED, Json(placed)))
}

/// GET /api/orders [*] — couriers see unassigned + their own
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Vec<OrderDetail>> {
    Ok(Json(db::orders::list_for_viewer(&state.db.read, &user).await?))
}

/// PUT /api/orders/{id}/status [*]
///
/// A courier setting `in_delivery` claims the order (courier_id := actor).
pub async fn set_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdate>,
) -> ApiResult<Order> {
    Ok(Json(
        db::orders::set_status(&state.db, id, payload.status, &user).await?,
    ))
}
