//! Product endpoints
//!
//! Catalog CRUD is operator territory; the list endpoint is public and
//! widens to include hidden items when a staff token is presented.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, put},
};
use shared::AppError;
use shared::models::{Product, ProductCreate, ProductUpdate, StockAdjustment};

use crate::auth::{CurrentUser, MaybeUser};
use crate::db;
use crate::state::AppState;

use super::ApiResult;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list).post(create))
        .route("/api/products/{id}", put(update).delete(delete))
        .route("/api/products/{id}/stock", patch(adjust_stock))
        .route("/api/products/{id}/toggle", patch(toggle))
}

/// GET /api/products — public; staff see inactive/out-of-stock items too
pub async fn list(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> ApiResult<Vec<Product>> {
    let include_hidden = user.is_some_and(|u| u.role.can_manage_catalog());
    Ok(Json(db::products::list(&state.db.read, include_hidden).await?))
}

/// POST /api/products [admin|operator]
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> Result<(http::StatusCode, Json<Product>), AppError> {
    if !user.role.can_manage_catalog() {
        return Err(AppError::forbidden("Insufficient permissions"));
    }
    let product = db::products::create(&state.db.write, &payload).await?;
    Ok((http::StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id} [admin|operator]
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> ApiResult<Product> {
    if !user.role.can_manage_catalog() {
        return Err(AppError::forbidden("Insufficient permissions"));
    }
    Ok(Json(db::products::update(&state.db.write, id, &payload).await?))
}

/// PATCH /api/products/{id}/stock [admin|operator]
pub async fn adjust_stock(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<StockAdjustment>,
) -> ApiResult<Product> {
    if !user.role.can_manage_catalog() {
        return Err(AppError::forbidden("Insufficient permissions"));
    }
    Ok(Json(
        db::products::adjust_stock(&state.db.write, id, &payload).await?,
    ))
}

/// PATCH /api/products/{id}/toggle [admin|operator]
pub async fn toggle(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    if !user.role.can_manage_catalog() {
        return Err(AppError::forbidden("Insufficient permissions"));
    }
    let product = db::products::toggle_active(&state.db.write, id).await?;
    let status = if product.is_active { "activated" } else { "hidden" };
    Ok(Json(serde_json::json!({
        "message": format!("Product {status}"),
        "product": product,
    })))
}

/// DELETE /api/products/{id} [admin]
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    if !user.role.can_delete_resources() {
        return Err(AppError::forbidden("Insufficient permissions"));
    }
    let product = db::products::delete(&state.db.write, id).await?;
    Ok(Json(serde_json::json!({
        "message": "Product deleted",
        "product": product,
    })))
}
