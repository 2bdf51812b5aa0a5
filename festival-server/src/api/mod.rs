//! API routes
//!
//! Per-domain handler modules, each exposing a `router()`; assembled here
//! with CORS and request tracing.

pub mod auth;
pub mod health;
pub mod inventory;
pub mod messages;
pub mod orders;
pub mod payment;
pub mod products;
pub mod tents;

use axum::Router;
use shared::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(tents::router())
        .merge(orders::router())
        .merge(inventory::router())
        .merge(messages::router())
        .merge(payment::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
