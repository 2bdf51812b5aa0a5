//! Health check endpoint

use axum::{Json, Router, routing::get};

use crate::state::AppState;
use crate::util::now_millis;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health_check))
}

/// GET /api/health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": now_millis(),
    }))
}
