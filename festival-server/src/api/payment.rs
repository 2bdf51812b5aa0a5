//! Payment stub pages
//!
//! The real processor is out of scope — these two pages simulate the flow:
//! the first renders a pay button, the second flips payment_status to paid.

use axum::{
    Router,
    extract::{Path, State},
    response::Html,
    routing::get,
};
use shared::AppError;

use crate::db;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/payment/{order_id}", get(payment_page))
        .route("/api/payment/{order_id}/success", get(payment_success))
}

/// GET /api/payment/{order_id} — simulated payment page
pub async fn payment_page(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    db::orders::find_by_id(&state.db.read, order_id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    Ok(Html(format!(
        r#"<html>
  <head><title>Pay order #{order_id}</title></head>
  <body>
    <h1>Pay order #{order_id}</h1>
    <p>Simulated payment</p>
    <button onclick="window.location.href='/api/payment/{order_id}/success'">
      Pay now
    </button>
  </body>
</html>"#
    )))
}

/// GET /api/payment/{order_id}/success — flip payment_status to paid
pub async fn payment_success(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    db::orders::mark_paid(&state.db, order_id).await?;

    Ok(Html(format!(
        r#"<html>
  <head><title>Payment successful</title></head>
  <body>
    <h1>Payment successful!</h1>
    <p>Order #{order_id} is paid. Your delivery is on the way.</p>
  </body>
</html>"#
    )))
}
