//! Inventory request database operations
//!
//! Approval is the only stock *incrementer* in the system. The
//! `status = 'pending'` guard in both the lookup and the UPDATE makes the
//! transition one-shot: a second approval (or a reject after approve) finds
//! no pending row and fails without touching the catalog.

use shared::AppError;
use shared::models::{InventoryRequest, InventoryRequestCreate, InventoryRequestDetail};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::util::now_millis;

use super::DbService;

const DETAIL_SELECT: &str = "SELECT ir.id, ir.courier_id, u.username AS courier_name, \
                             ir.product_id, p.name AS product_name, ir.requested_quantity, \
                             ir.approved_quantity, ir.status, ir.notes, ir.created_at \
                             FROM inventory_requests ir \
                             JOIN users u ON ir.courier_id = u.id \
                             JOIN products p ON ir.product_id = p.id";

const NOT_PENDING: &str = "Request not found or already processed";

/// Submit a replenishment request. No effect on stock.
pub async fn submit(
    db: &DbService,
    actor: &CurrentUser,
    data: &InventoryRequestCreate,
) -> Result<InventoryRequest, AppError> {
    if !actor.role.can_request_inventory() {
        return Err(AppError::forbidden(
            "Insufficient permissions to request replenishment",
        ));
    }
    if data.requested_quantity <= 0 {
        return Err(AppError::validation("requested_quantity must be positive"));
    }

    let product_exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM products WHERE id = ?")
        .bind(data.product_id)
        .fetch_optional(&db.read)
        .await?;
    if product_exists.is_none() {
        return Err(AppError::not_found("Product not found"));
    }

    let id = sqlx::query(
        "INSERT INTO inventory_requests \
         (courier_id, product_id, requested_quantity, status, created_at) \
         VALUES (?, ?, ?, 'pending', ?)",
    )
    .bind(actor.id)
    .bind(data.product_id)
    .bind(data.requested_quantity)
    .bind(now_millis())
    .execute(&db.write)
    .await?
    .last_insert_rowid();

    let request: InventoryRequest = sqlx::query_as(
        "SELECT id, courier_id, product_id, requested_quantity, approved_quantity, status, \
         notes, created_at FROM inventory_requests WHERE id = ?",
    )
    .bind(id)
    .fetch_one(&db.read)
    .await?;
    Ok(request)
}

/// All requests, newest first, with courier and product names.
pub async fn list(pool: &SqlitePool) -> Result<Vec<InventoryRequestDetail>, AppError> {
    Ok(
        sqlx::query_as(&format!("{DETAIL_SELECT} ORDER BY ir.created_at DESC, ir.id DESC"))
            .fetch_all(pool)
            .await?,
    )
}

/// Approve a pending request and add the approved quantity to the product's
/// stock. Status change and stock increment commit together or not at all.
pub async fn approve(
    db: &DbService,
    request_id: i64,
    approved_quantity: Option<i64>,
) -> Result<InventoryRequestDetail, AppError> {
    if let Some(q) = approved_quantity
        && q <= 0
    {
        return Err(AppError::validation("approved_quantity must be positive"));
    }

    let mut tx = db.write.begin().await?;

    let pending: Option<(i64, i64)> = sqlx::query_as(
        "SELECT product_id, requested_quantity FROM inventory_requests \
         WHERE id = ? AND status = 'pending'",
    )
    .bind(request_id)
    .fetch_optional(&mut *tx)
    .await?;
    let Some((product_id, requested_quantity)) = pending else {
        return Err(AppError::not_found(NOT_PENDING));
    };

    let quantity = approved_quantity.unwrap_or(requested_quantity);

    let updated = sqlx::query(
        "UPDATE inventory_requests SET status = 'approved', approved_quantity = ? \
         WHERE id = ? AND status = 'pending'",
    )
    .bind(quantity)
    .bind(request_id)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(AppError::not_found(NOT_PENDING));
    }

    let stocked = sqlx::query("UPDATE products SET stock_quantity = stock_quantity + ? WHERE id = ?")
        .bind(quantity)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;
    if stocked.rows_affected() == 0 {
        // Product deleted since submission; the approval must not be recorded
        return Err(AppError::not_found("Product not found"));
    }

    tx.commit().await?;

    detail(&db.read, request_id).await
}

/// Reject a pending request, storing the reason. No catalog mutation.
pub async fn reject(
    db: &DbService,
    request_id: i64,
    reason: Option<String>,
) -> Result<InventoryRequestDetail, AppError> {
    let notes = reason.unwrap_or_else(|| "Request rejected".to_string());

    let result = sqlx::query(
        "UPDATE inventory_requests SET status = 'rejected', notes = ? \
         WHERE id = ? AND status = 'pending'",
    )
    .bind(&notes)
    .bind(request_id)
    .execute(&db.write)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found(NOT_PENDING));
    }

    detail(&db.read, request_id).await
}

async fn detail(pool: &SqlitePool, id: i64) -> Result<InventoryRequestDetail, AppError> {
    sqlx::query_as(&format!("{DETAIL_SELECT} WHERE ir.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::Internal)
}
