//! Tent database operations

use shared::AppError;
use shared::error::is_unique_violation;
use shared::models::{Tent, TentCreate, TentUpdate};
use sqlx::SqlitePool;

use crate::util::now_millis;

const TENT_COLUMNS: &str = "id, tent_number, qr_code, location_description, zone, capacity, \
                            contact_name, contact_phone, notes, is_active, created_at, updated_at";

const DUPLICATE_TENT: &str = "A tent with this number already exists";

pub async fn list(pool: &SqlitePool, active_only: bool) -> Result<Vec<Tent>, AppError> {
    let sql = if active_only {
        format!("SELECT {TENT_COLUMNS} FROM tents WHERE is_active = 1 ORDER BY tent_number")
    } else {
        format!("SELECT {TENT_COLUMNS} FROM tents ORDER BY tent_number")
    };
    Ok(sqlx::query_as(&sql).fetch_all(pool).await?)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Tent>, AppError> {
    Ok(
        sqlx::query_as(&format!("SELECT {TENT_COLUMNS} FROM tents WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn create(pool: &SqlitePool, data: &TentCreate) -> Result<Tent, AppError> {
    if data.tent_number.trim().is_empty() {
        return Err(AppError::validation("tent_number is required"));
    }
    let now = now_millis();

    let result = sqlx::query(
        "INSERT INTO tents (tent_number, qr_code, location_description, zone, capacity, \
         contact_name, contact_phone, notes, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&data.tent_number)
    // QR payload is the tent number; rendering happens client-side
    .bind(&data.tent_number)
    .bind(&data.location_description)
    .bind(&data.zone)
    .bind(data.capacity.unwrap_or(4))
    .bind(&data.contact_name)
    .bind(&data.contact_phone)
    .bind(&data.notes)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::validation(DUPLICATE_TENT)
        } else {
            e.into()
        }
    })?;

    find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal)
}

/// Partial update; a new tent_number refreshes the QR payload too.
pub async fn update(pool: &SqlitePool, id: i64, data: &TentUpdate) -> Result<Tent, AppError> {
    let qr_code = data.tent_number.clone();

    let result = sqlx::query(
        "UPDATE tents SET \
         tent_number = COALESCE(?, tent_number), \
         qr_code = COALESCE(?, qr_code), \
         location_description = COALESCE(?, location_description), \
         zone = COALESCE(?, zone), \
         capacity = COALESCE(?, capacity), \
         contact_name = COALESCE(?, contact_name), \
         contact_phone = COALESCE(?, contact_phone), \
         notes = COALESCE(?, notes), \
         updated_at = ? \
         WHERE id = ?",
    )
    .bind(&data.tent_number)
    .bind(&qr_code)
    .bind(&data.location_description)
    .bind(&data.zone)
    .bind(data.capacity)
    .bind(&data.contact_name)
    .bind(&data.contact_phone)
    .bind(&data.notes)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::validation(DUPLICATE_TENT)
        } else {
            e.into()
        }
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Tent not found"));
    }
    find_by_id(pool, id).await?.ok_or(AppError::Internal)
}

pub async fn toggle_active(pool: &SqlitePool, id: i64) -> Result<Tent, AppError> {
    let result = sqlx::query("UPDATE tents SET is_active = NOT is_active, updated_at = ? WHERE id = ?")
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Tent not found"));
    }
    find_by_id(pool, id).await?.ok_or(AppError::Internal)
}

/// Delete a tent. Refused while any order references it — deactivate instead.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<Tent, AppError> {
    let tent = find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Tent not found"))?;

    let (order_count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM orders WHERE tent_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if order_count > 0 {
        return Err(AppError::validation(
            "Cannot delete a tent with existing orders. Deactivate it instead.",
        ));
    }

    sqlx::query("DELETE FROM tents WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(tent)
}
