//! Product database operations

use shared::AppError;
use shared::models::{Product, ProductCreate, ProductUpdate, StockAdjustment, StockOperation};
use shared::money::{cents_to_decimal, decimal_to_cents};
use sqlx::SqlitePool;

use crate::util::now_millis;

/// Raw row — price as stored (integer cents)
#[derive(Debug, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock_quantity: i64,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            id: r.id,
            name: r.name,
            description: r.description,
            price: cents_to_decimal(r.price),
            stock_quantity: r.stock_quantity,
            is_active: r.is_active,
            created_at: r.created_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, description, price, stock_quantity, is_active, created_at";

/// List products.
///
/// `include_hidden` (admin/operator view) also returns inactive and
/// out-of-stock items; the public view only sees what can be ordered.
pub async fn list(pool: &SqlitePool, include_hidden: bool) -> Result<Vec<Product>, AppError> {
    let sql = if include_hidden {
        format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name")
    } else {
        format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE is_active = 1 AND stock_quantity > 0 ORDER BY name"
        )
    };
    let rows: Vec<ProductRow> = sqlx::query_as(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Product::from).collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Product>, AppError> {
    let row: Option<ProductRow> =
        sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(Product::from))
}

pub async fn create(pool: &SqlitePool, data: &ProductCreate) -> Result<Product, AppError> {
    let price = decimal_to_cents(data.price)
        .ok_or_else(|| AppError::validation("Price must be a non-negative amount"))?;
    let stock = data.stock_quantity.unwrap_or(0).max(0);

    let result = sqlx::query(
        "INSERT INTO products (name, description, price, stock_quantity, is_active, created_at) \
         VALUES (?, ?, ?, ?, 1, ?)",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(price)
    .bind(stock)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal)
}

pub async fn update(pool: &SqlitePool, id: i64, data: &ProductUpdate) -> Result<Product, AppError> {
    let price = decimal_to_cents(data.price)
        .ok_or_else(|| AppError::validation("Price must be a non-negative amount"))?;

    let result = sqlx::query(
        "UPDATE products SET name = ?, description = ?, price = ?, stock_quantity = ? WHERE id = ?",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(price)
    .bind(data.stock_quantity.max(0))
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }
    find_by_id(pool, id).await?.ok_or(AppError::Internal)
}

/// Manual stock adjustment (set/add/subtract), clamped at zero.
pub async fn adjust_stock(
    pool: &SqlitePool,
    id: i64,
    adjustment: &StockAdjustment,
) -> Result<Product, AppError> {
    let result = match adjustment.operation {
        StockOperation::Set => {
            let value = adjustment
                .new_value
                .ok_or_else(|| AppError::validation("newValue is required for operation 'set'"))?;
            sqlx::query("UPDATE products SET stock_quantity = MAX(0, ?) WHERE id = ?")
                .bind(value)
                .bind(id)
                .execute(pool)
                .await?
        }
        StockOperation::Add => {
            let amount = adjustment
                .amount
                .ok_or_else(|| AppError::validation("amount is required for operation 'add'"))?;
            sqlx::query(
                "UPDATE products SET stock_quantity = MAX(0, stock_quantity + ?) WHERE id = ?",
            )
            .bind(amount)
            .bind(id)
            .execute(pool)
            .await?
        }
        StockOperation::Subtract => {
            let amount = adjustment.amount.ok_or_else(|| {
                AppError::validation("amount is required for operation 'subtract'")
            })?;
            sqlx::query(
                "UPDATE products SET stock_quantity = MAX(0, stock_quantity - ?) WHERE id = ?",
            )
            .bind(amount)
            .bind(id)
            .execute(pool)
            .await?
        }
    };

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }
    find_by_id(pool, id).await?.ok_or(AppError::Internal)
}

pub async fn toggle_active(pool: &SqlitePool, id: i64) -> Result<Product, AppError> {
    let result = sqlx::query("UPDATE products SET is_active = NOT is_active WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }
    find_by_id(pool, id).await?.ok_or(AppError::Internal)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<Product, AppError> {
    let product = find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(product)
}
