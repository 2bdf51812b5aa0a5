//! Product Model
//!
//! 价格以 Decimal 出现在 API 边界，存储层用整数分 (integer cents)。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Unit price, two decimal places
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock_quantity: i64,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock_quantity: Option<i64>,
}

/// Full update payload (PUT semantics — every field required)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Negative values are clamped to zero
    pub stock_quantity: i64,
}

/// Stock adjustment operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockOperation {
    Set,
    Add,
    Subtract,
}

/// PATCH /api/products/{id}/stock payload
#[derive(Debug, Clone, Deserialize)]
pub struct StockAdjustment {
    pub operation: StockOperation,
    pub amount: Option<i64>,
    #[serde(rename = "newValue")]
    pub new_value: Option<i64>,
}
