//! Inventory Request Model
//!
//! Replenishment requests move `pending -> approved | rejected` exactly once
//! and are terminal afterwards.

use serde::{Deserialize, Serialize};

/// Request lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum InventoryStatus {
    Pending,
    Approved,
    Rejected,
}

/// Inventory replenishment request entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryRequest {
    pub id: i64,
    pub courier_id: i64,
    pub product_id: i64,
    pub requested_quantity: i64,
    pub approved_quantity: Option<i64>,
    pub status: InventoryStatus,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Request as listed for reviewers — joined with courier and product names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryRequestDetail {
    pub id: i64,
    pub courier_id: i64,
    pub courier_name: String,
    pub product_id: i64,
    pub product_name: String,
    pub requested_quantity: i64,
    pub approved_quantity: Option<i64>,
    pub status: InventoryStatus,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// POST /api/inventory-requests body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRequestCreate {
    pub product_id: i64,
    pub requested_quantity: i64,
}
