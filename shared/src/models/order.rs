//! Order Model
//!
//! Orders are created exclusively by the placement transaction; afterwards
//! only `status`/`courier_id` (status workflow) and `payment_status`
//! (payment callback) change. `total_amount` and the line-item price
//! snapshots are immutable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::role::Role;

/// Order lifecycle status (closed set — unknown values are rejected at the
/// API boundary instead of being stored as free text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    New,
    InDelivery,
    Delivered,
    Cancelled,
}

/// Payment status (mutated only by the payment stub)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub tent_id: i64,
    /// Σ(unit_price × quantity) at creation time
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub courier_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One cart line in a placement request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// POST /api/orders body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub tent_number: String,
    pub items: Vec<CartItem>,
    pub payment_method: Option<String>,
}

/// Placement response: the created order plus the payment-initiation
/// reference
#[derive(Debug, Clone, Serialize)]
pub struct PlacedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub payment_url: String,
}

/// PUT /api/orders/{id}/status body
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Line item as embedded in order listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDetail {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    /// Price snapshot taken at order time
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Order as returned by GET /api/orders — joined with tent number, courier
/// name and line items
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub tent_number: String,
    pub courier_name: Option<String>,
    pub items: Vec<OrderItemDetail>,
}

impl OrderStatus {
    /// Whether `actor` may move an order into this status.
    ///
    /// Admin/operator set anything; couriers only `in_delivery` (which also
    /// claims the order for them — see the status workflow).
    pub fn settable_by(&self, actor: Role) -> bool {
        match actor {
            Role::Admin | Role::Operator => true,
            Role::Courier => matches!(self, OrderStatus::InDelivery),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn courier_may_only_set_in_delivery() {
        assert!(OrderStatus::InDelivery.settable_by(Role::Courier));
        assert!(!OrderStatus::Delivered.settable_by(Role::Courier));
        assert!(!OrderStatus::Cancelled.settable_by(Role::Courier));
        assert!(OrderStatus::Delivered.settable_by(Role::Operator));
        assert!(OrderStatus::Cancelled.settable_by(Role::Admin));
    }

    #[test]
    fn status_serializes_snake_case() {
        let s = serde_json::to_string(&OrderStatus::InDelivery).unwrap();
        assert_eq!(s, "\"in_delivery\"");
        assert!(serde_json::from_str::<OrderStatus>("\"teleported\"").is_err());
    }
}
