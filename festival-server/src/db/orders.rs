//! Order database operations
//!
//! `place_order` is the only writer of orders/order_items and the only stock
//! *decrementer* in the system. It runs as one transaction on the single
//! writer: tent check, per-line validation, total computation, inserts and
//! the conditional stock decrements either all commit or all vanish.

use std::collections::HashMap;

use shared::AppError;
use shared::models::{
    Order, OrderDetail, OrderItemDetail, OrderRequest, OrderStatus, PaymentStatus, PlacedOrder,
    Role,
};
use shared::money::cents_to_decimal;
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::util::now_millis;

use super::DbService;

/// Raw order row — amounts as stored (integer cents)
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    tent_id: i64,
    total_amount: i64,
    status: OrderStatus,
    payment_status: PaymentStatus,
    payment_method: Option<String>,
    courier_id: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl From<OrderRow> for Order {
    fn from(r: OrderRow) -> Self {
        Order {
            id: r.id,
            tent_id: r.tent_id,
            total_amount: cents_to_decimal(r.total_amount),
            status: r.status,
            payment_status: r.payment_status,
            payment_method: r.payment_method,
            courier_id: r.courier_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const ORDER_COLUMNS: &str = "id, tent_id, total_amount, status, payment_status, payment_method, \
                             courier_id, created_at, updated_at";

/// A cart line that passed validation: (product_id, name, quantity, unit
/// price in cents)
struct ValidatedLine {
    product_id: i64,
    name: String,
    quantity: i64,
    unit_price: i64,
}

/// Place an order: validate the cart, compute the total from current catalog
/// prices, persist header + lines and reserve stock — all or nothing.
///
/// Every early return drops the transaction, which rolls it back.
pub async fn place_order(db: &DbService, req: &OrderRequest) -> Result<PlacedOrder, AppError> {
    if req.items.is_empty() {
        return Err(AppError::validation("Order must contain at least one item"));
    }

    let mut tx = db.write.begin().await?;

    // 1. Resolve the tent
    let tent: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM tents WHERE tent_number = ? AND is_active = 1")
            .bind(&req.tent_number)
            .fetch_optional(&mut *tx)
            .await?;
    let Some((tent_id,)) = tent else {
        return Err(AppError::not_found("Tent not found or inactive"));
    };

    // 2. Validate every line, accumulating failures instead of stopping at
    //    the first one — the caller gets the complete list.
    let mut errors: Vec<String> = Vec::new();
    let mut lines: Vec<ValidatedLine> = Vec::new();

    for item in &req.items {
        if item.quantity <= 0 {
            errors.push(format!(
                "Invalid quantity {} for product {}",
                item.quantity, item.product_id
            ));
            continue;
        }

        let product: Option<(i64, String, i64, i64)> = sqlx::query_as(
            "SELECT id, name, price, stock_quantity FROM products WHERE id = ? AND is_active = 1",
        )
        .bind(item.product_id)
        .fetch_optional(&mut *tx)
        .await?;

        match product {
            None => errors.push(format!(
                "Product {} not found or unavailable",
                item.product_id
            )),
            Some((id, name, price, stock)) => {
                if stock < item.quantity {
                    errors.push(format!(
                        "Insufficient stock for \"{name}\": {stock} available, {} requested",
                        item.quantity
                    ));
                } else {
                    lines.push(ValidatedLine {
                        product_id: id,
                        name,
                        quantity: item.quantity,
                        unit_price: price,
                    });
                }
            }
        }
    }

    if !errors.is_empty() {
        return Err(AppError::Stock(errors));
    }

    // 3. Total from the catalog prices just read — caller-supplied prices
    //    never enter the calculation.
    let total_amount: i64 = lines.iter().map(|l| l.quantity * l.unit_price).sum();
    let now = now_millis();

    // 4. Persist header, lines and stock decrements
    let order_id = sqlx::query(
        "INSERT INTO orders (tent_id, total_amount, status, payment_status, payment_method, \
         created_at, updated_at) VALUES (?, ?, 'new', 'pending', ?, ?, ?)",
    )
    .bind(tent_id)
    .bind(total_amount)
    .bind(&req.payment_method)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for line in &lines {
        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, quantity, unit_price, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(line.unit_price)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        // Conditional decrement: the WHERE clause re-checks availability so
        // the validation read above can never be the only thing standing
        // between us and negative stock.
        let decremented = sqlx::query(
            "UPDATE products SET stock_quantity = stock_quantity - ?1 \
             WHERE id = ?2 AND stock_quantity >= ?1",
        )
        .bind(line.quantity)
        .bind(line.product_id)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            return Err(AppError::Stock(vec![format!(
                "Insufficient stock for \"{}\": {} requested",
                line.name, line.quantity
            )]));
        }
    }

    tx.commit().await?;

    let order = Order {
        id: order_id,
        tent_id,
        total_amount: cents_to_decimal(total_amount),
        status: OrderStatus::New,
        payment_status: PaymentStatus::Pending,
        payment_method: req.payment_method.clone(),
        courier_id: None,
        created_at: now,
        updated_at: now,
    };

    Ok(PlacedOrder {
        payment_url: format!("/api/payment/{order_id}"),
        order,
    })
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Order>, AppError> {
    let row: Option<OrderRow> =
        sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(Order::from))
}

/// List orders for a viewer.
///
/// Couriers see unassigned orders plus their own; everyone else sees all.
/// Each order embeds its line items joined with product names.
pub async fn list_for_viewer(
    pool: &SqlitePool,
    viewer: &CurrentUser,
) -> Result<Vec<OrderDetail>, AppError> {
    let courier_scope = matches!(viewer.role, Role::Courier);

    let base = "SELECT o.id, o.tent_id, o.total_amount, o.status, o.payment_status, \
                o.payment_method, o.courier_id, o.created_at, o.updated_at, \
                t.tent_number, u.username AS courier_name \
                FROM orders o \
                JOIN tents t ON o.tent_id = t.id \
                LEFT JOIN users u ON o.courier_id = u.id";
    let sql = if courier_scope {
        format!("{base} WHERE o.courier_id IS NULL OR o.courier_id = ? ORDER BY o.created_at DESC, o.id DESC")
    } else {
        format!("{base} ORDER BY o.created_at DESC, o.id DESC")
    };

    #[derive(sqlx::FromRow)]
    struct ListedRow {
        #[sqlx(flatten)]
        order: OrderRow,
        tent_number: String,
        courier_name: Option<String>,
    }

    let mut query = sqlx::query_as::<_, ListedRow>(&sql);
    if courier_scope {
        query = query.bind(viewer.id);
    }
    let rows = query.fetch_all(pool).await?;

    // Items for all listed orders in one pass, grouped in memory
    let items_sql = if courier_scope {
        "SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name, oi.quantity, \
         oi.unit_price \
         FROM order_items oi \
         JOIN orders o ON oi.order_id = o.id \
         JOIN products p ON oi.product_id = p.id \
         WHERE o.courier_id IS NULL OR o.courier_id = ?"
    } else {
        "SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name, oi.quantity, \
         oi.unit_price \
         FROM order_items oi \
         JOIN products p ON oi.product_id = p.id"
    };

    let mut items_query =
        sqlx::query_as::<_, (i64, i64, i64, String, i64, i64)>(items_sql);
    if courier_scope {
        items_query = items_query.bind(viewer.id);
    }
    let item_rows = items_query.fetch_all(pool).await?;

    let mut item_map: HashMap<i64, Vec<OrderItemDetail>> = HashMap::new();
    for (id, order_id, product_id, product_name, quantity, unit_price) in item_rows {
        item_map.entry(order_id).or_default().push(OrderItemDetail {
            id,
            product_id,
            product_name,
            quantity,
            price: cents_to_decimal(unit_price),
        });
    }

    Ok(rows
        .into_iter()
        .map(|r| {
            let order = Order::from(r.order);
            OrderDetail {
                items: item_map.remove(&order.id).unwrap_or_default(),
                tent_number: r.tent_number,
                courier_name: r.courier_name,
                order,
            }
        })
        .collect())
}

/// Update an order's status.
///
/// A courier moving an order to `in_delivery` claims it: courier_id is set
/// to the actor in the same UPDATE. Two racing couriers both succeed and the
/// last committed write keeps the order — intentional last-write-wins.
pub async fn set_status(
    db: &DbService,
    order_id: i64,
    status: OrderStatus,
    actor: &CurrentUser,
) -> Result<Order, AppError> {
    if !status.settable_by(actor.role) {
        return Err(AppError::forbidden(
            "Couriers may only move orders to in_delivery",
        ));
    }

    let result = if matches!(actor.role, Role::Courier) {
        sqlx::query("UPDATE orders SET status = ?, courier_id = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(actor.id)
            .bind(now_millis())
            .bind(order_id)
            .execute(&db.write)
            .await?
    } else {
        sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now_millis())
            .bind(order_id)
            .execute(&db.write)
            .await?
    };

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Order not found"));
    }
    find_by_id(&db.read, order_id)
        .await?
        .ok_or(AppError::Internal)
}

/// Payment-stub callback: flip payment_status to paid.
pub async fn mark_paid(db: &DbService, order_id: i64) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE orders SET payment_status = 'paid', updated_at = ? WHERE id = ?")
        .bind(now_millis())
        .bind(order_id)
        .execute(&db.write)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Order not found"));
    }
    Ok(())
}
