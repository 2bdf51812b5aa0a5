//! 目录维护流程测试
//!
//! Catalog collaborator behaviors: stock adjustment clamping, visibility
//! toggles, duplicate tent numbers and the delete guard on referenced tents.

mod common;

use common::{seed_product, seed_tent, stock_of, test_db};
use festival_server::db::{orders, products, tents};
use rust_decimal::Decimal;
use shared::AppError;
use shared::models::{
    CartItem, OrderRequest, ProductCreate, StockAdjustment, StockOperation, TentCreate, TentUpdate,
};

#[tokio::test]
async fn product_create_rejects_negative_prices() {
    let (_dir, db) = test_db().await;

    let err = products::create(
        &db.write,
        &ProductCreate {
            name: "Bad".to_string(),
            description: None,
            price: Decimal::new(-100, 2),
            stock_quantity: Some(1),
        },
    )
    .await
    .expect_err("negative price");
    assert!(matches!(err, AppError::Validation(_)));

    let product = products::create(
        &db.write,
        &ProductCreate {
            name: "Neko-Active".to_string(),
            description: Some("Wet wipes".to_string()),
            price: Decimal::new(50_000, 2),
            stock_quantity: Some(10),
        },
    )
    .await
    .expect("creation");
    assert_eq!(product.price, Decimal::new(50_000, 2));
    assert!(product.is_active);
}

#[tokio::test]
async fn stock_adjustments_clamp_at_zero() {
    let (_dir, db) = test_db().await;
    let product_id = seed_product(&db, "Neko-Active", 50_000, 10).await;

    let adjusted = products::adjust_stock(
        &db.write,
        product_id,
        &StockAdjustment {
            operation: StockOperation::Subtract,
            amount: Some(25),
            new_value: None,
        },
    )
    .await
    .expect("subtract");
    assert_eq!(adjusted.stock_quantity, 0, "clamped, not negative");

    let adjusted = products::adjust_stock(
        &db.write,
        product_id,
        &StockAdjustment {
            operation: StockOperation::Add,
            amount: Some(7),
            new_value: None,
        },
    )
    .await
    .expect("add");
    assert_eq!(adjusted.stock_quantity, 7);

    let err = products::adjust_stock(
        &db.write,
        product_id,
        &StockAdjustment {
            operation: StockOperation::Set,
            amount: None,
            new_value: None,
        },
    )
    .await
    .expect_err("set without newValue");
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(stock_of(&db, product_id).await, 7);
}

#[tokio::test]
async fn duplicate_tent_numbers_are_a_validation_error() {
    let (_dir, db) = test_db().await;

    let tent = tents::create(
        &db.write,
        &TentCreate {
            tent_number: "A-01".to_string(),
            location_description: Some("First row, left side".to_string()),
            zone: Some("Zone A".to_string()),
            capacity: None,
            contact_name: None,
            contact_phone: None,
            notes: None,
        },
    )
    .await
    .expect("creation");
    assert_eq!(tent.capacity, 4);
    assert_eq!(tent.qr_code.as_deref(), Some("A-01"));

    let err = tents::create(
        &db.write,
        &TentCreate {
            tent_number: "A-01".to_string(),
            location_description: None,
            zone: None,
            capacity: None,
            contact_name: None,
            contact_phone: None,
            notes: None,
        },
    )
    .await
    .expect_err("duplicate number");
    match err {
        AppError::Validation(msg) => assert!(msg.contains("already exists")),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn renumbering_a_tent_refreshes_its_qr_payload() {
    let (_dir, db) = test_db().await;
    let tent_id = seed_tent(&db, "A-01").await;

    let updated = tents::update(
        &db.write,
        tent_id,
        &TentUpdate {
            tent_number: Some("A-02".to_string()),
            ..TentUpdate::default()
        },
    )
    .await
    .expect("update");
    assert_eq!(updated.tent_number, "A-02");
    assert_eq!(updated.qr_code.as_deref(), Some("A-02"));

    // Partial update leaves other fields untouched
    let updated = tents::update(
        &db.write,
        tent_id,
        &TentUpdate {
            zone: Some("VIP".to_string()),
            ..TentUpdate::default()
        },
    )
    .await
    .expect("update");
    assert_eq!(updated.tent_number, "A-02");
    assert_eq!(updated.zone.as_deref(), Some("VIP"));
}

#[tokio::test]
async fn tents_with_orders_cannot_be_deleted() {
    let (_dir, db) = test_db().await;
    let tent_id = seed_tent(&db, "A-01").await;
    let product_id = seed_product(&db, "Neko-Active", 50_000, 10).await;

    orders::place_order(
        &db,
        &OrderRequest {
            tent_number: "A-01".to_string(),
            items: vec![CartItem { product_id, quantity: 1 }],
            payment_method: None,
        },
    )
    .await
    .expect("placement");

    let err = tents::delete(&db.write, tent_id)
        .await
        .expect_err("delete must be refused");
    match err {
        AppError::Validation(msg) => assert!(msg.contains("Deactivate")),
        other => panic!("expected Validation, got {other:?}"),
    }

    // Deactivation is the supported path
    let tent = tents::toggle_active(&db.write, tent_id).await.expect("toggle");
    assert!(!tent.is_active);
}
