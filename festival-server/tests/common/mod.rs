//! Shared test fixtures: a scratch database plus seed helpers.

#![allow(dead_code)]

use festival_server::auth::CurrentUser;
use festival_server::db::DbService;
use festival_server::util::now_millis;
use shared::models::Role;
use tempfile::TempDir;

/// Fresh migrated database in a temp directory. Keep the TempDir alive for
/// the duration of the test — dropping it deletes the files.
pub async fn test_db() -> (TempDir, DbService) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("test.db");
    let db = DbService::new(path.to_str().expect("utf-8 path"))
        .await
        .expect("failed to open test database");
    (dir, db)
}

pub async fn seed_product(db: &DbService, name: &str, price_cents: i64, stock: i64) -> i64 {
    sqlx::query(
        "INSERT INTO products (name, description, price, stock_quantity, is_active, created_at) \
         VALUES (?, NULL, ?, ?, 1, ?)",
    )
    .bind(name)
    .bind(price_cents)
    .bind(stock)
    .bind(now_millis())
    .execute(&db.write)
    .await
    .expect("failed to seed product")
    .last_insert_rowid()
}

pub async fn seed_tent(db: &DbService, tent_number: &str) -> i64 {
    let now = now_millis();
    sqlx::query(
        "INSERT INTO tents (tent_number, qr_code, capacity, is_active, created_at, updated_at) \
         VALUES (?, ?, 4, 1, ?, ?)",
    )
    .bind(tent_number)
    .bind(tent_number)
    .bind(now)
    .bind(now)
    .execute(&db.write)
    .await
    .expect("failed to seed tent")
    .last_insert_rowid()
}

/// Insert a user with an unusable password hash and return it as an
/// authenticated identity. Login-path tests hash a real password instead.
pub async fn seed_user(db: &DbService, username: &str, role: Role) -> CurrentUser {
    let id = festival_server::db::users::insert(
        &db.write,
        username,
        &format!("{username}@festival.com"),
        "x",
        role,
    )
    .await
    .expect("failed to seed user");
    CurrentUser {
        id,
        username: username.to_string(),
        role,
    }
}

pub async fn stock_of(db: &DbService, product_id: i64) -> i64 {
    let (stock,): (i64,) = sqlx::query_as("SELECT stock_quantity FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_one(&db.read)
        .await
        .expect("failed to read stock");
    stock
}

pub async fn count_rows(db: &DbService, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&db.read)
        .await
        .expect("failed to count rows");
    count
}
