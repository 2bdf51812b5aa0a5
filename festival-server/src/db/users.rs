//! User database operations

use shared::models::{Role, User};
use sqlx::SqlitePool;

use crate::util::{hash_password, now_millis};

use super::DbService;

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, username, email, password_hash, role, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, username, email, password_hash, role, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
    role: Role,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO users (username, email, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Seed the default admin and courier accounts on first boot.
///
/// Mirrors the bootstrap the operation expects: an empty users table gets
/// `admin` and `courier1`, both with the configured default password.
pub async fn ensure_default_accounts(
    db: &DbService,
    default_password: &str,
) -> Result<(), shared::AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&db.read)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let hash = hash_password(default_password).map_err(|e| {
        tracing::error!(error = %e, "Failed to hash default password");
        shared::AppError::Internal
    })?;

    insert(&db.write, "admin", "admin@festival.com", &hash, Role::Admin).await?;
    tracing::info!("Default admin user created (username: admin)");

    insert(
        &db.write,
        "courier1",
        "courier1@festival.com",
        &hash,
        Role::Courier,
    )
    .await?;
    tracing::info!("Default courier user created (username: courier1)");

    Ok(())
}
