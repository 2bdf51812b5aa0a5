//! Database Module
//!
//! Handles SQLite connection pools and migrations.
//!
//! Two pools over the same file: a read pool and a single-connection write
//! pool. Every transactional mutation goes through the write pool, so write
//! transactions serialize at the pool instead of surfacing SQLITE_BUSY to
//! handlers; reads scale on the read pool under WAL.

pub mod inventory;
pub mod messages;
pub mod orders;
pub mod products;
pub mod tents;
pub mod users;

use shared::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

/// Database service — owns the SQLite connection pools
#[derive(Clone)]
pub struct DbService {
    /// Read pool (concurrent readers, WAL snapshots)
    pub read: SqlitePool,
    /// Write pool (max_connections = 1 — the single writer)
    pub write: SqlitePool,
}

impl DbService {
    /// Open the database, apply pragmas and run migrations
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        // Build connection options: WAL, foreign keys, normal sync
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| {
                tracing::error!(error = %e, "Invalid database path");
                AppError::Internal
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON")
            // busy_timeout: 写冲突时等待 5s 而非立即失败
            .pragma("busy_timeout", "5000");

        let write = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;

        let read = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        // Run migrations on the writer
        sqlx::migrate!("./migrations").run(&write).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to apply migrations");
            AppError::Internal
        })?;
        tracing::info!("Database migrations applied");

        Ok(Self { read, write })
    }
}
