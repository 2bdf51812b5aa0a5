//! Shared types for the festival delivery backend
//!
//! 这个 crate 只放两类东西：
//! - **models**: 领域模型和请求/响应 payload (serde)
//! - **error**: 统一错误类型 [`AppError`] 和 `{"error": ...}` 响应封装
//!
//! Database derives are feature-gated behind `db` so clients that only need
//! the wire types don't pull in sqlx.

pub mod error;
pub mod models;
pub mod money;

pub use error::{AppError, AppResult};
