//! Festival Delivery Server - 音乐节餐饮配送后端
//!
//! # 模块结构
//!
//! ```text
//! festival-server/src/
//! ├── config.rs      # 环境变量配置
//! ├── state.rs       # 共享应用状态
//! ├── auth/          # JWT 认证、请求提取器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (SQLite via sqlx)
//! └── util.rs        # 工具函数 (时间戳、密码哈希)
//! ```
//!
//! The interesting parts live in `db/orders.rs` (the placement transaction
//! with its conditional stock decrement) and `db/inventory.rs` (the
//! pending-guarded approval that increments stock atomically).

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod state;
pub mod util;

// Re-export public types
pub use config::Config;
pub use db::DbService;
pub use state::AppState;
