//! Application state

use crate::config::Config;
use crate::db::DbService;

/// Shared application state
///
/// Handed to every handler via axum `State`; cloning is cheap (pools are
/// internally reference-counted). The store handle is passed explicitly into
/// each operation — there is no module-global connection.
#[derive(Clone)]
pub struct AppState {
    /// SQLite service (read/write pools)
    pub db: DbService,
    /// JWT signing secret
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(db: DbService, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt_secret.clone(),
        }
    }
}
