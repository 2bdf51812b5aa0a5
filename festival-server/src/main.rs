//! festival-server — 音乐节餐饮配送后端
//!
//! Long-running service that:
//! - Serves the public ordering flow (tent QR -> cart -> order)
//! - Manages the catalog, tents and courier messaging for staff
//! - Handles inventory replenishment requests with atomic stock updates

use festival_server::api;
use festival_server::config::Config;
use festival_server::db::{DbService, users};
use festival_server::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "festival_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting festival-server (env: {})", config.environment);

    // Make sure the database directory exists
    if let Some(parent) = std::path::Path::new(&config.database_path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = DbService::new(&config.database_path).await?;

    // First boot: seed the default staff accounts
    users::ensure_default_accounts(&db, &config.default_admin_password).await?;

    let state = AppState::new(db, &config);
    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("festival-server HTTP listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
