//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
///
/// | Env var | Default | 说明 |
/// |---------|---------|------|
/// | DATABASE_PATH | data/festival.db | SQLite 数据库文件 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | JWT_SECRET | (dev fallback) | 令牌签名密钥 |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | DEFAULT_ADMIN_PASSWORD | admin123 | 首次启动时创建的管理员密码 |
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT signing secret
    pub jwt_secret: String,
    /// Environment: development | staging | production
    pub environment: String,
    /// Password for the seeded admin/courier accounts
    pub default_admin_password: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/festival.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment,
            default_admin_password: std::env::var("DEFAULT_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".into()),
        })
    }
}
