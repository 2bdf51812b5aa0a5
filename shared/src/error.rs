//! 统一错误处理
//!
//! Every failure leaving the API is serialized as `{"error": "<message>"}`
//! with the matching 4xx/5xx status. Handlers and the db layer return
//! [`AppError`] and rely on `?`; `sqlx::Error` converts into the opaque
//! `Internal` variant after being logged, so no store detail ever reaches a
//! client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    // ========== Authorization (403) ==========
    #[error("{0}")]
    Forbidden(String),

    // ========== Business logic (4xx) ==========
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// Aggregated per-line availability failures from order placement.
    /// All offending lines are reported in one response, newline-joined.
    #[error("{}", .0.join("\n"))]
    Stock(Vec<String>),

    // ========== System (500) ==========
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidToken | AppError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::Stock(_) => StatusCode::BAD_REQUEST,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(feature = "db")]
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::Internal
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

/// Whether a sqlx error is a UNIQUE constraint violation.
///
/// Call sites translate these into a specific validation message instead of
/// the generic internal-failure envelope (e.g. duplicate tent numbers).
#[cfg(feature = "db")]
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

/// Result type for operations surfacing to the API
pub type AppResult<T> = Result<T, AppError>;
