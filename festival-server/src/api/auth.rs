//! Authentication endpoints

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use shared::AppError;
use shared::models::UserPublic;

use crate::auth::jwt;
use crate::db;
use crate::state::AppState;
use crate::util::verify_password;

use super::ApiResult;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(login))
}

/// POST /api/auth/login body
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(serde::Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPublic,
}

/// POST /api/auth/login
///
/// One failure message for both unknown usernames and wrong passwords, so
/// the endpoint can't be used to enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = db::users::find_by_username(&state.db.read, &req.username)
        .await
        .map_err(AppError::from)?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::create_token(&user, &state.jwt_secret).map_err(|e| {
        tracing::error!(error = %e, "JWT creation failed");
        AppError::Internal
    })?;

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}
