//! Request extractors for authenticated identity

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::AppError;
use shared::models::Role;

use crate::auth::jwt;
use crate::state::AppState;

/// Authenticated user identity, extracted from the bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    fn from_claims(claims: jwt::Claims) -> Result<Self, AppError> {
        let id = claims.sub.parse().map_err(|_| AppError::InvalidToken)?;
        Ok(Self {
            id,
            username: claims.username,
            role: claims.role,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Reuse if another extractor already validated this request
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;

        let claims = jwt::verify_token(token, &state.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "JWT validation failed");
            AppError::InvalidToken
        })?;

        let user = CurrentUser::from_claims(claims)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

/// Optional identity: `None` for anonymous or invalid tokens.
///
/// The public catalog uses this — an operator token widens the listing, a
/// missing or stale one silently degrades to the public view.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = bearer_token(parts)
            .and_then(|token| jwt::verify_token(token, &state.jwt_secret).ok())
            .and_then(|claims| CurrentUser::from_claims(claims).ok());
        Ok(MaybeUser(user))
    }
}
