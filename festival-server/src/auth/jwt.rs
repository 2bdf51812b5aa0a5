//! JWT 令牌服务
//!
//! HS256 bearer tokens. Token issuance/verification is deliberately plain —
//! the interesting authorization rules live in [`shared::models::Role`].

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::models::{Role, User};

const TOKEN_EXPIRY_HOURS: i64 = 24;

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Username
    pub username: String,
    /// Role
    pub role: Role,
    /// Expiration (Unix timestamp seconds)
    pub exp: i64,
    /// Issued at (Unix timestamp seconds)
    pub iat: i64,
}

/// Issue a token for a user
pub fn create_token(user: &User, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        exp: (now + chrono::Duration::hours(TOKEN_EXPIRY_HOURS)).timestamp(),
        iat: now.timestamp(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token and return its claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::default();
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}
