//! JWT validation for tokens issued by the external identity provider.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;

use palmares_core::types::DbId;

/// JWT validation configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret shared with the identity provider.
    pub secret: String,
}

impl JwtConfig {
    /// Load from `JWT_SECRET`, with a development-only default.
    pub fn from_env() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into()),
        }
    }
}

/// Claims carried by an access token.
#[derive(Debug, Deserialize)]
pub struct Claims {
    /// The user's internal database id.
    pub sub: DbId,
    /// Expiry, seconds since epoch.
    pub exp: usize,
}

/// Validate an access token, returning its claims.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
