//! Bearer-token generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. They are
//! self-contained: nothing server-side can revoke one before `exp`.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sideludi_core::types::DbId;
use uuid::Uuid;

/// JWT claims embedded in every bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in hours (default: 24).
    pub expiry_hours: i64,
}

/// Default token expiry in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 24;

/// Secret used when `JWT_SECRET` is unset. Anyone who reads this source can
/// forge tokens for a server running with it.
const INSECURE_FALLBACK_SECRET: &str = "sideludi-insecure-development-secret";

impl JwtConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var            | Required | Default                 |
    /// |--------------------|----------|-------------------------|
    /// | `JWT_SECRET`       | no       | insecure built-in value |
    /// | `JWT_EXPIRY_HOURS` | no       | `24`                    |
    pub fn from_env() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                tracing::warn!(
                    "JWT_SECRET is not set; falling back to a built-in secret. \
                     Set JWT_SECRET before exposing this server."
                );
                INSECURE_FALLBACK_SECRET.to_string()
            }
        };

        let expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            expiry_hours,
        }
    }

    /// Token lifetime in seconds.
    pub fn expires_in_secs(&self) -> i64 {
        self.expiry_hours * 3600
    }
}

/// Generate an HS256 bearer token for the given user.
pub fn generate_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        exp: now + config.expires_in_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a bearer token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
