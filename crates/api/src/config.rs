use sideludi_core::types::Timestamp;

use crate::auth::jwt::JwtConfig;
use crate::session::SessionConfig;
use crate::storage::UploadConfig;

/// Start of the relationship shown by the counter when `RELATIONSHIP_START`
/// is unset.
const DEFAULT_RELATIONSHIP_START: &str = "2025-05-10T15:42:00-03:00";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bearer token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Session store and cookie configuration.
    pub session: SessionConfig,
    /// Upload directory and public URL prefix.
    pub uploads: UploadConfig,
    /// Instant the relationship counter counts from.
    pub relationship_start: Timestamp,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                      |
    /// |------------------------|------------------------------|
    /// | `HOST`                 | `0.0.0.0`                    |
    /// | `PORT`                 | `3001`                       |
    /// | `CORS_ORIGINS`         | `http://localhost:8080`      |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                         |
    /// | `RELATIONSHIP_START`   | `2025-05-10T15:42:00-03:00`  |
    ///
    /// See [`JwtConfig::from_env`], [`SessionConfig::from_env`] and
    /// [`UploadConfig::from_env`] for the nested settings.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8080".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let relationship_start = parse_start(
            &std::env::var("RELATIONSHIP_START")
                .unwrap_or_else(|_| DEFAULT_RELATIONSHIP_START.into()),
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            session: SessionConfig::from_env(),
            uploads: UploadConfig::from_env(),
            relationship_start,
        }
    }
}

/// Parse an RFC 3339 timestamp into UTC.
///
/// # Panics
///
/// Panics on malformed input so misconfiguration fails at startup.
fn parse_start(raw: &str) -> Timestamp {
    chrono::DateTime::parse_from_rfc3339(raw)
        .unwrap_or_else(|e| panic!("RELATIONSHIP_START must be RFC 3339 ('{raw}'): {e}"))
        .with_timezone(&chrono::Utc)
}
