//! Server-side sessions referenced by the `sid` cookie.
//!
//! A session maps an opaque random id to a user id for a fixed TTL. The id
//! goes to the client in an HttpOnly cookie; stores only keep its SHA-256
//! digest, so a leaked table cannot be replayed as cookies.
//!
//! Two [`SessionStore`] backends exist: [`PgSessionStore`] (shared by every
//! server instance) and [`MemorySessionStore`] (single process, lost on
//! restart).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use sideludi_core::types::{DbId, Timestamp};
use sideludi_db::models::session::CreateSession;
use sideludi_db::repositories::SessionRepo;
use sideludi_db::DbPool;
use tokio::sync::RwLock;
use tower_cookies::cookie::time::Duration as CookieDuration;
use tower_cookies::cookie::SameSite;
use tower_cookies::Cookie;
use uuid::Uuid;

use crate::error::AppResult;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sid";

/// Default session lifetime in hours.
const DEFAULT_TTL_HOURS: i64 = 24;

/// Which [`SessionStore`] implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Postgres,
    Memory,
}

/// Session lifetime and cookie settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    /// Session lifetime in hours, independent of the bearer-token expiry.
    pub ttl_hours: i64,
    /// Send the cookie with `Secure` (production only).
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var             | Default    |
    /// |---------------------|------------|
    /// | `SESSION_STORE`     | `postgres` |
    /// | `SESSION_TTL_HOURS` | `24`       |
    /// | `APP_ENV`           | --         |
    ///
    /// `APP_ENV=production` turns on the `Secure` cookie attribute.
    pub fn from_env() -> Self {
        let backend = match std::env::var("SESSION_STORE")
            .unwrap_or_else(|_| "postgres".into())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" => SessionBackend::Postgres,
            "memory" => SessionBackend::Memory,
            other => panic!("SESSION_STORE must be 'postgres' or 'memory', got '{other}'"),
        };

        let ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_TTL_HOURS.to_string())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");

        let cookie_secure = std::env::var("APP_ENV").is_ok_and(|v| v == "production");

        Self {
            backend,
            ttl_hours,
            cookie_secure,
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.ttl_hours)
    }
}

/// Generate a new opaque session id (64 hex chars, 244 random bits).
pub fn generate_session_id() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Compute the SHA-256 hex digest of a session id.
pub fn hash_session_id(session_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(session_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Build the cookie that hands a new session id to the client.
pub fn session_cookie(session_id: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::hours(config.ttl_hours))
        .build()
}

/// Build a cookie that matches [`session_cookie`] for removal.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Storage for session id → user id mappings with expiry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a session for `user_id` and return the plaintext session id.
    async fn create(&self, user_id: DbId, ttl: chrono::Duration) -> AppResult<String>;

    /// Return the user of an active, unexpired session.
    async fn resolve(&self, session_id: &str) -> AppResult<Option<DbId>>;

    /// End a session. Unknown ids are ignored.
    async fn destroy(&self, session_id: &str) -> AppResult<()>;
}

/// Build the store selected by configuration.
pub fn build_store(config: &SessionConfig, pool: DbPool) -> Arc<dyn SessionStore> {
    match config.backend {
        SessionBackend::Postgres => Arc::new(PgSessionStore::new(pool)),
        SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
    }
}

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

/// Sessions persisted in the `user_sessions` table.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: DbPool,
}

impl PgSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, user_id: DbId, ttl: chrono::Duration) -> AppResult<String> {
        let session_id = generate_session_id();
        let input = CreateSession {
            user_id,
            session_hash: hash_session_id(&session_id),
            expires_at: Utc::now() + ttl,
        };
        SessionRepo::create(&self.pool, &input).await?;
        Ok(session_id)
    }

    async fn resolve(&self, session_id: &str) -> AppResult<Option<DbId>> {
        let session =
            SessionRepo::find_active_by_hash(&self.pool, &hash_session_id(session_id)).await?;
        Ok(session.map(|s| s.user_id))
    }

    async fn destroy(&self, session_id: &str) -> AppResult<()> {
        SessionRepo::delete_by_hash(&self.pool, &hash_session_id(session_id)).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local session map. Expired entries are dropped when read.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, (DbId, Timestamp)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions. Expired ones linger until the next read of
    /// that id or the next `create`.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: DbId, ttl: chrono::Duration) -> AppResult<String> {
        let session_id = generate_session_id();
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        // Sweep expired entries so abandoned sessions do not pile up.
        sessions.retain(|_, (_, expires_at)| *expires_at > now);
        sessions.insert(hash_session_id(&session_id), (user_id, now + ttl));
        Ok(session_id)
    }

    async fn resolve(&self, session_id: &str) -> AppResult<Option<DbId>> {
        let key = hash_session_id(session_id);

        let entry = self.sessions.read().await.get(&key).copied();
        match entry {
            Some((user_id, expires_at)) if expires_at > Utc::now() => Ok(Some(user_id)),
            Some(_) => {
                self.sessions.write().await.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn destroy(&self, session_id: &str) -> AppResult<()> {
        self.sessions
            .write()
            .await
            .remove(&hash_session_id(session_id));
        Ok(())
    }
}
