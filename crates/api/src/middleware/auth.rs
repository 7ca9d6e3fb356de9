//! The Auth Gate: an Axum extractor every protected handler takes.
//!
//! Evidence is gathered from the request and handed to
//! [`resolve_credential`], which applies the precedence rule: an active
//! session wins, and only without one is the `Authorization` header read.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use sideludi_core::credentials::{resolve_credential, Credential};
use sideludi_core::error::AuthError;
use sideludi_core::types::DbId;
use tower_cookies::Cookies;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::session::SESSION_COOKIE;
use crate::state::AppState;

/// How the caller proved who they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    Session,
    Bearer,
}

/// Authenticated caller, resolved from a session cookie or a bearer token.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// Which credential established the identity.
    pub source: AuthSource,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_user = session_user(parts, state).await?;

        // A non-UTF-8 header cannot split into a valid scheme and token.
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .map(|v| v.to_str().unwrap_or_default());

        match resolve_credential(session_user, authorization)? {
            Credential::Session { user_id } => Ok(AuthUser {
                user_id,
                source: AuthSource::Session,
            }),
            Credential::Bearer(token) => {
                let claims = validate_token(token, &state.config.jwt).map_err(|e| {
                    tracing::debug!(error = %e, "Rejected bearer token");
                    AuthError::InvalidToken
                })?;
                Ok(AuthUser {
                    user_id: claims.sub,
                    source: AuthSource::Bearer,
                })
            }
        }
    }
}

/// Look up the user of the session named by the `sid` cookie, if any.
async fn session_user(parts: &mut Parts, state: &AppState) -> AppResult<Option<DbId>> {
    let cookies = Cookies::from_request_parts(parts, state)
        .await
        .map_err(|(_, msg)| AppError::InternalError(msg.to_string()))?;

    match cookies.get(SESSION_COOKIE) {
        Some(cookie) => state.sessions.resolve(cookie.value()).await,
        None => Ok(None),
    }
}
