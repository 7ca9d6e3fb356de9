//! Handlers for the `/auth` resource (login, logout, check).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use sideludi_core::error::AuthError;
use sideludi_db::models::user::UserResponse;
use sideludi_db::repositories::UserRepo;
use tower_cookies::Cookies;

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::session::{removal_cookie, session_cookie, SESSION_COOKIE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login: the bearer token plus public user info. The session
/// cookie travels in `Set-Cookie`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Response for `GET /auth/check`.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub authenticated: bool,
    pub user: UserResponse,
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Verify username + password, then issue both credentials: a bearer token
/// in the body and a session cookie. Either one authenticates on its own.
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Unknown user and wrong password share one error on purpose.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let session_id = state
        .sessions
        .create(user.id, state.config.session.ttl())
        .await?;
    cookies.add(session_cookie(session_id, &state.config.session));

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        user: UserResponse::from(&user),
        token,
    }))
}

/// POST /api/auth/logout
///
/// Ends the server-side session named by the cookie, if there is one.
/// Bearer tokens are not revoked and stay valid until they expire.
pub async fn logout(
    State(state): State<AppState>,
    cookies: Cookies,
    auth_user: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        state.sessions.destroy(cookie.value()).await?;
        cookies.remove(removal_cookie());
    }

    tracing::info!(user_id = auth_user.user_id, source = ?auth_user.source, "User logged out");

    Ok(Json(MessageResponse {
        message: "Logged out",
    }))
}

/// GET /api/auth/check
///
/// Re-resolve the identity the gate established to a current user row. A
/// token whose user has since been removed fails with `UserNotFound`.
pub async fn check(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<CheckResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(CheckResponse {
        authenticated: true,
        user: UserResponse::from(&user),
    }))
}
