//! Credential evidence and the precedence rule that picks one per request.
//!
//! A request can carry two kinds of evidence: a server-side session
//! (referenced by a cookie) and a bearer token in the `Authorization`
//! header. [`resolve_credential`] applies the fixed order:
//!
//! 1. An active session wins outright. The header is not inspected.
//! 2. Otherwise the header must hold `Bearer <token>`.
//!
//! Verifying the token signature is left to the caller, which owns the key.

use crate::error::AuthError;
use crate::types::DbId;

/// Expected authorization scheme, compared case-insensitively.
pub const BEARER_SCHEME: &str = "Bearer";

/// The evidence chosen to authenticate a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential<'a> {
    /// An active session already resolved to its user.
    Session { user_id: DbId },
    /// A raw bearer token that still needs signature and expiry checks.
    Bearer(&'a str),
}

/// Pick the credential for a request.
///
/// `session_user` is the user of an active, unexpired session if the caller
/// presented one. `authorization` is the raw `Authorization` header value.
pub fn resolve_credential<'a>(
    session_user: Option<DbId>,
    authorization: Option<&'a str>,
) -> Result<Credential<'a>, AuthError> {
    if let Some(user_id) = session_user {
        return Ok(Credential::Session { user_id });
    }

    let header = authorization.ok_or(AuthError::MissingToken)?;
    parse_authorization(header).map(Credential::Bearer)
}

/// Split an `Authorization` header into its token.
///
/// The header must be exactly two space-separated parts and the first must
/// be the bearer scheme in any letter case.
pub fn parse_authorization(header: &str) -> Result<&str, AuthError> {
    let parts: Vec<&str> = header.split(' ').collect();
    let [scheme, token] = parts.as_slice() else {
        return Err(AuthError::MalformedToken);
    };

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::MalformedToken);
    }

    Ok(*token)
}
