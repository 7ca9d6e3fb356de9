//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- the Auth Gate: resolves the caller from a session
//!   cookie or, failing that, a bearer token.

pub mod auth;
