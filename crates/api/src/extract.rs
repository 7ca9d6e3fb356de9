//! Request extractors with JSON error bodies.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `Json<T>` for request bodies, rejecting with [`AppError`] so malformed
/// input gets the same `{message, code}` body as every other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path<T>` with the same JSON rejection, so a non-numeric id is a
/// `{message, code}` 400 rather than plain text.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
