pub mod auth;
pub mod counter;
pub mod health;
pub mod photos;
pub mod story;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                       login (public)
/// /auth/logout                      logout (requires auth)
/// /auth/check                       current user (requires auth)
///
/// /story                            get, creating the default on first read (public)
/// /story/{id}                       update (requires auth)
///
/// /photos                           list sections with photos (public), create
/// /photos/{id}                      get (public), update, delete
/// /photos/{id}/photos               upload a photo into a section (multipart)
/// /photos/photos/{id}               delete a photo
///
/// /counter                          relationship counter (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, logout, check).
        .nest("/auth", auth::router())
        // The couple's story.
        .nest("/story", story::router())
        // Photo sections and uploads.
        .nest("/photos", photos::router())
        // Time since the relationship started.
        .nest("/counter", counter::router())
}
