use axum::routing::{get, put};
use axum::Router;

use crate::handlers::story;
use crate::state::AppState;

/// Routes mounted at `/story`.
///
/// ```text
/// GET /      -> get
/// PUT /{id}  -> update (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(story::get))
        .route("/{id}", put(story::update))
}
