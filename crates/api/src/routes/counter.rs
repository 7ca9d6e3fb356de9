use axum::routing::get;
use axum::Router;

use crate::handlers::counter;
use crate::state::AppState;

/// Routes mounted at `/counter`.
///
/// ```text
/// GET /  -> get
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(counter::get))
}
