//! Route definitions for the `/photos` resource.
//!
//! Sections live at `/photos/{id}`; individual photos are uploaded under
//! their section and deleted through `/photos/photos/{id}`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use sideludi_core::upload::{MAX_UPLOAD_BYTES, MULTIPART_OVERHEAD_BYTES};

use crate::handlers::photos;
use crate::state::AppState;

/// Routes mounted at `/photos`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create (requires auth)
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update (requires auth)
/// DELETE /{id}            -> delete (requires auth)
/// POST   /{id}/photos     -> add_photo (requires auth, multipart)
/// DELETE /photos/{id}     -> delete_photo (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(photos::list).post(photos::create))
        .route(
            "/{id}",
            get(photos::get_by_id)
                .put(photos::update)
                .delete(photos::delete),
        )
        .route(
            "/{id}/photos",
            post(photos::add_photo).layer(DefaultBodyLimit::max(
                MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        .route("/photos/{id}", delete(photos::delete_photo))
}
