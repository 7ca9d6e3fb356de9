use std::sync::Arc;

use crate::config::ServerConfig;
use crate::session::SessionStore;
use crate::storage::UploadStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sideludi_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Server-side session store backing the `sid` cookie.
    pub sessions: Arc<dyn SessionStore>,
    /// Disk storage for uploaded photos.
    pub uploads: Arc<UploadStorage>,
}
