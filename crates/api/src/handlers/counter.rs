//! Handler for the public relationship counter.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use sideludi_core::counter::{elapsed_since, Elapsed};
use sideludi_core::types::Timestamp;

use crate::state::AppState;

/// Counter payload: the configured start plus the elapsed breakdown.
#[derive(Debug, Serialize)]
pub struct CounterResponse {
    pub since: Timestamp,
    #[serde(flatten)]
    pub elapsed: Elapsed,
}

/// GET /api/counter
pub async fn get(State(state): State<AppState>) -> Json<CounterResponse> {
    let since = state.config.relationship_start;
    Json(CounterResponse {
        since,
        elapsed: elapsed_since(since, chrono::Utc::now()),
    })
}
