//! Story entity model and DTOs.

use serde::{Deserialize, Serialize};
use sideludi_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `stories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a story.
#[derive(Debug)]
pub struct CreateStory {
    pub title: String,
    pub content: String,
}

/// DTO for updating a story. Absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStory {
    pub title: Option<String>,
    pub content: Option<String>,
}
