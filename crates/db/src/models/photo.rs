//! Photo section and photo models and DTOs.

use serde::{Deserialize, Serialize};
use sideludi_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `photo_sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSection {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A section together with all of its photos, oldest photo first.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoSectionWithPhotos {
    #[serde(flatten)]
    pub section: PhotoSection,
    pub photos: Vec<Photo>,
}

/// DTO for creating a photo section.
#[derive(Debug, Deserialize)]
pub struct CreatePhotoSection {
    pub title: String,
}

/// DTO for updating a photo section. Absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePhotoSection {
    pub title: Option<String>,
}

/// A row from the `photos` table.
///
/// `url` points at an uploaded file; nothing checks that the file exists.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: DbId,
    pub url: String,
    pub photo_section_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an uploaded photo.
#[derive(Debug)]
pub struct CreatePhoto {
    pub url: String,
    pub photo_section_id: DbId,
}
