//! Repository for the `photos` table.

use sideludi_core::types::DbId;
use sqlx::PgPool;

use crate::models::photo::{CreatePhoto, Photo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, url, photo_section_id, created_at, updated_at";

/// Provides CRUD operations for photos.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a new photo, returning the created row.
    ///
    /// Fails with a foreign-key violation if the section does not exist.
    pub async fn create(pool: &PgPool, input: &CreatePhoto) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (url, photo_section_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(&input.url)
            .bind(input.photo_section_id)
            .fetch_one(pool)
            .await
    }

    /// Find a photo by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = $1");
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the photos of one section, oldest first.
    pub async fn list_by_section(
        pool: &PgPool,
        section_id: DbId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM photos
             WHERE photo_section_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(section_id)
            .fetch_all(pool)
            .await
    }

    /// List the photos of several sections, oldest first.
    pub async fn list_by_sections(
        pool: &PgPool,
        section_ids: &[DbId],
    ) -> Result<Vec<Photo>, sqlx::Error> {
        if section_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM photos
             WHERE photo_section_id = ANY($1)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(section_ids)
            .fetch_all(pool)
            .await
    }

    /// Delete a photo row. The stored file stays on disk.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
