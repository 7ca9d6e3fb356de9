//! Repository for the `photo_sections` table.

use std::collections::HashMap;

use sideludi_core::types::DbId;
use sqlx::PgPool;

use crate::models::photo::{
    CreatePhotoSection, PhotoSection, PhotoSectionWithPhotos, UpdatePhotoSection,
};
use crate::repositories::PhotoRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, created_at, updated_at";

/// Provides CRUD operations for photo sections.
pub struct PhotoSectionRepo;

impl PhotoSectionRepo {
    /// Insert a new section, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePhotoSection,
    ) -> Result<PhotoSection, sqlx::Error> {
        let query = format!(
            "INSERT INTO photo_sections (title)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhotoSection>(&query)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// Find a section by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PhotoSection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photo_sections WHERE id = $1");
        sqlx::query_as::<_, PhotoSection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a section exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM photo_sections WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List all sections, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PhotoSection>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM photo_sections ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, PhotoSection>(&query)
            .fetch_all(pool)
            .await
    }

    /// List all sections, oldest first, each with its photos attached.
    ///
    /// Two queries regardless of gallery size; no pagination.
    pub async fn list_with_photos(
        pool: &PgPool,
    ) -> Result<Vec<PhotoSectionWithPhotos>, sqlx::Error> {
        let sections = Self::list(pool).await?;
        let ids: Vec<DbId> = sections.iter().map(|s| s.id).collect();

        let mut by_section: HashMap<DbId, Vec<_>> = HashMap::new();
        for photo in PhotoRepo::list_by_sections(pool, &ids).await? {
            by_section
                .entry(photo.photo_section_id)
                .or_default()
                .push(photo);
        }

        Ok(sections
            .into_iter()
            .map(|section| {
                let photos = by_section.remove(&section.id).unwrap_or_default();
                PhotoSectionWithPhotos { section, photos }
            })
            .collect())
    }

    /// Find a section by ID with its photos attached.
    pub async fn find_with_photos(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PhotoSectionWithPhotos>, sqlx::Error> {
        let Some(section) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let photos = PhotoRepo::list_by_section(pool, id).await?;
        Ok(Some(PhotoSectionWithPhotos { section, photos }))
    }

    /// Update a section. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePhotoSection,
    ) -> Result<Option<PhotoSection>, sqlx::Error> {
        let query = format!(
            "UPDATE photo_sections SET
                title = COALESCE($2, title)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhotoSection>(&query)
            .bind(id)
            .bind(&input.title)
            .fetch_optional(pool)
            .await
    }

    /// Delete a section and, through the foreign-key cascade, all of its
    /// photo rows. Stored files are not touched.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photo_sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
