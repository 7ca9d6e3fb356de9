//! Repository for the `stories` table.

use sideludi_core::content::{DEFAULT_STORY_CONTENT, DEFAULT_STORY_TITLE};
use sideludi_core::types::DbId;
use sqlx::PgPool;

use crate::models::story::{CreateStory, Story, UpdateStory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, created_at, updated_at";

/// Provides CRUD operations for stories.
///
/// Only one story is expected. Nothing in the schema enforces that; readers
/// always take the first row by id.
pub struct StoryRepo;

impl StoryRepo {
    /// Insert a new story, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStory) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories (title, content)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find the first story in storage order.
    pub async fn find_first(pool: &PgPool) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories ORDER BY id ASC LIMIT 1");
        sqlx::query_as::<_, Story>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Return the first story, creating the default one if the table is empty.
    ///
    /// Not atomic: two callers racing on an empty table can both insert.
    /// Later reads still agree because they all pick the lowest id.
    pub async fn get_or_create_default(pool: &PgPool) -> Result<Story, sqlx::Error> {
        if let Some(story) = Self::find_first(pool).await? {
            return Ok(story);
        }

        let story = Self::create(
            pool,
            &CreateStory {
                title: DEFAULT_STORY_TITLE.to_string(),
                content: DEFAULT_STORY_CONTENT.to_string(),
            },
        )
        .await?;
        tracing::info!(story_id = story.id, "Created default story");
        Ok(story)
    }

    /// Find a story by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a story. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Concurrent
    /// updates are last-write-wins.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStory,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "UPDATE stories SET
                title = COALESCE($2, title),
                content = COALESCE($3, content)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Count all stories.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM stories")
            .fetch_one(pool)
            .await
    }
}
