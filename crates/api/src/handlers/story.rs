//! Handlers for the `/story` resource.

use axum::extract::State;
use axum::Json;
use sideludi_core::content::validate_optional_title;
use sideludi_core::error::CoreError;
use sideludi_core::types::DbId;
use sideludi_db::models::story::{Story, UpdateStory};
use sideludi_db::repositories::StoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/story
///
/// Public. Creates the default story on first read.
pub async fn get(State(state): State<AppState>) -> AppResult<Json<Story>> {
    let story = StoryRepo::get_or_create_default(&state.pool).await?;
    Ok(Json(story))
}

/// PUT /api/story/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateStory>,
) -> AppResult<Json<Story>> {
    validate_optional_title(input.title.as_deref())?;

    let story = StoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Story",
            id,
        }))?;

    tracing::info!(story_id = story.id, user_id = auth.user_id, "Story updated");
    Ok(Json(story))
}
