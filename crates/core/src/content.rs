//! Content defaults and input rules for the story and the gallery.

use crate::error::CoreError;

/// Title of the story created when none exists yet.
pub const DEFAULT_STORY_TITLE: &str = "Our Story";

/// Content of the story created when none exists yet.
pub const DEFAULT_STORY_CONTENT: &str = "Write your story here...";

/// Title of the first photo section created by the seed binary.
pub const DEFAULT_SECTION_TITLE: &str = "Main Gallery";

/// Longest accepted story or section title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Titles must contain something other than whitespace and fit the limit.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate an optional title from a partial update.
pub fn validate_optional_title(title: Option<&str>) -> Result<(), CoreError> {
    title.map_or(Ok(()), validate_title)
}
