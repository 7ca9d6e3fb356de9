//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod photo_repo;
pub mod photo_section_repo;
pub mod session_repo;
pub mod story_repo;
pub mod user_repo;

pub use photo_repo::PhotoRepo;
pub use photo_section_repo::PhotoSectionRepo;
pub use session_repo::SessionRepo;
pub use story_repo::StoryRepo;
pub use user_repo::UserRepo;
