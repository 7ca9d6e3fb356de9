pub mod auth;
pub mod counter;
pub mod photos;
pub mod story;
