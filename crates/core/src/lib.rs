//! Domain logic shared by the database and API crates.
//!
//! Nothing in here touches the network, the database or the filesystem.

pub mod content;
pub mod counter;
pub mod credentials;
pub mod error;
pub mod types;
pub mod upload;
