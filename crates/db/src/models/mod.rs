//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` create/update DTOs where the API accepts input
//!
//! Content entities serialize with camelCase keys, which is what the
//! frontend reads.

pub mod photo;
pub mod session;
pub mod story;
pub mod user;
