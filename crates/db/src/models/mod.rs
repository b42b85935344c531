//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts where the core writes that table

pub mod character_template;
pub mod comic_image;
pub mod storyboard;
