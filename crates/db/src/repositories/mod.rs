//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod character_template_repo;
pub mod comic_image_repo;
pub mod project_repo;
pub mod storyboard_repo;

pub use character_template_repo::CharacterTemplateRepo;
pub use comic_image_repo::ComicImageRepo;
pub use project_repo::ProjectRepo;
pub use storyboard_repo::StoryboardRepo;
