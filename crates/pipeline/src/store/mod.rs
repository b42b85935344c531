//! Persistence seam for the pipeline.
//!
//! [`ComicStore`] is the narrow set of reads and writes the pipeline needs.
//! [`PgComicStore`] backs it with the repositories; [`MemoryStore`] keeps
//! everything in process for tests and local runs without a database.

use async_trait::async_trait;
use comicflow_core::error::CoreError;
use comicflow_core::types::DbId;
use comicflow_db::models::character_template::CharacterTemplate;
use comicflow_db::models::comic_image::{ComicImage, CreateComicImage};
use comicflow_db::models::storyboard::{CreateStoryboard, Storyboard};

use crate::error::PipelineError;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgComicStore;

#[async_trait]
pub trait ComicStore: Send + Sync {
    /// Whether `user_id` may read and write `project_id`.
    async fn has_access(&self, project_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error>;

    /// A project's storyboards ordered by sequence, with linked image URLs.
    async fn list_storyboards(&self, project_id: DbId) -> Result<Vec<Storyboard>, sqlx::Error>;

    /// Discard all of a project's storyboards and insert `scenes`, atomically.
    async fn replace_storyboards(
        &self,
        project_id: DbId,
        scenes: &[CreateStoryboard],
    ) -> Result<Vec<Storyboard>, sqlx::Error>;

    async fn character_template(&self, id: DbId) -> Result<Option<CharacterTemplate>, sqlx::Error>;

    /// Insert one panel per storyboard and link it, atomically.
    async fn commit_panels(
        &self,
        panels: &[(DbId, CreateComicImage)],
    ) -> Result<Vec<ComicImage>, sqlx::Error>;
}

/// Fail with `Forbidden` unless the caller may access the project.
pub async fn ensure_access(
    store: &dyn ComicStore,
    project_id: DbId,
    user_id: DbId,
) -> Result<(), PipelineError> {
    if store.has_access(project_id, user_id).await? {
        return Ok(());
    }
    tracing::warn!(project_id, user_id, "Project access denied");
    Err(CoreError::Forbidden("No access to this project".to_string()).into())
}
