use async_trait::async_trait;
use comicflow_core::types::DbId;
use comicflow_db::models::character_template::CharacterTemplate;
use comicflow_db::models::comic_image::{ComicImage, CreateComicImage};
use comicflow_db::models::storyboard::{CreateStoryboard, Storyboard};
use comicflow_db::repositories::{CharacterTemplateRepo, ComicImageRepo, ProjectRepo, StoryboardRepo};
use comicflow_db::DbPool;

use super::ComicStore;

/// [`ComicStore`] over PostgreSQL.
#[derive(Clone)]
pub struct PgComicStore {
    pool: DbPool,
}

impl PgComicStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComicStore for PgComicStore {
    async fn has_access(&self, project_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        ProjectRepo::has_access(&self.pool, project_id, user_id).await
    }

    async fn list_storyboards(&self, project_id: DbId) -> Result<Vec<Storyboard>, sqlx::Error> {
        StoryboardRepo::list_for_project(&self.pool, project_id).await
    }

    async fn replace_storyboards(
        &self,
        project_id: DbId,
        scenes: &[CreateStoryboard],
    ) -> Result<Vec<Storyboard>, sqlx::Error> {
        StoryboardRepo::replace_for_project(&self.pool, project_id, scenes).await
    }

    async fn character_template(&self, id: DbId) -> Result<Option<CharacterTemplate>, sqlx::Error> {
        CharacterTemplateRepo::find_by_id(&self.pool, id).await
    }

    async fn commit_panels(
        &self,
        panels: &[(DbId, CreateComicImage)],
    ) -> Result<Vec<ComicImage>, sqlx::Error> {
        ComicImageRepo::create_for_storyboards(&self.pool, panels).await
    }
}
