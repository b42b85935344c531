//! Batch Materializer: one canvas panel per storyboard.
//!
//! Storyboards are processed strictly in sequence order, one provider call
//! at a time. Panels are staged in memory and committed in a single
//! write at the end, so an error anywhere in the loop leaves the project
//! untouched and the images already stored for staged panels are discarded.
//! A storyboard whose generation yields no image is skipped and reported in
//! [`BatchOutcome::skipped_storyboard_ids`].

use comicflow_core::error::CoreError;
use comicflow_core::panel::{DEFAULT_POSITION, STORYBOARD_PANEL_HEIGHT, STORYBOARD_PANEL_WIDTH};
use comicflow_core::types::DbId;
use comicflow_db::models::comic_image::{ComicImage, CreateComicImage};
use comicflow_db::models::storyboard::Storyboard;
use serde::Serialize;

use crate::error::PipelineError;
use crate::provider::ImageProvider;
use crate::store::{ensure_access, ComicStore};

/// Result of a batch run.
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    /// Created panels, in storyboard order.
    pub images: Vec<ComicImage>,
    /// Storyboards left without a panel.
    pub skipped_storyboard_ids: Vec<DbId>,
}

pub struct BatchMaterializer<'a> {
    store: &'a dyn ComicStore,
    provider: &'a dyn ImageProvider,
}

impl<'a> BatchMaterializer<'a> {
    pub fn new(store: &'a dyn ComicStore, provider: &'a dyn ImageProvider) -> Self {
        Self { store, provider }
    }

    /// Generate a panel for every storyboard of `project_id`.
    ///
    /// Fails with `Forbidden` when the caller has no access and `NotFound`
    /// when the project has no storyboards; both before any generation.
    pub async fn materialize_all(
        &self,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<BatchOutcome, PipelineError> {
        ensure_access(self.store, project_id, user_id).await?;

        let mut storyboards = self.store.list_storyboards(project_id).await?;
        if storyboards.is_empty() {
            return Err(CoreError::NotFound {
                entity: "Storyboards for project",
                id: project_id,
            }
            .into());
        }
        storyboards.sort_by_key(|sb| (sb.sequence, sb.id));

        let mut staged = Vec::with_capacity(storyboards.len());
        let mut skipped = Vec::new();

        for sb in &storyboards {
            match self.render(project_id, sb).await {
                Ok(Some(panel)) => staged.push((sb.id, panel)),
                Ok(None) => {
                    tracing::warn!(project_id, storyboard_id = sb.id, "No image produced, storyboard skipped");
                    skipped.push(sb.id);
                }
                Err(e) => {
                    self.discard(&staged).await;
                    return Err(e);
                }
            }
        }

        let images = if staged.is_empty() {
            Vec::new()
        } else {
            match self.store.commit_panels(&staged).await {
                Ok(images) => images,
                Err(e) => {
                    self.discard(&staged).await;
                    return Err(e.into());
                }
            }
        };

        tracing::info!(
            project_id,
            created = images.len(),
            skipped = skipped.len(),
            "Batch generation finished",
        );

        Ok(BatchOutcome {
            images,
            skipped_storyboard_ids: skipped,
        })
    }

    /// Drop the images of panels that will not be committed.
    async fn discard(&self, staged: &[(DbId, CreateComicImage)]) {
        tracing::warn!(count = staged.len(), "Batch rolled back, discarding staged images");
        for (_, panel) in staged {
            if let Some(url) = &panel.image_url {
                self.provider.discard(url).await;
            }
        }
    }

        /// Generate one storyboard's panel, resolving a pending task once.
    async fn render(
        &self,
        project_id: DbId,
        sb: &Storyboard,
    ) -> Result<Option<CreateComicImage>, PipelineError> {
        let prompt = self.provider.panel_prompt(
            &sb.description,
            sb.camera.as_deref().unwrap_or_default(),
            sb.mood.as_deref().unwrap_or_default(),
        );

        let generated = self.provider.generate(&prompt, None).await;
        let dispatched_prompt = generated.prompt.clone();
        let result = if generated.is_pending() {
            self.provider.check_status(&generated.task_id).await?
        } else {
            generated
        };

        let Some(image_url) = result.final_image_url() else {
            return Ok(None);
        };

        let (position_x, position_y) = DEFAULT_POSITION;
        Ok(Some(CreateComicImage {
            project_id,
            character_template_id: None,
            prompt: dispatched_prompt,
            image_url: Some(image_url.to_string()),
            provider_task_id: Some(result.task_id.clone()),
            status: result.status,
            position_x,
            position_y,
            width: STORYBOARD_PANEL_WIDTH,
            height: STORYBOARD_PANEL_HEIGHT,
            layer_order: sb.sequence,
        }))
    }
}
