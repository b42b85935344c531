//! The pipeline service object handlers call.

use std::sync::Arc;

use comicflow_core::error::CoreError;
use comicflow_core::generation::GenerationResult;
use comicflow_core::scene::{validate_scene, SceneDescriptor};
use comicflow_core::types::DbId;
use comicflow_db::models::storyboard::{CreateStoryboard, Storyboard};

use crate::analyzer::StoryAnalyzer;
use crate::error::PipelineError;
use crate::materializer::{BatchMaterializer, BatchOutcome};
use crate::provider::ImageProvider;
use crate::store::{ensure_access, ComicStore};

/// Constructed once at startup and shared by every request.
pub struct ComicPipeline {
    store: Arc<dyn ComicStore>,
    analyzer: StoryAnalyzer,
    provider: Arc<dyn ImageProvider>,
}

impl ComicPipeline {
    pub fn new(
        store: Arc<dyn ComicStore>,
        analyzer: StoryAnalyzer,
        provider: Arc<dyn ImageProvider>,
    ) -> Self {
        Self {
            store,
            analyzer,
            provider,
        }
    }

    /// Analyze a story into scenes. Only an empty story is an error.
    pub async fn analyze_story(&self, story_text: &str) -> Result<Vec<SceneDescriptor>, PipelineError> {
        if story_text.trim().is_empty() {
            return Err(CoreError::Validation("story_text is required".to_string()).into());
        }
        Ok(self.analyzer.analyze(story_text).await)
    }

    /// Replace a project's storyboards with `scenes`.
    pub async fn save_storyboards(
        &self,
        user_id: DbId,
        project_id: DbId,
        scenes: &[SceneDescriptor],
    ) -> Result<Vec<Storyboard>, PipelineError> {
        for scene in scenes {
            validate_scene(scene)?;
        }
        ensure_access(self.store.as_ref(), project_id, user_id).await?;

        let inputs: Vec<CreateStoryboard> = scenes.iter().map(CreateStoryboard::from).collect();
        let saved = self.store.replace_storyboards(project_id, &inputs).await?;

        tracing::info!(project_id, user_id, saved = saved.len(), "Storyboards saved");
        Ok(saved)
    }

    /// A project's storyboards in sequence order.
    pub async fn list_storyboards(
        &self,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<Vec<Storyboard>, PipelineError> {
        ensure_access(self.store.as_ref(), project_id, user_id).await?;
        let storyboards = self.store.list_storyboards(project_id).await?;
        tracing::debug!(project_id, count = storyboards.len(), "Listed storyboards");
        Ok(storyboards)
    }

    /// Materialize every storyboard of a project as a panel.
    pub async fn generate_all(
        &self,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<BatchOutcome, PipelineError> {
        BatchMaterializer::new(self.store.as_ref(), self.provider.as_ref())
            .materialize_all(project_id, user_id)
            .await
    }

    /// Generate a single image, optionally with a character template.
    pub async fn generate_image(
        &self,
        prompt: &str,
        character_template_id: Option<DbId>,
    ) -> Result<GenerationResult, PipelineError> {
        if prompt.trim().is_empty() {
            return Err(CoreError::Validation("prompt is required".to_string()).into());
        }

        let template = match character_template_id {
            Some(id) => Some(self.store.character_template(id).await?.ok_or(
                CoreError::NotFound {
                    entity: "Character template",
                    id,
                },
            )?),
            None => None,
        };

        let sheet = template.as_ref().map(|t| t.sheet());
        let result = self.provider.generate(prompt, sheet.as_ref()).await;
        tracing::info!(
            task_id = %result.task_id,
            status = result.status.as_str(),
            character_template_id,
            "Image generation requested",
        );
        Ok(result)
    }

    /// Status of a generation task.
    pub async fn check_status(&self, task_id: &str) -> Result<GenerationResult, PipelineError> {
        if task_id.trim().is_empty() {
            return Err(CoreError::Validation("task_id is required".to_string()).into());
        }
        Ok(self.provider.check_status(task_id).await?)
    }
}
