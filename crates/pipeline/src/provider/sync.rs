use std::sync::Arc;

use async_trait::async_trait;
use comicflow_core::consistency::CharacterSheet;
use comicflow_core::generation::{GenerationResult, GenerationStatus};
use comicflow_core::mock::{is_mock_task, mock_completed, mock_status, MockStatusMode};
use comicflow_core::panel::storyboard_prompt;
use comicflow_genai::{BlobStore, GenAiError, ImageGenerator};

use super::{dispatch_prompt, ImageProvider};
use crate::error::ProviderError;

/// Style suffix appended to every synchronous prompt.
pub const SYNC_STYLE_SUFFIX: &str = ", comic panel illustration, clean line art";

const ALREADY_FINAL: &str = "Image was completed at generation time";

/// Provider backed by a synchronous image backend.
///
/// `generate` renders, stores the bytes and returns a `completed` result in
/// one round trip. `check_status` has nothing to poll.
pub struct SyncProvider {
    images: Option<Arc<dyn ImageGenerator>>,
    blobs: Arc<dyn BlobStore>,
    mock_mode: MockStatusMode,
}

impl SyncProvider {
    pub fn new(
        images: Option<Arc<dyn ImageGenerator>>,
        blobs: Arc<dyn BlobStore>,
        mock_mode: MockStatusMode,
    ) -> Self {
        Self {
            images,
            blobs,
            mock_mode,
        }
    }

    async fn render(&self, images: &dyn ImageGenerator, prompt: &str) -> Result<String, GenAiError> {
        let image = images.generate_image(prompt).await?;
        if image.bytes.is_empty() {
            return Err(GenAiError::MissingPayload("image bytes".to_string()));
        }
        self.blobs.save(&image.bytes, image.extension()).await
    }
}

#[async_trait]
impl ImageProvider for SyncProvider {
    fn panel_prompt(&self, description: &str, camera: &str, mood: &str) -> String {
        storyboard_prompt(description, camera, mood)
    }

    async fn generate(
        &self,
        prompt: &str,
        character: Option<&CharacterSheet<'_>>,
    ) -> GenerationResult {
        let prompt = dispatch_prompt(prompt, character, SYNC_STYLE_SUFFIX);

        let Some(images) = &self.images else {
            tracing::warn!(reason = "no_credential", "Image backend not configured, using mock generation");
            return mock_completed(prompt);
        };

        match self.render(images.as_ref(), &prompt).await {
            Ok(url) => {
                tracing::info!(image_url = %url, "Image generated");
                GenerationResult {
                    task_id: uuid::Uuid::new_v4().to_string(),
                    status: GenerationStatus::Completed,
                    image_url: Some(url),
                    progress: Some(100),
                    message: None,
                    prompt,
                }
            }
            Err(e) => {
                tracing::warn!(reason = "render_failed", error = %e, "Image generation failed, using mock generation");
                mock_completed(prompt)
            }
        }
    }

    async fn check_status(&self, task_id: &str) -> Result<GenerationResult, ProviderError> {
        if is_mock_task(task_id) {
            return Ok(mock_status(task_id, self.mock_mode));
        }
        Ok(GenerationResult {
            task_id: task_id.to_string(),
            status: GenerationStatus::Completed,
            image_url: None,
            progress: Some(100),
            message: Some(ALREADY_FINAL.to_string()),
            prompt: String::new(),
        })
    }

    async fn discard(&self, image_url: &str) {
        match self.blobs.delete(image_url).await {
            Ok(true) => tracing::debug!(image_url, "Discarded stored image"),
            Ok(false) => {}
            Err(e) => tracing::warn!(image_url, error = %e, "Failed to discard stored image"),
        }
    }
}
