//! Image Provider Abstraction.
//!
//! Two interchangeable backends behind [`ImageProvider`]:
//! - [`TaskProvider`]: submits to a task-based API and polls for the result.
//! - [`SyncProvider`]: renders in one call and stores the bytes.
//!
//! Both fold the character sheet into the prompt and append their own style
//! suffix before dispatch. Degraded backends resolve to placeholder
//! results (see `comicflow_core::mock`) instead of errors.

use async_trait::async_trait;
use comicflow_core::consistency::{inject_character, CharacterSheet};
use comicflow_core::generation::GenerationResult;

use crate::error::ProviderError;

mod sync;
mod task;

pub use sync::{SyncProvider, SYNC_STYLE_SUFFIX};
pub use task::{TaskProvider, TASK_STYLE_SUFFIX};

#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Prompt for a storyboard panel from its description, camera and mood.
    fn panel_prompt(&self, description: &str, camera: &str, mood: &str) -> String;

    /// Start (or complete) a generation. Never fails; a degraded backend
    /// yields a placeholder result.
    async fn generate(
        &self,
        prompt: &str,
        character: Option<&CharacterSheet<'_>>,
    ) -> GenerationResult;

    /// Current state of a task returned by [`ImageProvider::generate`].
    async fn check_status(&self, task_id: &str) -> Result<GenerationResult, ProviderError>;

    /// Release anything this provider stored for `image_url` when the result
    /// will not be kept. Providers that store nothing locally ignore it.
    async fn discard(&self, _image_url: &str) {}
}

/// Prompt as dispatched: character clauses, then the provider's suffix.
fn dispatch_prompt(prompt: &str, character: Option<&CharacterSheet<'_>>, suffix: &str) -> String {
    format!("{}{suffix}", inject_character(prompt, character))
}
