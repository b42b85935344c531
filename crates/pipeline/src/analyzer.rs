//! Story Analyzer: story text to an ordered list of scenes.
//!
//! With a text backend configured, the model is asked once for a JSON
//! storyboard. Any backend error or unusable reply falls through to the
//! heuristic splitter, so analysis itself never fails.

use std::sync::Arc;

use comicflow_core::parser::parse_scenes;
use comicflow_core::scene::SceneDescriptor;
use comicflow_core::story::{analysis_prompt, heuristic_scenes, normalize_model_scenes};
use comicflow_genai::TextGenerator;

pub struct StoryAnalyzer {
    text: Option<Arc<dyn TextGenerator>>,
}

impl StoryAnalyzer {
    pub fn new(text: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { text }
    }

    /// Analyzer without a text backend (heuristic path only).
    pub fn heuristic() -> Self {
        Self { text: None }
    }

    /// Split `story_text` into 2 to 8 scenes numbered from 1.
    pub async fn analyze(&self, story_text: &str) -> Vec<SceneDescriptor> {
        if let Some(text) = &self.text {
            match text.generate_text(&analysis_prompt(story_text)).await {
                Ok(raw) => match parse_scenes(&raw).and_then(normalize_model_scenes) {
                    Some(scenes) => {
                        tracing::info!(scenes = scenes.len(), "Story analyzed by text backend");
                        return scenes;
                    }
                    None => tracing::warn!(
                        reason = "unparseable_response",
                        response_chars = raw.chars().count(),
                        "Text backend reply unusable, using heuristic analysis",
                    ),
                },
                Err(e) => tracing::warn!(
                    reason = "backend_error",
                    error = %e,
                    "Text backend unavailable, using heuristic analysis",
                ),
            }
        }

        let scenes = heuristic_scenes(story_text);
        tracing::debug!(scenes = scenes.len(), "Story analyzed heuristically");
        scenes
    }
}
