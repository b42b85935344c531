//! Builds the pipeline service from configuration at startup.

use std::sync::Arc;

use comicflow_genai::gemini::{GeminiClient, GeminiConfig};
use comicflow_genai::storage::LocalBlobStore;
use comicflow_genai::task_api::{TaskApiClient, TaskApiConfig};
use comicflow_genai::{GenAiError, ImageGenerator, TaskBackend, TextGenerator};
use comicflow_pipeline::analyzer::StoryAnalyzer;
use comicflow_pipeline::provider::{ImageProvider, SyncProvider, TaskProvider};
use comicflow_pipeline::store::ComicStore;
use comicflow_pipeline::ComicPipeline;

use crate::config::{ProviderConfig, ProviderKind};

/// Construct the pipeline with the backends `config` enables.
///
/// Backends without an API key are left out; the analyzer and providers
/// then fall back to heuristic analysis and placeholder images.
pub fn build_pipeline(
    config: &ProviderConfig,
    store: Arc<dyn ComicStore>,
) -> Result<ComicPipeline, GenAiError> {
    let gemini = match &config.gemini_api_key {
        Some(api_key) => Some(Arc::new(GeminiClient::new(GeminiConfig {
            api_key: api_key.clone(),
            api_url: config.gemini_api_url.clone(),
            text_model: config.gemini_text_model.clone(),
            image_model: config.gemini_image_model.clone(),
            timeout: config.gemini_timeout,
        })?)),
        None => {
            tracing::warn!("GEMINI_API_KEY not set; story analysis and sync images use fallbacks");
            None
        }
    };

    let analyzer = StoryAnalyzer::new(
        gemini
            .clone()
            .map(|client| client as Arc<dyn TextGenerator>),
    );

    let provider: Arc<dyn ImageProvider> = match config.image_provider {
        ProviderKind::Sync => {
            let blobs = Arc::new(LocalBlobStore::new(
                config.upload_dir.clone(),
                config.upload_url_prefix.clone(),
            ));
            Arc::new(SyncProvider::new(
                gemini.map(|client| client as Arc<dyn ImageGenerator>),
                blobs,
                config.mock_status_mode,
            ))
        }
        ProviderKind::Task => {
            let backend = match &config.task_api_key {
                Some(api_key) => Some(Arc::new(TaskApiClient::new(TaskApiConfig {
                    api_key: api_key.clone(),
                    api_url: config.task_api_url.clone(),
                    submit_timeout: config.task_submit_timeout,
                    poll_timeout: config.task_poll_timeout,
                })) as Arc<dyn TaskBackend>),
                None => {
                    tracing::warn!("MIDJOURNEY_API_KEY not set; task images use placeholders");
                    None
                }
            };
            Arc::new(TaskProvider::new(backend, config.mock_status_mode))
        }
    };

    tracing::info!(
        image_provider = ?config.image_provider,
        mock_status_mode = ?config.mock_status_mode,
        "Generation pipeline configured",
    );

    Ok(ComicPipeline::new(store, analyzer, provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use comicflow_pipeline::store::MemoryStore;

    #[tokio::test]
    async fn unconfigured_backends_still_generate() {
        for kind in [ProviderKind::Sync, ProviderKind::Task] {
            let config = ProviderConfig {
                image_provider: kind,
                ..ProviderConfig::default()
            };
            let pipeline = build_pipeline(&config, Arc::new(MemoryStore::new())).unwrap();

            let started = pipeline.generate_image("a comet", None).await.unwrap();
            let status = pipeline.check_status(&started.task_id).await.unwrap();
            assert!(status.final_image_url().is_some());
        }
    }
}
