use std::sync::Arc;

use comicflow_pipeline::ComicPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, when running against PostgreSQL. Only the
    /// health check uses it directly; everything else goes through the pipeline.
    pub pool: Option<comicflow_db::DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Storyboard and image generation pipeline.
    pub pipeline: Arc<ComicPipeline>,
}
