//! Handlers for the `/stories` resource.
//!
//! Story analysis, storyboard persistence and batch panel generation.

use axum::extract::{Path, State};
use axum::Json;
use comicflow_core::panel::BATCH_COMPLETE_MESSAGE;
use comicflow_core::scene::SceneDescriptor;
use comicflow_core::types::DbId;
use comicflow_db::models::storyboard::Storyboard;
use comicflow_pipeline::materializer::BatchOutcome;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ApiJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub story_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub scenes: Vec<SceneDescriptor>,
}

#[derive(Debug, Deserialize)]
pub struct SaveStoryboardsRequest {
    pub project_id: Option<DbId>,
    #[serde(default)]
    pub scenes: Vec<SceneDescriptor>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateAllRequest {
    pub project_id: Option<DbId>,
}

/// `{message, images, skipped_storyboard_ids}`.
#[derive(Debug, Serialize)]
pub struct GenerateAllResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

fn require_project_id(project_id: Option<DbId>) -> AppResult<DbId> {
    project_id.ok_or_else(|| AppError::BadRequest("project_id is required".into()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/stories/analyze
pub async fn analyze(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<AnalyzeRequest>,
) -> AppResult<Json<AnalyzeResponse>> {
    let story_text = input.story_text.unwrap_or_default();
    tracing::debug!(user_id = user.user_id, chars = story_text.chars().count(), "Analyzing story");
    let scenes = state.pipeline.analyze_story(&story_text).await?;
    Ok(Json(AnalyzeResponse { scenes }))
}

/// POST /api/stories/save
///
/// Replaces every storyboard of the project with the submitted scenes.
pub async fn save(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<SaveStoryboardsRequest>,
) -> AppResult<Json<Vec<Storyboard>>> {
    let project_id = require_project_id(input.project_id)?;
    let saved = state
        .pipeline
        .save_storyboards(user.user_id, project_id, &input.scenes)
        .await?;
    Ok(Json(saved))
}

/// POST /api/stories/generate_all
pub async fn generate_all(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<GenerateAllRequest>,
) -> AppResult<Json<GenerateAllResponse>> {
    let project_id = require_project_id(input.project_id)?;
    let outcome = state.pipeline.generate_all(user.user_id, project_id).await?;
    Ok(Json(GenerateAllResponse {
        message: BATCH_COMPLETE_MESSAGE,
        outcome,
    }))
}

/// GET /api/stories/list/{project_id}
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Storyboard>>> {
    let storyboards = state
        .pipeline
        .list_storyboards(user.user_id, project_id)
        .await?;
    Ok(Json(storyboards))
}
