//! Handlers for single-image generation under `/comics`.

use axum::extract::{Path, State};
use axum::Json;
use comicflow_core::generation::GenerationResult;
use comicflow_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: Option<String>,
    pub character_template_id: Option<DbId>,
}

/// POST /api/comics/generate
///
/// Returns the provider result as-is: a pending task or a finished image.
pub async fn generate(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<GenerateImageRequest>,
) -> AppResult<Json<GenerationResult>> {
    let prompt = input.prompt.unwrap_or_default();
    tracing::debug!(user_id = user.user_id, "Generating single image");
    let result = state
        .pipeline
        .generate_image(&prompt, input.character_template_id)
        .await?;
    Ok(Json(result))
}

/// GET /api/comics/status/{task_id}
pub async fn status(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(task_id): Path<String>,
) -> AppResult<Json<GenerationResult>> {
    let result = state.pipeline.check_status(&task_id).await?;
    Ok(Json(result))
}
