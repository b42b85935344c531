//! Comic image (canvas panel) models and DTOs.

use comicflow_core::generation::GenerationStatus;
use comicflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A comic image row from the `comic_images` table.
///
/// `layer_order` decides stacking on the canvas; panels created from a
/// storyboard start with the storyboard's sequence.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ComicImage {
    pub id: DbId,
    pub project_id: DbId,
    pub character_template_id: Option<DbId>,
    /// Final prompt sent to the provider.
    pub prompt: String,
    pub image_url: Option<String>,
    /// Provider task id; named after the original task API on the wire.
    #[serde(rename = "midjourney_task_id")]
    pub provider_task_id: Option<String>,
    pub status: String,
    pub position_x: i32,
    pub position_y: i32,
    pub width: i32,
    pub height: i32,
    pub layer_order: i32,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for inserting a comic image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateComicImage {
    pub project_id: DbId,
    pub character_template_id: Option<DbId>,
    pub prompt: String,
    pub image_url: Option<String>,
    pub provider_task_id: Option<String>,
    pub status: GenerationStatus,
    pub position_x: i32,
    pub position_y: i32,
    pub width: i32,
    pub height: i32,
    pub layer_order: i32,
}
