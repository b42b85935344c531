//! Storyboard models and DTOs.
//!
//! A storyboard is one saved narrative beat. Rows are replaced wholesale when
//! a project's story is saved again, and gain a `comic_image_id` once a panel
//! has been generated for them.

use comicflow_core::scene::SceneDescriptor;
use comicflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A storyboard row from the `storyboards` table, joined with the image URL
/// of its linked panel.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Storyboard {
    pub id: DbId,
    pub project_id: DbId,
    pub sequence: i32,
    pub description: String,
    pub camera: Option<String>,
    pub dialogue: Option<String>,
    pub mood: Option<String>,
    /// Panel generated for this storyboard, if any.
    pub comic_image_id: Option<DbId>,
    /// `image_url` of the linked panel (not a column of `storyboards`).
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for inserting a storyboard.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStoryboard {
    pub sequence: i32,
    pub description: String,
    pub camera: Option<String>,
    pub dialogue: Option<String>,
    pub mood: Option<String>,
}

impl From<&SceneDescriptor> for CreateStoryboard {
    fn from(scene: &SceneDescriptor) -> Self {
        fn non_empty(value: &str) -> Option<String> {
            (!value.is_empty()).then(|| value.to_string())
        }
        Self {
            sequence: scene.sequence,
            description: scene.description.clone(),
            camera: non_empty(&scene.camera),
            dialogue: non_empty(&scene.dialogue),
            mood: non_empty(&scene.mood),
        }
    }
}
