//! Character template entity model.

use comicflow_core::consistency::CharacterSheet;
use comicflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A character template row from the `character_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterTemplate {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// JSON object of trait name to trait value, in stored order.
    pub features: Option<serde_json::Value>,
    /// JSON array of reference image URLs.
    pub reference_images: Option<serde_json::Value>,
    pub owner_id: DbId,
    pub created_at: Timestamp,
}

impl CharacterTemplate {
    /// The prompt-relevant parts of this template.
    ///
    /// A `features` value that is not a JSON object contributes no traits.
    pub fn sheet(&self) -> CharacterSheet<'_> {
        CharacterSheet {
            description: self.description.as_deref(),
            features: self.features.as_ref().and_then(serde_json::Value::as_object),
        }
    }
}
