//! Repository for the `character_templates` table.

use comicflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::character_template::CharacterTemplate;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, features, reference_images, owner_id, created_at";

/// Read access to character templates.
pub struct CharacterTemplateRepo;

impl CharacterTemplateRepo {
    /// Find a character template by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CharacterTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM character_templates WHERE id = $1");
        sqlx::query_as::<_, CharacterTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
