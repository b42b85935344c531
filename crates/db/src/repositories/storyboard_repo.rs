//! Repository for the `storyboards` table.

use comicflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::storyboard::{CreateStoryboard, Storyboard};

/// Select list joined with the linked panel's URL.
const JOINED_COLUMNS: &str = "s.id, s.project_id, s.sequence, s.description, s.camera, \
    s.dialogue, s.mood, s.comic_image_id, c.image_url, s.created_at";

/// Returning list for inserts; a fresh storyboard has no panel yet.
const RETURNING_COLUMNS: &str = "id, project_id, sequence, description, camera, \
    dialogue, mood, comic_image_id, NULL::VARCHAR AS image_url, created_at";

/// Provides storyboard persistence.
pub struct StoryboardRepo;

impl StoryboardRepo {
    /// List a project's storyboards in materialization order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Storyboard>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM storyboards s
             LEFT JOIN comic_images c ON c.id = s.comic_image_id
             WHERE s.project_id = $1
             ORDER BY s.sequence ASC, s.id ASC"
        );
        sqlx::query_as::<_, Storyboard>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Replace every storyboard of a project with `inputs`, in one transaction.
    ///
    /// Returns the inserted rows in input order.
    pub async fn replace_for_project(
        pool: &PgPool,
        project_id: DbId,
        inputs: &[CreateStoryboard],
    ) -> Result<Vec<Storyboard>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM storyboards WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let query = format!(
            "INSERT INTO storyboards (project_id, sequence, description, camera, dialogue, mood)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {RETURNING_COLUMNS}"
        );

        let mut saved = Vec::with_capacity(inputs.len());
        for input in inputs {
            let row = sqlx::query_as::<_, Storyboard>(&query)
                .bind(project_id)
                .bind(input.sequence)
                .bind(&input.description)
                .bind(&input.camera)
                .bind(&input.dialogue)
                .bind(&input.mood)
                .fetch_one(&mut *tx)
                .await?;
            saved.push(row);
        }

        tx.commit().await?;

        tracing::debug!(
            project_id,
            deleted,
            inserted = saved.len(),
            "Replaced project storyboards"
        );
        Ok(saved)
    }
}
