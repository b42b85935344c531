//! Repository for the `comic_images` table.

use comicflow_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::comic_image::{ComicImage, CreateComicImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, character_template_id, prompt, image_url, \
    provider_task_id, status, position_x, position_y, width, height, layer_order, created_at";

/// Provides comic image persistence.
pub struct ComicImageRepo;

impl ComicImageRepo {
    /// Insert one panel per storyboard and link each storyboard to it.
    ///
    /// All inserts and links share one transaction: either every panel is
    /// stored and linked, or nothing is. Returns the panels in input order.
    pub async fn create_for_storyboards(
        pool: &PgPool,
        panels: &[(DbId, CreateComicImage)],
    ) -> Result<Vec<ComicImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(panels.len());

        for (storyboard_id, input) in panels {
            let image = Self::insert(&mut tx, input).await?;

            sqlx::query(
                "UPDATE storyboards SET comic_image_id = $2, updated_at = NOW()
                 WHERE id = $1 AND project_id = $3",
            )
            .bind(storyboard_id)
            .bind(image.id)
            .bind(image.project_id)
            .execute(&mut *tx)
            .await?;

            created.push(image);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn insert(
        conn: &mut PgConnection,
        input: &CreateComicImage,
    ) -> Result<ComicImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO comic_images
                (project_id, character_template_id, prompt, image_url, provider_task_id,
                 status, position_x, position_y, width, height, layer_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ComicImage>(&query)
            .bind(input.project_id)
            .bind(input.character_template_id)
            .bind(&input.prompt)
            .bind(&input.image_url)
            .bind(&input.provider_task_id)
            .bind(input.status.as_str())
            .bind(input.position_x)
            .bind(input.position_y)
            .bind(input.width)
            .bind(input.height)
            .bind(input.layer_order)
            .fetch_one(&mut *conn)
            .await
    }
}
