//! Repository for the `projects` table.

use comicflow_core::types::DbId;
use sqlx::PgPool;

/// Access queries over projects. Project CRUD lives with the project service.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Whether `user_id` owns or collaborates on `project_id`.
    ///
    /// A project that does not exist grants no access.
    pub async fn has_access(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM projects p
                WHERE p.id = $1
                  AND (p.owner_id = $2
                       OR EXISTS (SELECT 1 FROM project_collaborators pc
                                  WHERE pc.project_id = p.id AND pc.user_id = $2))
             )",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
