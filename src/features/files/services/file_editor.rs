use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::core::error::Result;
use crate::features::files::models::File;

/// Persists changes made to a loaded [`File`].
///
/// Each operation returns the file as it now stands, or `None` when the
/// change did not apply (record gone, already deleted, not deleted).
#[async_trait]
pub trait FileEditor: Send + Sync {
    /// Store alt text and tags
    async fn save(&self, file: &File, actor: i64) -> Result<Option<File>>;

    /// Soft-delete a live file
    async fn delete(&self, file: &File, actor: i64) -> Result<Option<File>>;

    /// Bring a soft-deleted file back
    async fn restore(&self, file: &File, actor: i64) -> Result<Option<File>>;
}

/// Postgres-backed [`FileEditor`]
pub struct PgFileEditor {
    pool: PgPool,
}

impl PgFileEditor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileEditor for PgFileEditor {
    async fn save(&self, file: &File, actor: i64) -> Result<Option<File>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE file
            SET alt_text = $1, updated_at = $2, updated_by = $3
            WHERE file_id = $4 AND deleted_at IS NULL
            "#,
        )
        .bind(&file.alt_text)
        .bind(now)
        .bind(actor)
        .bind(file.id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            debug!(file_id = file.id, "save skipped: file missing or deleted");
            return Ok(None);
        }

        sqlx::query("DELETE FROM file_tag WHERE file_id = $1")
            .bind(file.id)
            .execute(&mut *tx)
            .await?;

        for tag in &file.tags {
            sqlx::query("INSERT INTO file_tag (file_id, tag_name) VALUES ($1, $2)")
                .bind(file.id)
                .bind(tag)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!(
            file_id = file.id,
            tags = file.tags.len(),
            actor,
            "file metadata saved"
        );

        let mut saved = file.clone();
        saved.authorship.update(now, actor);
        Ok(Some(saved))
    }

    async fn delete(&self, file: &File, actor: i64) -> Result<Option<File>> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE file
            SET deleted_at = $1, deleted_by = $2
            WHERE file_id = $3 AND deleted_at IS NULL
            "#,
        )
        .bind(now)
        .bind(actor)
        .bind(file.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(file_id = file.id, "delete skipped: file missing or deleted");
            return Ok(None);
        }

        info!(file_id = file.id, actor, "file soft deleted");

        let mut deleted = file.clone();
        deleted.authorship.delete(now, actor);
        Ok(Some(deleted))
    }

    async fn restore(&self, file: &File, actor: i64) -> Result<Option<File>> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE file
            SET deleted_at = NULL, deleted_by = NULL, updated_at = $1, updated_by = $2
            WHERE file_id = $3 AND deleted_at IS NOT NULL
            "#,
        )
        .bind(now)
        .bind(actor)
        .bind(file.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(file_id = file.id, "restore skipped: file missing or live");
            return Ok(None);
        }

        info!(file_id = file.id, actor, "file restored");

        let mut restored = file.clone();
        restored.authorship.restore();
        restored.authorship.update(now, actor);
        Ok(Some(restored))
    }
}
