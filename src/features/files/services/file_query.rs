use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::Result;
use crate::features::files::models::{FileRow, SearchCandidate};

/// Parameterised lookups against the `file` / `file_tag` tables.
///
/// Row and id lookups ignore soft deletion; visibility is applied by the
/// loader.
#[async_trait]
pub trait FileQuery: Send + Sync {
    async fn fetch_file(&self, file_id: i64) -> Result<Option<FileRow>>;

    /// Tag names of a file in insertion order
    async fn fetch_tags(&self, file_id: i64) -> Result<Vec<String>>;

    async fn all_ids(&self) -> Result<Vec<i64>>;

    async fn ids_by_type(&self, type_id: i64) -> Result<Vec<i64>>;

    async fn ids_by_creator(&self, user_id: i64) -> Result<Vec<i64>>;

    /// (file, tag) pairings where the file name or the tag has a word
    /// starting with one of `initials` (uppercase ASCII letters). Files
    /// without tags appear once with no tag. `live_only` leaves out
    /// soft-deleted files.
    async fn search_candidates(
        &self,
        initials: &str,
        live_only: bool,
    ) -> Result<Vec<SearchCandidate>>;
}

/// Postgres-backed [`FileQuery`]
pub struct PgFileQuery {
    pool: PgPool,
}

impl PgFileQuery {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileQuery for PgFileQuery {
    async fn fetch_file(&self, file_id: i64) -> Result<Option<FileRow>> {
        let row = sqlx::query_as::<_, FileRow>(
            r#"
            SELECT
                file_id, url, name, extension, file_size,
                created_at, created_by, updated_at, updated_by,
                deleted_at, deleted_by, type_id, checksum, preview_url,
                dimension_x, dimension_y, alt_text, duration
            FROM file
            WHERE file_id = $1
            "#,
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn fetch_tags(&self, file_id: i64) -> Result<Vec<String>> {
        let tags = sqlx::query_scalar::<_, String>(
            r#"
            SELECT tag_name
            FROM file_tag
            WHERE file_id = $1
            ORDER BY id
            "#,
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    async fn all_ids(&self) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT file_id FROM file ORDER BY file_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    async fn ids_by_type(&self, type_id: i64) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT file_id FROM file WHERE type_id = $1 ORDER BY file_id",
        )
        .bind(type_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn ids_by_creator(&self, user_id: i64) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT file_id FROM file WHERE created_by = $1 ORDER BY file_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn search_candidates(
        &self,
        initials: &str,
        live_only: bool,
    ) -> Result<Vec<SearchCandidate>> {
        // A word starts at the beginning or after a non-letter
        let word_start = format!("(^|[^a-z])[{}]", initials);
        let candidates = sqlx::query_as::<_, SearchCandidate>(
            r#"
            SELECT file.file_id, file.name, file_tag.tag_name
            FROM file
            LEFT JOIN file_tag USING (file_id)
            WHERE (file.name ~* $1 OR file_tag.tag_name ~* $1)
              AND (NOT $2 OR file.deleted_at IS NULL)
            ORDER BY file.file_id, file_tag.id
            "#,
        )
        .bind(word_start)
        .bind(live_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(candidates)
    }
}
