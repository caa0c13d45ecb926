use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::authorship::Authorship;
use crate::core::error::{AppError, Result};

/// Database row of the `file` table
#[derive(Debug, Clone, FromRow)]
pub struct FileRow {
    pub file_id: i64,
    pub url: String,
    pub name: String,
    pub extension: String,
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
    pub created_by: i64,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<i64>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<i64>,
    pub type_id: i64,
    pub checksum: String,
    pub preview_url: Option<String>,
    pub dimension_x: Option<i32>,
    pub dimension_y: Option<i32>,
    pub alt_text: Option<String>,
    pub duration: Option<i32>,
}

/// One (file, tag) pairing considered by the search; `tag_name` is empty
/// for files without tags
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SearchCandidate {
    pub file_id: i64,
    pub name: String,
    pub tag_name: Option<String>,
}

/// View of the stored file behind a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    url: String,
}

impl StoredFile {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Final path segment of the stored URL
    pub fn basename(&self) -> &str {
        let path = self.url.split(['?', '#']).next().unwrap_or_default();
        path.trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

/// A file managed by the file manager
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub id: i64,
    pub url: String,
    pub name: String,
    pub extension: String,
    pub file_size: i64,
    pub preview_url: Option<String>,
    pub dimension_x: Option<i32>,
    pub dimension_y: Option<i32>,
    pub duration: Option<i32>,
    pub checksum: String,
    pub alt_text: Option<String>,
    pub tags: Vec<String>,
    pub type_id: i64,
    pub authorship: Authorship,
    pub file: StoredFile,
}

impl File {
    pub fn is_deleted(&self) -> bool {
        self.authorship.is_deleted()
    }

    pub fn alt_text(&self) -> &str {
        self.alt_text.as_deref().unwrap_or_default()
    }

    /// Tags compared as a set, ignoring store order
    pub fn has_same_tags(&self, other: &[String]) -> bool {
        let mut mine: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        let mut theirs: Vec<&str> = other.iter().map(String::as_str).collect();
        mine.sort_unstable();
        mine.dedup();
        theirs.sort_unstable();
        theirs.dedup();
        mine == theirs
    }
}

impl TryFrom<FileRow> for File {
    type Error = AppError;

    fn try_from(row: FileRow) -> Result<Self> {
        if row.file_size < 0 {
            return Err(AppError::Decode(format!(
                "file {} has negative file_size {}",
                row.file_id, row.file_size
            )));
        }
        for (column, value) in [
            ("dimension_x", row.dimension_x),
            ("dimension_y", row.dimension_y),
            ("duration", row.duration),
        ] {
            if value.is_some_and(|v| v < 0) {
                return Err(AppError::Decode(format!(
                    "file {} has negative {}",
                    row.file_id, column
                )));
            }
        }

        let authorship = Authorship::from_columns(
            row.created_at,
            row.created_by,
            row.updated_at,
            row.updated_by,
            row.deleted_at,
            row.deleted_by,
        )
        .map_err(|e| match e {
            AppError::Decode(msg) => AppError::Decode(format!("file {}: {}", row.file_id, msg)),
            other => other,
        })?;

        Ok(Self {
            id: row.file_id,
            file: StoredFile::new(row.url.clone()),
            url: row.url,
            name: row.name,
            extension: row.extension,
            file_size: row.file_size,
            preview_url: row.preview_url,
            dimension_x: row.dimension_x,
            dimension_y: row.dimension_y,
            duration: row.duration,
            checksum: row.checksum,
            alt_text: row.alt_text,
            tags: Vec::new(),
            type_id: row.type_id,
            authorship,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{file_row, ts};

    #[test]
    fn test_basename() {
        assert_eq!(StoredFile::new("cog://public/files/logo.png").basename(), "logo.png");
        assert_eq!(
            StoredFile::new("https://cdn.example.com/a/b/report.pdf?v=2").basename(),
            "report.pdf"
        );
        assert_eq!(StoredFile::new("plain.txt").basename(), "plain.txt");
    }

    #[test]
    fn test_try_from_row() {
        let row = file_row(42, "Logo.png", 3);
        let file = File::try_from(row).unwrap();

        assert_eq!(file.id, 42);
        assert_eq!(file.name, "Logo.png");
        assert_eq!(file.type_id, 3);
        assert!(file.tags.is_empty());
        assert!(!file.is_deleted());
        assert_eq!(file.file.url(), file.url);
    }

    #[test]
    fn test_try_from_rejects_negative_size() {
        let mut row = file_row(1, "a.png", 1);
        row.file_size = -1;
        assert!(matches!(File::try_from(row), Err(AppError::Decode(_))));
    }

    #[test]
    fn test_try_from_names_the_file_of_a_half_stamp() {
        let mut row = file_row(2, "b.png", 1);
        row.deleted_at = Some(ts(5));
        let err = File::try_from(row).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Decode error: file 2: deleted_at is set but deleted_by is missing"
        );
    }

    #[test]
    fn test_try_from_rejects_negative_dimension() {
        let mut row = file_row(1, "a.png", 1);
        row.dimension_y = Some(-20);
        let err = File::try_from(row).unwrap_err();
        assert!(err.to_string().contains("dimension_y"));
    }

    #[test]
    fn test_try_from_rejects_incomplete_deletion() {
        let mut row = file_row(1, "a.png", 1);
        row.deleted_by = Some(5);
        assert!(matches!(File::try_from(row), Err(AppError::Decode(_))));
    }

    #[test]
    fn test_has_same_tags_ignores_order() {
        let mut file = File::try_from(file_row(1, "a.png", 1)).unwrap();
        file.tags = vec!["red".to_string(), "blue".to_string()];

        assert!(file.has_same_tags(&["blue".to_string(), "red".to_string()]));
        assert!(!file.has_same_tags(&["blue".to_string()]));
    }
}
