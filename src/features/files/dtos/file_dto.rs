use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::files::models::{Authorship, File};
use crate::modules::storage::PublicPath;

/// Created/updated/deleted stamps of a file
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthorshipDto {
    pub created_at: DateTime<Utc>,
    pub created_by: i64,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<i64>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<i64>,
}

impl From<&Authorship> for AuthorshipDto {
    fn from(authorship: &Authorship) -> Self {
        Self {
            created_at: authorship.created_at(),
            created_by: authorship.created_by(),
            updated_at: authorship.updated_at(),
            updated_by: authorship.updated_by(),
            deleted_at: authorship.deleted_at(),
            deleted_by: authorship.deleted_by(),
        }
    }
}

/// Response DTO for a file record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileResponseDto {
    pub id: i64,
    /// Storage URL as persisted
    pub url: String,
    /// Public path the file is served from; empty for private files
    pub public_url: String,
    /// Final path segment of the storage URL
    pub basename: String,
    pub name: String,
    pub extension: String,
    /// Size in bytes
    pub file_size: i64,
    pub preview_url: Option<String>,
    pub dimension_x: Option<i32>,
    pub dimension_y: Option<i32>,
    /// Length in seconds, media only
    pub duration: Option<i32>,
    pub checksum: String,
    pub alt_text: Option<String>,
    pub tags: Vec<String>,
    pub type_id: i64,
    pub is_deleted: bool,
    pub authorship: AuthorshipDto,
}

impl FileResponseDto {
    pub fn from_file(file: File, storage: &dyn PublicPath) -> Self {
        Self {
            public_url: storage.public_url(&file.url),
            basename: file.file.basename().to_string(),
            is_deleted: file.is_deleted(),
            authorship: AuthorshipDto::from(&file.authorship),
            id: file.id,
            url: file.url,
            name: file.name,
            extension: file.extension,
            file_size: file.file_size,
            preview_url: file.preview_url,
            dimension_x: file.dimension_x,
            dimension_y: file.dimension_y,
            duration: file.duration,
            checksum: file.checksum,
            alt_text: file.alt_text,
            tags: file.tags,
            type_id: file.type_id,
        }
    }
}

/// Detail page payload: the file and the user who created it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileDetailDto {
    pub file: FileResponseDto,
    pub author_id: i64,
}

/// Edit form
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct EditFileDto {
    #[validate(length(max = 255, message = "alt_text must be at most 255 characters"))]
    pub alt_text: Option<String>,
    /// Comma separated tag names
    #[schema(example = "logo, brand")]
    pub tags: Option<String>,
}

impl EditFileDto {
    /// Whether the form carries any file edits at all
    pub fn has_edits(&self) -> bool {
        self.alt_text.is_some() || self.tags.is_some()
    }
}

/// Delete form
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeleteFileDto {
    /// Confirmation flag; anything but empty, "0" or "false" confirms
    #[schema(example = "1")]
    pub delete: Option<String>,
}

impl DeleteFileDto {
    pub fn is_confirmed(&self) -> bool {
        match self.delete.as_deref().map(str::trim) {
            None | Some("") | Some("0") => false,
            Some(flag) => !flag.eq_ignore_ascii_case("false"),
        }
    }
}

/// Listing filters; the first one present wins, in field order
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListFilesQuery {
    /// Phonetic search over file names and tags
    pub q: Option<String>,
    pub type_id: Option<i64>,
    /// Creator of the files
    pub user_id: Option<i64>,
    /// Also list soft-deleted files
    #[serde(default)]
    pub include_deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_flag() {
        let flag = |v: Option<&str>| DeleteFileDto {
            delete: v.map(str::to_string),
        };
        assert!(flag(Some("1")).is_confirmed());
        assert!(flag(Some("yes")).is_confirmed());
        assert!(!flag(None).is_confirmed());
        assert!(!flag(Some("")).is_confirmed());
        assert!(!flag(Some("0")).is_confirmed());
        assert!(!flag(Some("FALSE")).is_confirmed());
    }

    #[test]
    fn test_alt_text_length() {
        let dto = EditFileDto {
            alt_text: Some("a".repeat(256)),
            tags: None,
        };
        assert!(dto.validate().is_err());

        let dto = EditFileDto {
            alt_text: Some("a".repeat(255)),
            tags: None,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_has_edits() {
        assert!(!EditFileDto::default().has_edits());
        assert!(EditFileDto {
            alt_text: None,
            tags: Some(String::new()),
        }
        .has_edits());
    }
}
