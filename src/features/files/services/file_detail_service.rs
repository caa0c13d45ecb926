use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::{
    DeleteFileDto, EditFileDto, FileDetailDto, FileResponseDto, ListFilesQuery,
};
use crate::features::files::models::File;
use crate::features::files::services::{FileEditor, FileLoader, Visibility};
use crate::modules::storage::PublicPath;
use crate::shared::constants::{file_detail_path, file_restore_path, FILE_LISTING_PATH};
use crate::shared::flash::{Flash, FlashRedirect};

/// Detail, edit, delete and restore of single file records
pub struct FileDetailService {
    loader: FileLoader,
    editor: Arc<dyn FileEditor>,
    storage: Arc<dyn PublicPath>,
}

impl FileDetailService {
    pub fn new(loader: FileLoader, editor: Arc<dyn FileEditor>, storage: Arc<dyn PublicPath>) -> Self {
        Self {
            loader,
            editor,
            storage,
        }
    }

    /// A live file together with the id of the user who created it
    pub async fn detail(&self, file_id: i64) -> Result<FileDetailDto> {
        let file = self.require(file_id, Visibility::LiveOnly).await?;
        let author_id = file.authorship.created_by();

        Ok(FileDetailDto {
            file: self.to_dto(file),
            author_id,
        })
    }

    pub async fn list(&self, query: &ListFilesQuery) -> Result<Vec<FileResponseDto>> {
        let loader = self.loader.include_deleted(query.include_deleted);
        debug!(visibility = ?loader.visibility(), "listing files");

        let files = if let Some(term) = query.q.as_deref().filter(|q| !q.trim().is_empty()) {
            loader.get_by_search_term(term).await?
        } else if let Some(type_id) = query.type_id {
            loader.get_by_type(type_id).await?
        } else if let Some(user_id) = query.user_id {
            loader.get_by_user(user_id).await?
        } else {
            loader.get_all().await?
        };

        Ok(files.into_iter().map(|file| self.to_dto(file)).collect())
    }

    /// Apply alt text and tags from the edit form, then go back to the
    /// detail page. A form without edits saves nothing.
    pub async fn edit(&self, file_id: i64, form: EditFileDto, actor: i64) -> Result<FlashRedirect> {
        let mut file = self.require(file_id, Visibility::LiveOnly).await?;
        let redirect = FlashRedirect::to(file_detail_path(file_id));

        if !form.has_edits() {
            return Ok(redirect);
        }

        file.alt_text = form
            .alt_text
            .map(|alt| alt.trim().to_string())
            .filter(|alt| !alt.is_empty());
        let tags = parse_tags(form.tags.as_deref().unwrap_or_default());
        debug!(file_id, tags_changed = !file.has_same_tags(&tags), "applying file edits");
        file.tags = tags;

        let basename = file.file.basename().to_string();
        let flash = match self.editor.save(&file, actor).await? {
            Some(_) => Flash::success(format!("{} was updated successfully", basename)),
            None => Flash::error(format!("{} could not be updated.", basename)),
        };

        Ok(redirect.with_flash(flash))
    }

    /// Soft-delete a file once the form confirms it. The success notice
    /// links to the restore action.
    pub async fn delete(&self, file_id: i64, form: DeleteFileDto, actor: i64) -> Result<FlashRedirect> {
        let file = self.require(file_id, Visibility::LiveOnly).await?;

        if !form.is_confirmed() {
            return Ok(FlashRedirect::to(file_detail_path(file_id)));
        }

        let basename = file.file.basename();
        let flash = match self.editor.delete(&file, actor).await? {
            Some(_) => Flash::success(format!(
                "{} was deleted. <a href=\"{}\">Undo</a>",
                basename,
                file_restore_path(file_id)
            )),
            None => Flash::error(format!("{} could not be deleted.", basename)),
        };

        Ok(FlashRedirect::to(FILE_LISTING_PATH).with_flash(flash))
    }

    pub async fn restore(&self, file_id: i64, actor: i64) -> Result<FlashRedirect> {
        let file = self.require(file_id, Visibility::IncludeDeleted).await?;

        let basename = file.file.basename();
        let flash = match self.editor.restore(&file, actor).await? {
            Some(_) => Flash::success(format!("{} was restored successfully", basename)),
            None => Flash::error(format!("{} could not be restored.", basename)),
        };

        info!(file_id, actor, restored = flash.is_success(), "restore requested");
        Ok(FlashRedirect::to(FILE_LISTING_PATH).with_flash(flash))
    }

    async fn require(&self, file_id: i64, visibility: Visibility) -> Result<File> {
        self.loader
            .get_by_id_with(file_id, visibility)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("File '{}' not found", file_id)))
    }

    fn to_dto(&self, file: File) -> FileResponseDto {
        FileResponseDto::from_file(file, self.storage.as_ref())
    }
}

/// Split a comma separated tag list, dropping blank entries
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
