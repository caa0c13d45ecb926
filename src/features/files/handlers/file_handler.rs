use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppForm;
use crate::features::auth::AuthenticatedUser;
use crate::features::files::dtos::{
    DeleteFileDto, EditFileDto, FileDetailDto, FileResponseDto, ListFilesQuery,
};
use crate::features::files::services::FileDetailService;
use crate::shared::flash::FlashRedirect;
use crate::shared::types::{ApiResponse, Meta};

/// List files
///
/// `q` runs a phonetic search over names and tags; otherwise `type_id`,
/// then `user_id` narrow the listing.
#[utoipa::path(
    get,
    path = "/api/file-manager/files",
    params(ListFilesQuery),
    responses(
        (status = 200, description = "Matching files", body = ApiResponse<Vec<FileResponseDto>>),
        (status = 401, description = "Missing or invalid user id")
    ),
    security(("user_id" = [])),
    tag = "files"
)]
pub async fn list_files(
    _user: AuthenticatedUser,
    State(service): State<Arc<FileDetailService>>,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<ApiResponse<Vec<FileResponseDto>>>> {
    let files = service.list(&query).await?;
    let total = files.len() as i64;
    Ok(Json(ApiResponse::success(Some(files), None, Some(Meta { total }))))
}

/// Get file details
#[utoipa::path(
    get,
    path = "/api/file-manager/files/{file_id}",
    params(
        ("file_id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File found", body = ApiResponse<FileDetailDto>),
        (status = 404, description = "File not found or deleted")
    ),
    security(("user_id" = [])),
    tag = "files"
)]
pub async fn get_file(
    _user: AuthenticatedUser,
    State(service): State<Arc<FileDetailService>>,
    Path(file_id): Path<i64>,
) -> Result<Json<ApiResponse<FileDetailDto>>> {
    let detail = service.detail(file_id).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

/// Edit alt text and tags
#[utoipa::path(
    post,
    path = "/api/file-manager/files/{file_id}/edit",
    params(
        ("file_id" = i64, Path, description = "File ID")
    ),
    request_body(content = EditFileDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the file details with a notice"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "File not found or deleted")
    ),
    security(("user_id" = [])),
    tag = "files"
)]
pub async fn edit_file(
    user: AuthenticatedUser,
    State(service): State<Arc<FileDetailService>>,
    Path(file_id): Path<i64>,
    AppForm(form): AppForm<EditFileDto>,
) -> Result<FlashRedirect> {
    form.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.edit(file_id, form, user.user_id).await
}

/// Soft-delete a file
#[utoipa::path(
    post,
    path = "/api/file-manager/files/{file_id}/delete",
    params(
        ("file_id" = i64, Path, description = "File ID")
    ),
    request_body(content = DeleteFileDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the listing with a notice and undo link"),
        (status = 404, description = "File not found or already deleted")
    ),
    security(("user_id" = [])),
    tag = "files"
)]
pub async fn delete_file(
    user: AuthenticatedUser,
    State(service): State<Arc<FileDetailService>>,
    Path(file_id): Path<i64>,
    AppForm(form): AppForm<DeleteFileDto>,
) -> Result<FlashRedirect> {
    service.delete(file_id, form, user.user_id).await
}

/// Restore a soft-deleted file
#[utoipa::path(
    post,
    path = "/api/file-manager/files/{file_id}/restore",
    params(
        ("file_id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 303, description = "Redirect to the listing with a notice"),
        (status = 404, description = "File not found")
    ),
    security(("user_id" = [])),
    tag = "files"
)]
pub async fn restore_file(
    user: AuthenticatedUser,
    State(service): State<Arc<FileDetailService>>,
    Path(file_id): Path<i64>,
) -> Result<FlashRedirect> {
    service.restore(file_id, user.user_id).await
}
