use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::auth::AuthenticatedUser;
use crate::features::field_types::dtos::{FieldOptionsQuery, ResolveFieldQuery};
use crate::features::field_types::file_field::{FieldOptions, ResolvedFile};
use crate::features::field_types::services::{FileFieldService, DEFAULT_FIELD_NAME};
use crate::shared::types::ApiResponse;

/// Options for a file selection control
#[utoipa::path(
    get,
    path = "/api/file-manager/field/options",
    params(FieldOptionsQuery),
    responses(
        (status = 200, description = "Selectable files", body = ApiResponse<FieldOptions>),
        (status = 400, description = "Invalid file type id")
    ),
    security(("user_id" = [])),
    tag = "field"
)]
pub async fn field_options(
    _user: AuthenticatedUser,
    State(service): State<Arc<FileFieldService>>,
    Query(query): Query<FieldOptionsQuery>,
) -> Result<Json<ApiResponse<FieldOptions>>> {
    let type_ids = query.type_ids()?;
    let name = query
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_FIELD_NAME);
    let options = service.options(name, query.label.clone(), type_ids).await?;
    Ok(Json(ApiResponse::success(Some(options), None, None)))
}

/// Resolve a stored field value to its file
#[utoipa::path(
    get,
    path = "/api/file-manager/field/resolve",
    params(ResolveFieldQuery),
    responses(
        (status = 200, description = "Resolved value", body = ApiResponse<ResolvedFile>)
    ),
    security(("user_id" = [])),
    tag = "field"
)]
pub async fn resolve_field(
    _user: AuthenticatedUser,
    State(service): State<Arc<FileFieldService>>,
    Query(query): Query<ResolveFieldQuery>,
) -> Result<Json<ApiResponse<ResolvedFile>>> {
    let resolved = service.resolve(query.value).await?;
    Ok(Json(ApiResponse::success(Some(resolved), None, None)))
}
