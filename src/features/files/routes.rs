use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::files::handlers;
use crate::features::files::services::FileDetailService;

/// Create routes for the file manager
///
/// Note: requires the identity layer
pub fn routes(service: Arc<FileDetailService>) -> Router {
    Router::new()
        .route("/api/file-manager/files", get(handlers::list_files))
        .route("/api/file-manager/files/{file_id}", get(handlers::get_file))
        .route(
            "/api/file-manager/files/{file_id}/edit",
            post(handlers::edit_file),
        )
        .route(
            "/api/file-manager/files/{file_id}/delete",
            post(handlers::delete_file),
        )
        .route(
            "/api/file-manager/files/{file_id}/restore",
            post(handlers::restore_file),
        )
        .with_state(service)
}
