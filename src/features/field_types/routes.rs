use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::field_types::handlers;
use crate::features::field_types::services::FileFieldService;

/// Create routes for the file field type
pub fn routes(service: Arc<FileFieldService>) -> Router {
    Router::new()
        .route("/api/file-manager/field/options", get(handlers::field_options))
        .route("/api/file-manager/field/resolve", get(handlers::resolve_field))
        .with_state(service)
}
