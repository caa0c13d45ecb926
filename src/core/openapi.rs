use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::field_types::{file_field as field_models, handlers as field_handlers};
use crate::features::files::{dtos as files_dtos, handlers as files_handlers};
use crate::shared::constants::USER_ID_HEADER;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Files
        files_handlers::list_files,
        files_handlers::get_file,
        files_handlers::edit_file,
        files_handlers::delete_file,
        files_handlers::restore_file,
        // File field
        field_handlers::field_options,
        field_handlers::resolve_field,
    ),
    components(
        schemas(
            // Shared
            Meta,
            auth::AuthenticatedUser,
            // Files
            files_dtos::AuthorshipDto,
            files_dtos::FileResponseDto,
            files_dtos::FileDetailDto,
            files_dtos::EditFileDto,
            files_dtos::DeleteFileDto,
            ApiResponse<Vec<files_dtos::FileResponseDto>>,
            ApiResponse<files_dtos::FileDetailDto>,
            // File field
            field_models::Choice,
            field_models::FieldOptions,
            field_models::ResolvedFile,
            ApiResponse<field_models::FieldOptions>,
            ApiResponse<field_models::ResolvedFile>,
        )
    ),
    tags(
        (name = "files", description = "File records: details, edit, soft delete and restore"),
        (name = "field", description = "File selection field used by other entities' forms"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "File Manager API",
        version = "0.1.0",
        description = "API documentation for the file manager",
    )
)]
pub struct ApiDoc;

/// Adds the host-provided user id header as security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "user_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(USER_ID_HEADER))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
