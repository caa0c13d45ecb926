mod file_field_service;

pub use file_field_service::{FileFieldService, DEFAULT_FIELD_NAME};
