pub mod auth;
pub mod field_types;
pub mod files;
