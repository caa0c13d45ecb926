mod file_detail_service;
mod file_editor;
mod file_loader;
mod file_query;
mod phonetic;

pub use file_detail_service::FileDetailService;
pub use file_editor::{FileEditor, PgFileEditor};
pub use file_loader::{FileLoader, FileLoading, Visibility};
pub use file_query::{FileQuery, PgFileQuery};
