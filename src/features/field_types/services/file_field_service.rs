use std::sync::Arc;
use tracing::debug;

use crate::core::error::Result;
use crate::features::field_types::file_field::{FieldOptions, FileField, ResolvedFile};
use crate::features::files::services::FileLoading;
use crate::modules::storage::PublicPath;
use crate::modules::translation::Translator;

/// Field name used when the caller does not name one
pub const DEFAULT_FIELD_NAME: &str = "file";

/// Builds file fields wired to the shared collaborators
pub struct FileFieldService {
    loader: Arc<dyn FileLoading>,
    translator: Arc<dyn Translator>,
    storage: Arc<dyn PublicPath>,
}

impl FileFieldService {
    pub fn new(
        loader: Arc<dyn FileLoading>,
        translator: Arc<dyn Translator>,
        storage: Arc<dyn PublicPath>,
    ) -> Self {
        Self {
            loader,
            translator,
            storage,
        }
    }

    pub fn field(
        &self,
        name: &str,
        label: Option<String>,
        value: Option<String>,
    ) -> Result<FileField> {
        FileField::builder(name)
            .maybe_label(label)
            .value(value)
            .loader(Arc::clone(&self.loader))
            .translator(Arc::clone(&self.translator))
            .storage(Arc::clone(&self.storage))
            .build()
    }

    /// Selection options for the field `name`, optionally limited to some
    /// file types
    pub async fn options(
        &self,
        name: &str,
        label: Option<String>,
        allowed_types: Option<Vec<i64>>,
    ) -> Result<FieldOptions> {
        let mut field = self.field(name, label, None)?;
        if let Some(types) = allowed_types {
            field.set_allowed_types(types);
        }

        let options = field.field_options().await?;
        debug!(field = name, choices = options.choices.len(), "file field options built");
        Ok(options)
    }

    pub async fn resolve(&self, value: Option<String>) -> Result<ResolvedFile> {
        let resolved = self.field(DEFAULT_FIELD_NAME, None, value)?.resolve().await?;
        debug!(file_id = ?resolved.file_id, "file field value resolved");
        Ok(resolved)
    }
}
