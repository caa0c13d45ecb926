//! The "file" field type.
//!
//! Other entities' forms store a file id in this field. The field resolves
//! the id to a [`File`] for display and lists the files a user may pick.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::OnceCell;
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};
use crate::features::files::models::File;
use crate::features::files::services::FileLoading;
use crate::modules::storage::PublicPath;
use crate::modules::translation::Translator;
use crate::shared::constants::SELECT_DEFAULT_KEY;

pub const FIELD_TYPE: &str = "file";
pub const FORM_TYPE: &str = "ms_file";

/// File type ids a field accepts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowedTypes(BTreeSet<i64>);

impl AllowedTypes {
    pub fn contains(&self, type_id: i64) -> bool {
        self.0.contains(&type_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }
}

impl From<i64> for AllowedTypes {
    fn from(type_id: i64) -> Self {
        Self(BTreeSet::from([type_id]))
    }
}

impl From<Vec<i64>> for AllowedTypes {
    fn from(type_ids: Vec<i64>) -> Self {
        Self(type_ids.into_iter().collect())
    }
}

impl From<&[i64]> for AllowedTypes {
    fn from(type_ids: &[i64]) -> Self {
        Self(type_ids.iter().copied().collect())
    }
}

impl<const N: usize> From<[i64; N]> for AllowedTypes {
    fn from(type_ids: [i64; N]) -> Self {
        Self(type_ids.into_iter().collect())
    }
}

/// One selectable file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Choice {
    pub id: i64,
    pub name: String,
}

/// Options handed to the form builder
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldOptions {
    /// Stored field type, always `file`
    pub field_type: String,
    /// Form control the builder renders
    pub form_type: String,
    pub name: String,
    pub label: Option<String>,
    /// Selectable files, sorted by name
    pub choices: Vec<Choice>,
    /// Accepted file type ids; absent when any type is accepted
    pub allowed_types: Option<Vec<i64>>,
    /// Placeholder label of the selection control
    pub empty_value: String,
}

/// What a field value resolves to; empty strings when it does not
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResolvedFile {
    pub file_id: Option<i64>,
    /// Public path of the file
    pub display: String,
    /// Storage URL of the file
    pub url: String,
    pub alt_text: String,
}

pub struct FileField {
    name: String,
    label: Option<String>,
    value: Option<String>,
    allowed_types: Option<AllowedTypes>,
    loader: Arc<dyn FileLoading>,
    translator: Arc<dyn Translator>,
    storage: Arc<dyn PublicPath>,
    choices: OnceCell<Vec<Choice>>,
}

impl std::fmt::Debug for FileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileField")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("value", &self.value)
            .field("allowed_types", &self.allowed_types)
            .finish()
    }
}

impl FileField {
    pub fn builder(name: impl Into<String>) -> FileFieldBuilder {
        FileFieldBuilder {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn field_type(&self) -> &'static str {
        FIELD_TYPE
    }

    pub fn form_type(&self) -> &'static str {
        FORM_TYPE
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn allowed_types(&self) -> Option<&AllowedTypes> {
        self.allowed_types.as_ref()
    }

    /// Restrict the selectable files to the given type(s).
    ///
    /// Drops any memoised choice list so the next call rebuilds it with the
    /// new filter.
    pub fn set_allowed_types(&mut self, types: impl Into<AllowedTypes>) -> &mut Self {
        self.allowed_types = Some(types.into());
        self.choices = OnceCell::new();
        self
    }

    /// The file the current value points at, if it resolves
    pub async fn file(&self) -> Result<Option<File>> {
        match self.file_id() {
            Some(file_id) => self.loader.load_file(file_id).await,
            None => Ok(None),
        }
    }

    /// Display string (the public path), storage URL and alt text of the
    /// current value from a single lookup. Each is `""` when the value does
    /// not resolve; store failures propagate.
    pub async fn resolve(&self) -> Result<ResolvedFile> {
        let resolved = match self.file().await? {
            Some(file) => ResolvedFile {
                file_id: Some(file.id),
                display: self.storage.public_url(&file.url),
                url: file.file.url().to_string(),
                alt_text: file.alt_text().to_string(),
            },
            None => ResolvedFile::default(),
        };
        Ok(resolved)
    }

    /// Selectable files: id and name of every live file of an allowed type,
    /// sorted by name. Built once per filter.
    pub async fn choices(&self) -> Result<&[Choice]> {
        let choices = self
            .choices
            .get_or_try_init(|| async {
                let files = self.loader.load_all().await?;
                let mut choices: Vec<Choice> = files
                    .into_iter()
                    .filter(|file| self.accepts(file.type_id))
                    .map(|file| Choice {
                        id: file.id,
                        name: file.name,
                    })
                    .collect();
                choices.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

                tracing::debug!(field = %self.name, count = choices.len(), "file choices built");
                Ok::<_, AppError>(choices)
            })
            .await?;

        Ok(choices.as_slice())
    }

    pub async fn field_options(&self) -> Result<FieldOptions> {
        Ok(FieldOptions {
            field_type: self.field_type().to_string(),
            form_type: self.form_type().to_string(),
            name: self.name().to_string(),
            label: self.label().map(str::to_string),
            choices: self.choices().await?.to_vec(),
            allowed_types: self
                .allowed_types()
                .filter(|types| !types.is_empty())
                .map(AllowedTypes::to_vec),
            empty_value: self.translator.trans(SELECT_DEFAULT_KEY),
        })
    }

    fn accepts(&self, type_id: i64) -> bool {
        match &self.allowed_types {
            Some(types) if !types.is_empty() => types.contains(type_id),
            _ => true,
        }
    }

    fn file_id(&self) -> Option<i64> {
        self.value
            .as_deref()
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
    }
}

/// Assembles a [`FileField`]; every collaborator must be supplied
#[derive(Default)]
pub struct FileFieldBuilder {
    name: String,
    label: Option<String>,
    value: Option<String>,
    allowed_types: Option<AllowedTypes>,
    loader: Option<Arc<dyn FileLoading>>,
    translator: Option<Arc<dyn Translator>>,
    storage: Option<Arc<dyn PublicPath>>,
}

impl FileFieldBuilder {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn maybe_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    pub fn allowed_types(mut self, types: impl Into<AllowedTypes>) -> Self {
        self.allowed_types = Some(types.into());
        self
    }

    pub fn loader(mut self, loader: Arc<dyn FileLoading>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn PublicPath>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn build(self) -> Result<FileField> {
        let missing = |what: &str| {
            AppError::Configuration(format!("file field '{}' requires {}", self.name, what))
        };
        let loader = self.loader.clone().ok_or_else(|| missing("a file loader"))?;
        let translator = self
            .translator
            .clone()
            .ok_or_else(|| missing("a translator"))?;
        let storage = self.storage.clone().ok_or_else(|| missing("a file storage"))?;

        Ok(FileField {
            name: self.name,
            label: self.label,
            value: self.value,
            allowed_types: self.allowed_types,
            loader,
            translator,
            storage,
            choices: OnceCell::new(),
        })
    }
}
