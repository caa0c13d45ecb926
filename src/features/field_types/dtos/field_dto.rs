use serde::Deserialize;
use utoipa::IntoParams;

use crate::core::error::{AppError, Result};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FieldOptionsQuery {
    /// Name of the form field the options are for
    #[param(example = "hero_image")]
    pub name: Option<String>,
    /// Label shown next to the selection control
    #[param(example = "Hero image")]
    pub label: Option<String>,
    /// Comma separated file type ids, e.g. `1,2`
    #[param(example = "1,2")]
    pub allowed_types: Option<String>,
}

impl FieldOptionsQuery {
    /// Parsed type ids; `None` when no filter was given
    pub fn type_ids(&self) -> Result<Option<Vec<i64>>> {
        let Some(raw) = self.allowed_types.as_deref() else {
            return Ok(None);
        };

        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.parse::<i64>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid file type id '{}'", id)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((!ids.is_empty()).then_some(ids))
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResolveFieldQuery {
    /// Stored field value, normally a file id
    #[param(example = "42")]
    pub value: Option<String>,
}
