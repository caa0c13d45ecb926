use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};

/// Who did something to a record, and when
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    pub at: DateTime<Utc>,
    pub by: i64,
}

impl Stamp {
    pub fn new(at: DateTime<Utc>, by: i64) -> Self {
        Self { at, by }
    }
}

/// Audit trail of a record.
///
/// `created` is always present. `updated` and `deleted` stay empty until the
/// corresponding event happens; a record is live while `deleted` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorship {
    created: Stamp,
    updated: Option<Stamp>,
    deleted: Option<Stamp>,
}

impl Authorship {
    pub fn created(at: DateTime<Utc>, by: i64) -> Self {
        Self {
            created: Stamp::new(at, by),
            updated: None,
            deleted: None,
        }
    }

    /// Rebuild an authorship value from its stored columns.
    ///
    /// A timestamp without its actor (or the reverse) is rejected.
    pub fn from_columns(
        created_at: DateTime<Utc>,
        created_by: i64,
        updated_at: Option<DateTime<Utc>>,
        updated_by: Option<i64>,
        deleted_at: Option<DateTime<Utc>>,
        deleted_by: Option<i64>,
    ) -> Result<Self> {
        let mut authorship = Self::created(created_at, created_by);
        authorship.updated = pair("updated", updated_at, updated_by)?;
        authorship.deleted = pair("deleted", deleted_at, deleted_by)?;
        Ok(authorship)
    }

    pub fn update(&mut self, at: DateTime<Utc>, by: i64) {
        self.updated = Some(Stamp::new(at, by));
    }

    pub fn delete(&mut self, at: DateTime<Utc>, by: i64) {
        self.deleted = Some(Stamp::new(at, by));
    }

    pub fn restore(&mut self) {
        self.deleted = None;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created.at
    }

    pub fn created_by(&self) -> i64 {
        self.created.by
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated.map(|s| s.at)
    }

    pub fn updated_by(&self) -> Option<i64> {
        self.updated.map(|s| s.by)
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted.map(|s| s.at)
    }

    pub fn deleted_by(&self) -> Option<i64> {
        self.deleted.map(|s| s.by)
    }
}

fn pair(event: &str, at: Option<DateTime<Utc>>, by: Option<i64>) -> Result<Option<Stamp>> {
    match (at, by) {
        (Some(at), Some(by)) => Ok(Some(Stamp::new(at, by))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(AppError::Decode(format!(
            "{event}_at is set but {event}_by is missing"
        ))),
        (None, Some(_)) => Err(AppError::Decode(format!(
            "{event}_by is set but {event}_at is missing"
        ))),
    }
}
