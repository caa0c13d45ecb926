//! In-memory collaborators and fixtures for unit and handler tests.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::config::StorageConfig;
use crate::core::error::Result;
use crate::features::files::models::{File, FileRow, SearchCandidate};
use crate::features::files::services::{FileEditor, FileLoader, FileQuery};
use crate::modules::storage::PublicStorage;
use crate::modules::translation::CatalogTranslator;

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// A live, untagged file row created by user 1
pub fn file_row(file_id: i64, name: &str, type_id: i64) -> FileRow {
    let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    FileRow {
        file_id,
        url: format!("cog://public/files/{}", name),
        name: name.to_string(),
        extension: extension.to_string(),
        file_size: 1024,
        created_at: ts(1_700_000_000),
        created_by: 1,
        updated_at: None,
        updated_by: None,
        deleted_at: None,
        deleted_by: None,
        type_id,
        checksum: format!("checksum-{}", file_id),
        preview_url: None,
        dimension_x: Some(640),
        dimension_y: Some(480),
        alt_text: None,
        duration: None,
    }
}

pub fn test_storage() -> PublicStorage {
    PublicStorage::new(StorageConfig::default())
}

pub fn test_translator() -> CatalogTranslator {
    CatalogTranslator::default()
}

struct Entry {
    row: FileRow,
    tags: Vec<String>,
}

/// `file` / `file_tag` tables held in memory
#[derive(Default)]
pub struct MemoryFileStore {
    entries: Mutex<Vec<Entry>>,
    reject_writes: AtomicBool,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, row: FileRow, tags: &[&str]) {
        self.entries.lock().unwrap().push(Entry {
            row,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        });
    }

    /// Make every editor operation report that it did not apply
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub fn row(&self, file_id: i64) -> Option<FileRow> {
        self.with_entry(file_id, |entry| entry.row.clone())
    }

    pub fn tags(&self, file_id: i64) -> Vec<String> {
        self.with_entry(file_id, |entry| entry.tags.clone())
            .unwrap_or_default()
    }

    pub fn loader(self: &Arc<Self>) -> FileLoader {
        FileLoader::new(self.clone())
    }

    fn with_entry<T>(&self, file_id: i64, f: impl FnOnce(&mut Entry) -> T) -> Option<T> {
        let mut entries = self.entries.lock().unwrap();
        entries
            .iter_mut()
            .find(|entry| entry.row.file_id == file_id)
            .map(f)
    }

    fn ids_where(&self, predicate: impl Fn(&FileRow) -> bool) -> Vec<i64> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| predicate(&entry.row))
            .map(|entry| entry.row.file_id)
            .collect()
    }

    fn writes_rejected(&self) -> bool {
        self.reject_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileQuery for MemoryFileStore {
    async fn fetch_file(&self, file_id: i64) -> Result<Option<FileRow>> {
        Ok(self.row(file_id))
    }

    async fn fetch_tags(&self, file_id: i64) -> Result<Vec<String>> {
        Ok(self.tags(file_id))
    }

    async fn all_ids(&self) -> Result<Vec<i64>> {
        Ok(self.ids_where(|_| true))
    }

    async fn ids_by_type(&self, type_id: i64) -> Result<Vec<i64>> {
        Ok(self.ids_where(|row| row.type_id == type_id))
    }

    async fn ids_by_creator(&self, user_id: i64) -> Result<Vec<i64>> {
        Ok(self.ids_where(|row| row.created_by == user_id))
    }

    async fn search_candidates(
        &self,
        initials: &str,
        live_only: bool,
    ) -> Result<Vec<SearchCandidate>> {
        let has_word_starting = |text: &str| {
            text.split(|c: char| !c.is_ascii_alphabetic())
                .filter_map(|word| word.chars().next())
                .any(|c| initials.contains(c.to_ascii_uppercase()))
        };

        let entries = self.entries.lock().unwrap();
        let mut candidates = Vec::new();
        for entry in entries.iter() {
            if live_only && entry.row.deleted_at.is_some() {
                continue;
            }
            let name_matches = has_word_starting(&entry.row.name);
            if entry.tags.is_empty() && name_matches {
                candidates.push(SearchCandidate {
                    file_id: entry.row.file_id,
                    name: entry.row.name.clone(),
                    tag_name: None,
                });
            }
            for tag in &entry.tags {
                if name_matches || has_word_starting(tag) {
                    candidates.push(SearchCandidate {
                        file_id: entry.row.file_id,
                        name: entry.row.name.clone(),
                        tag_name: Some(tag.clone()),
                    });
                }
            }
        }
        Ok(candidates)
    }
}

#[async_trait]
impl FileEditor for MemoryFileStore {
    async fn save(&self, file: &File, actor: i64) -> Result<Option<File>> {
        if self.writes_rejected() {
            return Ok(None);
        }
        let now = Utc::now();
        let applied = self.with_entry(file.id, |entry| {
            if entry.row.deleted_at.is_some() {
                return false;
            }
            entry.row.alt_text = file.alt_text.clone();
            entry.row.updated_at = Some(now);
            entry.row.updated_by = Some(actor);
            entry.tags = file.tags.clone();
            true
        });
        if applied != Some(true) {
            return Ok(None);
        }

        let mut saved = file.clone();
        saved.authorship.update(now, actor);
        Ok(Some(saved))
    }

    async fn delete(&self, file: &File, actor: i64) -> Result<Option<File>> {
        if self.writes_rejected() {
            return Ok(None);
        }
        let now = Utc::now();
        let applied = self.with_entry(file.id, |entry| {
            if entry.row.deleted_at.is_some() {
                return false;
            }
            entry.row.deleted_at = Some(now);
            entry.row.deleted_by = Some(actor);
            true
        });
        if applied != Some(true) {
            return Ok(None);
        }

        let mut deleted = file.clone();
        deleted.authorship.delete(now, actor);
        Ok(Some(deleted))
    }

    async fn restore(&self, file: &File, actor: i64) -> Result<Option<File>> {
        if self.writes_rejected() {
            return Ok(None);
        }
        let now = Utc::now();
        let applied = self.with_entry(file.id, |entry| {
            if entry.row.deleted_at.is_none() {
                return false;
            }
            entry.row.deleted_at = None;
            entry.row.deleted_by = None;
            entry.row.updated_at = Some(now);
            entry.row.updated_by = Some(actor);
            true
        });
        if applied != Some(true) {
            return Ok(None);
        }

        let mut restored = file.clone();
        restored.authorship.restore();
        restored.authorship.update(now, actor);
        Ok(Some(restored))
    }
}
