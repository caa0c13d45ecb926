use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::core::error::Result;
use crate::features::files::models::File;
use crate::features::files::services::FileQuery;
use crate::features::files::services::phonetic::{soundex, sounds_like};

/// Which records a lookup may return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Soft-deleted records are reported as not found
    #[default]
    LiveOnly,
    IncludeDeleted,
}

impl Visibility {
    fn admits(self, deleted: bool) -> bool {
        match self {
            Visibility::LiveOnly => !deleted,
            Visibility::IncludeDeleted => true,
        }
    }
}

/// Builds [`File`] records from the store.
///
/// Absence is never an error: a missing or hidden record is `None`, an
/// empty result set is an empty `Vec`. Store failures propagate.
#[derive(Clone)]
pub struct FileLoader {
    query: Arc<dyn FileQuery>,
    visibility: Visibility,
}

impl FileLoader {
    pub fn new(query: Arc<dyn FileQuery>) -> Self {
        Self {
            query,
            visibility: Visibility::default(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Loader sharing this one's store but with the given deleted-file
    /// visibility. `self` is left unchanged.
    pub fn include_deleted(&self, include: bool) -> Self {
        let visibility = if include {
            Visibility::IncludeDeleted
        } else {
            Visibility::LiveOnly
        };
        Self {
            query: Arc::clone(&self.query),
            visibility,
        }
    }

    pub async fn get_by_id(&self, file_id: i64) -> Result<Option<File>> {
        self.get_by_id_with(file_id, self.visibility).await
    }

    pub async fn get_by_id_with(&self, file_id: i64, visibility: Visibility) -> Result<Option<File>> {
        let Some(row) = self.query.fetch_file(file_id).await? else {
            debug!(file_id, "file not found");
            return Ok(None);
        };

        if !visibility.admits(row.deleted_at.is_some()) {
            debug!(file_id, "file is soft-deleted; hidden");
            return Ok(None);
        }

        let mut file = File::try_from(row)?;
        file.tags = self.query.fetch_tags(file.id).await?;
        Ok(Some(file))
    }

    /// Records for every id that resolves, in input order; the rest are
    /// dropped silently
    pub async fn get_by_ids(&self, file_ids: &[i64]) -> Result<Vec<File>> {
        self.get_by_ids_with(file_ids, self.visibility).await
    }

    pub async fn get_by_ids_with(
        &self,
        file_ids: &[i64],
        visibility: Visibility,
    ) -> Result<Vec<File>> {
        let mut files = Vec::with_capacity(file_ids.len());
        for &file_id in file_ids {
            if let Some(file) = self.get_by_id_with(file_id, visibility).await? {
                files.push(file);
            }
        }

        debug!(
            requested = file_ids.len(),
            resolved = files.len(),
            "loaded files by id"
        );
        Ok(files)
    }

    pub async fn get_by_type(&self, type_id: i64) -> Result<Vec<File>> {
        let ids = self.query.ids_by_type(type_id).await?;
        debug!(type_id, count = ids.len(), "file ids by type");
        self.get_by_ids(&ids).await
    }

    /// Files whose name or any tag sounds like any whitespace-separated
    /// word of `term`
    pub async fn get_by_search_term(&self, term: &str) -> Result<Vec<File>> {
        let codes: Vec<String> = term.split_whitespace().filter_map(soundex).collect();
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let mut initials: Vec<char> = codes
            .iter()
            .filter_map(|code| code.chars().next())
            .collect();
        initials.sort_unstable();
        initials.dedup();
        let initials: String = initials.into_iter().collect();

        let live_only = self.visibility == Visibility::LiveOnly;
        let candidates = self.query.search_candidates(&initials, live_only).await?;
        let mut seen = HashSet::new();
        let ids: Vec<i64> = candidates
            .iter()
            .filter(|c| {
                codes.iter().any(|code| {
                    sounds_like(&c.name, code)
                        || c.tag_name.as_deref().is_some_and(|tag| sounds_like(tag, code))
                })
            })
            .map(|c| c.file_id)
            .filter(|id| seen.insert(*id))
            .collect();

        debug!(term, matches = ids.len(), "file search");
        self.get_by_ids(&ids).await
    }

    pub async fn get_all(&self) -> Result<Vec<File>> {
        let ids = self.query.all_ids().await?;
        self.get_by_ids(&ids).await
    }

    pub async fn get_by_user(&self, user_id: i64) -> Result<Vec<File>> {
        let ids = self.query.ids_by_creator(user_id).await?;
        debug!(user_id, count = ids.len(), "file ids by creator");
        self.get_by_ids(&ids).await
    }
}

/// File lookups needed by consumers that only display or pick files
#[async_trait]
pub trait FileLoading: Send + Sync {
    async fn load_file(&self, file_id: i64) -> Result<Option<File>>;

    async fn load_all(&self) -> Result<Vec<File>>;
}

#[async_trait]
impl FileLoading for FileLoader {
    async fn load_file(&self, file_id: i64) -> Result<Option<File>> {
        self.get_by_id(file_id).await
    }

    async fn load_all(&self) -> Result<Vec<File>> {
        self.get_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::{file_row, ts, MemoryFileStore};

    fn loader(store: &Arc<MemoryFileStore>) -> FileLoader {
        FileLoader::new(store.clone())
    }

    #[tokio::test]
    async fn test_get_by_id_live_file() {
        let store = Arc::new(MemoryFileStore::new());
        store.insert(file_row(42, "Logo.png", 3), &[]);

        let file = loader(&store).get_by_id(42).await.unwrap().unwrap();

        assert_eq!(file.name, "Logo.png");
        assert!(file.tags.is_empty());
        assert_eq!(file.type_id, 3);
        assert!(file.authorship.deleted_at().is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let store = Arc::new(MemoryFileStore::new());
        assert!(loader(&store).get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_attaches_tags_in_store_order() {
        let store = Arc::new(MemoryFileStore::new());
        store.insert(file_row(1, "banner.jpg", 1), &["summer", "sale"]);

        let file = loader(&store).get_by_id(1).await.unwrap().unwrap();
        assert_eq!(file.tags, vec!["summer".to_string(), "sale".to_string()]);
    }

    #[tokio::test]
    async fn test_soft_deleted_hidden_unless_included() {
        let store = Arc::new(MemoryFileStore::new());
        let mut row = file_row(7, "old.pdf", 2);
        row.deleted_at = Some(ts(5_000));
        row.deleted_by = Some(11);
        store.insert(row, &[]);

        let loader = loader(&store);
        assert!(loader.get_by_id(7).await.unwrap().is_none());

        let file = loader
            .include_deleted(true)
            .get_by_id(7)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(file.authorship.deleted_at(), Some(ts(5_000)));
        assert_eq!(file.authorship.deleted_by(), Some(11));

        assert!(loader
            .include_deleted(true)
            .include_deleted(false)
            .get_by_id(7)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_include_deleted_does_not_touch_original() {
        let store = Arc::new(MemoryFileStore::new());
        let loader = loader(&store);

        let including = loader.include_deleted(true);
        assert_eq!(including.visibility(), Visibility::IncludeDeleted);
        assert_eq!(loader.visibility(), Visibility::LiveOnly);
    }

    #[tokio::test]
    async fn test_get_by_id_with_explicit_visibility() {
        let store = Arc::new(MemoryFileStore::new());
        let mut row = file_row(3, "gone.png", 1);
        row.deleted_at = Some(ts(10));
        row.deleted_by = Some(1);
        store.insert(row, &[]);

        let loader = loader(&store);
        assert!(loader
            .get_by_id_with(3, Visibility::LiveOnly)
            .await
            .unwrap()
            .is_none());
        assert!(loader
            .get_by_id_with(3, Visibility::IncludeDeleted)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_get_by_ids_drops_unresolved_and_keeps_order() {
        let store = Arc::new(MemoryFileStore::new());
        store.insert(file_row(1, "a.png", 1), &[]);
        store.insert(file_row(2, "b.png", 1), &[]);
        let mut deleted = file_row(3, "c.png", 1);
        deleted.deleted_at = Some(ts(1));
        deleted.deleted_by = Some(1);
        store.insert(deleted, &[]);

        let files = loader(&store).get_by_ids(&[2, 404, 3, 1]).await.unwrap();
        let ids: Vec<i64> = files.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_get_by_type_and_user() {
        let store = Arc::new(MemoryFileStore::new());
        let mut a = file_row(1, "a.png", 3);
        a.created_by = 10;
        let mut b = file_row(2, "b.mp4", 4);
        b.created_by = 20;
        let mut c = file_row(3, "c.png", 3);
        c.created_by = 20;
        c.deleted_at = Some(ts(9));
        c.deleted_by = Some(20);
        store.insert(a, &[]);
        store.insert(b, &[]);
        store.insert(c, &[]);

        let loader = loader(&store);
        let by_type: Vec<i64> = loader.get_by_type(3).await.unwrap().iter().map(|f| f.id).collect();
        assert_eq!(by_type, vec![1]);

        let by_user: Vec<i64> = loader.get_by_user(20).await.unwrap().iter().map(|f| f.id).collect();
        assert_eq!(by_user, vec![2]);

        assert!(loader.get_by_type(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_live_only() {
        let store = Arc::new(MemoryFileStore::new());
        store.insert(file_row(1, "a.png", 1), &[]);
        let mut gone = file_row(2, "b.png", 1);
        gone.deleted_at = Some(ts(1));
        gone.deleted_by = Some(1);
        store.insert(gone, &[]);

        let loader = loader(&store);
        assert_eq!(loader.get_all().await.unwrap().len(), 1);
        assert_eq!(loader.include_deleted(true).get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_matches_name_or_tag_with_or_semantics() {
        let store = Arc::new(MemoryFileStore::new());
        store.insert(file_row(1, "alfa-report.pdf", 1), &[]);
        store.insert(file_row(2, "header.png", 1), &["beeta", "hero"]);
        store.insert(file_row(3, "gamma.png", 1), &["misc"]);
        store.insert(file_row(4, "beta.png", 1), &["beta"]);

        let files = loader(&store).get_by_search_term("alpha beta").await.unwrap();
        let ids: Vec<i64> = files.iter().map(|f| f.id).collect();

        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[tokio::test]
    async fn test_search_skips_deleted_and_blank_terms() {
        let store = Arc::new(MemoryFileStore::new());
        let mut gone = file_row(1, "alpha.png", 1);
        gone.deleted_at = Some(ts(1));
        gone.deleted_by = Some(1);
        store.insert(gone, &[]);

        let loader = loader(&store);
        assert!(loader.get_by_search_term("alpha").await.unwrap().is_empty());
        assert!(loader.get_by_search_term("   ").await.unwrap().is_empty());
        assert!(loader.get_by_search_term("123").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_row_is_a_decode_error() {
        let store = Arc::new(MemoryFileStore::new());
        let mut row = file_row(5, "bad.png", 1);
        row.updated_at = Some(ts(3));
        store.insert(row, &[]);

        let err = loader(&store).get_by_id(5).await.unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[tokio::test]
    async fn test_malformed_deleted_row_is_hidden_not_an_error() {
        let store = Arc::new(MemoryFileStore::new());
        store.insert(file_row(1, "live.png", 1), &[]);
        let mut broken = file_row(2, "broken.png", 1);
        broken.deleted_at = Some(ts(5));
        broken.deleted_by = None;
        store.insert(broken, &[]);

        let loader = loader(&store);
        assert!(loader.get_by_id(2).await.unwrap().is_none());
        let all = loader.get_all().await.unwrap();
        assert_eq!(all.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1]);

        let err = loader.include_deleted(true).get_by_id(2).await.unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[tokio::test]
    async fn test_search_includes_deleted_when_asked() {
        let store = Arc::new(MemoryFileStore::new());
        store.insert(file_row(1, "alpha.png", 1), &[]);
        let mut gone = file_row(2, "alfa.png", 1);
        gone.deleted_at = Some(ts(1));
        gone.deleted_by = Some(1);
        store.insert(gone, &[]);

        let loader = loader(&store);
        let live: Vec<i64> = loader
            .get_by_search_term("alpha")
            .await
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(live, vec![1]);

        let all: Vec<i64> = loader
            .include_deleted(true)
            .get_by_search_term("alpha")
            .await
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(all, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_search_candidates_are_narrowed_by_word_initial() {
        let store = Arc::new(MemoryFileStore::new());
        store.insert(file_row(1, "company-logo.png", 1), &[]);
        store.insert(file_row(2, "banner.jpg", 1), &["summer", "lake"]);
        store.insert(file_row(3, "header.png", 1), &["misc"]);
        let mut gone = file_row(4, "legal.pdf", 1);
        gone.deleted_at = Some(ts(1));
        gone.deleted_by = Some(1);
        store.insert(gone, &[]);

        let live = store.search_candidates("L", true).await.unwrap();
        let pairs: Vec<(i64, Option<&str>)> = live
            .iter()
            .map(|c| (c.file_id, c.tag_name.as_deref()))
            .collect();
        assert_eq!(pairs, vec![(1, None), (2, Some("lake"))]);

        let with_deleted = store.search_candidates("L", false).await.unwrap();
        assert!(with_deleted.iter().any(|c| c.file_id == 4));
    }
}
