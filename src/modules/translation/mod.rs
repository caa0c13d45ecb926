//! Localised strings
//!
//! The host platform owns the full translation catalogue. The file manager
//! ships its own keys so it can run standalone.

use std::collections::HashMap;

/// Returns the localised string for a key
pub trait Translator: Send + Sync {
    fn trans(&self, key: &str) -> String;
}

/// English strings shipped with the file manager
const DEFAULT_CATALOG: &[(&str, &str)] = &[
    ("ms.file_manager.select.default", "-- Select a file --"),
    ("ms.file_manager.detail.title", "File details"),
    ("ms.file_manager.listing.title", "Files"),
];

/// Dictionary-backed [`Translator`]; unknown keys translate to themselves
#[derive(Debug, Clone)]
pub struct CatalogTranslator {
    messages: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn new<I, K, V>(messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            messages: messages
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Default for CatalogTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG.iter().copied())
    }
}

impl Translator for CatalogTranslator {
    fn trans(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
