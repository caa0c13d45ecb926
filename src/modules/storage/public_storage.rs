//! Public path resolution for stored files
//!
//! Files are stored with scheme-qualified URLs such as
//! `cog://public/files/logo.png`. Public files are served from a configured
//! base (e.g. `/files` or a CDN), so the scheme prefix is swapped for it.

use tracing::warn;

use crate::core::config::StorageConfig;

/// Converts a stored file URL into a public-facing path
pub trait PublicPath: Send + Sync {
    fn public_url(&self, stored_url: &str) -> String;
}

/// Scheme-prefix based [`PublicPath`]
#[derive(Debug, Clone)]
pub struct PublicStorage {
    public_scheme: String,
    public_base_url: String,
}

impl PublicStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            public_scheme: config.public_scheme,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl PublicPath for PublicStorage {
    fn public_url(&self, stored_url: &str) -> String {
        if let Some(path) = stored_url.strip_prefix(&self.public_scheme) {
            return format!("{}/{}", self.public_base_url, path.trim_start_matches('/'));
        }

        // Already absolute; served as is
        if stored_url.starts_with("http://")
            || stored_url.starts_with("https://")
            || stored_url.starts_with('/')
        {
            return stored_url.to_string();
        }

        warn!("File URL '{}' is outside the public area", stored_url);
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(base: &str) -> PublicStorage {
        PublicStorage::new(StorageConfig {
            public_scheme: "cog://public/".to_string(),
            public_base_url: base.to_string(),
        })
    }

    #[test]
    fn test_public_scheme_is_rewritten() {
        let storage = storage("/files/");
        assert_eq!(
            storage.public_url("cog://public/images/logo.png"),
            "/files/images/logo.png"
        );
    }

    #[test]
    fn test_cdn_base() {
        let storage = storage("https://cdn.example.com/files");
        assert_eq!(
            storage.public_url("cog://public/a.pdf"),
            "https://cdn.example.com/files/a.pdf"
        );
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        let storage = storage("/files");
        assert_eq!(
            storage.public_url("https://example.com/x.png"),
            "https://example.com/x.png"
        );
        assert_eq!(storage.public_url("/static/x.png"), "/static/x.png");
    }

    #[test]
    fn test_private_urls_have_no_public_path() {
        let storage = storage("/files");
        assert_eq!(storage.public_url("cog://private/secret.pdf"), "");
    }
}
