//! Content-store trait and the CDN-backed implementation.

use dropspace_core::config::storage::StorageConfig;

/// Maps a stored path/key to fetchable URLs.
///
/// Uploads go from the client straight to the external store; the server
/// only ever derives URLs from the path key it records.
pub trait ContentStore: Send + Sync + std::fmt::Debug + 'static {
    /// The fetchable URL of the content at `path`.
    fn file_url(&self, path: &str) -> String;

    /// The fetchable thumbnail URL for the content at `path`, if the
    /// store generates thumbnails.
    fn thumbnail_url(&self, path: &str) -> Option<String>;
}

/// URL-prefix content store for a CDN-style backend.
#[derive(Debug, Clone)]
pub struct CdnContentStore {
    content_base_url: String,
    thumbnail_base_url: Option<String>,
}

impl CdnContentStore {
    /// Creates a content store from configuration.
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            content_base_url: config.content_base_url.trim_end_matches('/').to_string(),
            thumbnail_base_url: if config.thumbnail_base_url.is_empty() {
                None
            } else {
                Some(config.thumbnail_base_url.trim_end_matches('/').to_string())
            },
        }
    }
}

impl ContentStore for CdnContentStore {
    fn file_url(&self, path: &str) -> String {
        format!("{}/{}", self.content_base_url, path.trim_start_matches('/'))
    }

    fn thumbnail_url(&self, path: &str) -> Option<String> {
        self.thumbnail_base_url
            .as_ref()
            .map(|base| format!("{base}/{}", path.trim_start_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_join_cleanly() {
        let store = CdnContentStore::new(&StorageConfig {
            content_base_url: "https://cdn.example.com/files/".to_string(),
            thumbnail_base_url: "https://cdn.example.com/thumbs".to_string(),
        });

        assert_eq!(
            store.file_url("/u1/cat.png"),
            "https://cdn.example.com/files/u1/cat.png"
        );
        assert_eq!(
            store.thumbnail_url("u1/cat.png").as_deref(),
            Some("https://cdn.example.com/thumbs/u1/cat.png")
        );
    }

    #[test]
    fn test_thumbnails_can_be_disabled() {
        let store = CdnContentStore::new(&StorageConfig {
            content_base_url: "https://cdn.example.com".to_string(),
            thumbnail_base_url: String::new(),
        });
        assert!(store.thumbnail_url("u1/cat.png").is_none());
    }
}
