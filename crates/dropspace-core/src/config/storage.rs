//! Content-store configuration.
//!
//! Binary content lives in an external object store/CDN; Dropspace only
//! derives fetchable URLs from stored path keys.

use serde::{Deserialize, Serialize};

/// External content-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base URL under which uploaded content is served.
    #[serde(default = "default_content_base_url")]
    pub content_base_url: String,
    /// Base URL for generated thumbnails. Empty disables thumbnails.
    #[serde(default)]
    pub thumbnail_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            content_base_url: default_content_base_url(),
            thumbnail_base_url: String::new(),
        }
    }
}

fn default_content_base_url() -> String {
    "http://localhost:9000/dropspace".to_string()
}
