//! Restricted file metadata served to anonymous share requests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::FileRecord;

/// The projection of a [`FileRecord`] released through a share link.
///
/// Deliberately excludes the owner id, the content-store path, and the
/// password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFileMetadata {
    /// Record id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Fetchable content URL.
    pub file_url: String,
    /// Fetchable thumbnail URL.
    pub thumbnail_url: Option<String>,
}

impl From<&FileRecord> for SharedFileMetadata {
    fn from(file: &FileRecord) -> Self {
        Self {
            id: file.id,
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            size: file.size,
            file_url: file.file_url.clone(),
            thumbnail_url: file.thumbnail_url.clone(),
        }
    }
}
