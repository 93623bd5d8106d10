//! File record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file or folder stored in Dropspace.
///
/// Files and folders share one row type, discriminated by `is_folder`.
/// A folder has `size = 0` and an empty content URL; `size` is never an
/// aggregate of folder contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Display name (including extension for files).
    pub name: String,
    /// Path/key of the content within the external content store.
    pub path: String,
    /// Size in bytes (0 for folders).
    pub size: i64,
    /// MIME type ("folder" for folders).
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Fetchable URL of the content.
    pub file_url: String,
    /// Fetchable URL of the thumbnail, if one exists.
    pub thumbnail_url: Option<String>,
    /// Opaque id of the owning user, issued by the identity provider.
    pub user_id: String,
    /// Containing folder (None for root-level records).
    pub parent_id: Option<Uuid>,
    /// Whether this record is a folder.
    pub is_folder: bool,
    /// Whether the owner starred this record.
    pub is_starred: bool,
    /// Whether this record is soft-deleted (recoverable).
    pub is_trash: bool,
    /// Whether this record is reachable through its share token.
    pub is_public: bool,
    /// Argon2 hash of the share password, if protection is enabled.
    #[serde(skip_serializing)]
    pub share_password: Option<String>,
    /// When the share link stops working (None = never).
    pub share_expires_at: Option<DateTime<Utc>>,
    /// Opaque public share token.
    pub share_id: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FileRecord {
    /// Whether the share link has expired as of `now`.
    ///
    /// Expiry is strict: the link is dead exactly when `now` is past the
    /// stored instant, so an access at the instant itself still succeeds.
    pub fn is_share_expired(&self, now: DateTime<Utc>) -> bool {
        match self.share_expires_at {
            Some(expires_at) => now > expires_at,
            None => false,
        }
    }

    /// Whether accessing the share requires a password.
    pub fn has_share_password(&self) -> bool {
        self.share_password.is_some()
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRecord {
    /// Display name.
    pub name: String,
    /// Content-store path/key (empty for folders).
    pub path: String,
    /// Size in bytes.
    pub size: i64,
    /// MIME type.
    pub mime_type: String,
    /// Fetchable content URL.
    pub file_url: String,
    /// Fetchable thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// Owning user id.
    pub user_id: String,
    /// Containing folder.
    pub parent_id: Option<Uuid>,
    /// Whether the record is a folder.
    pub is_folder: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_at: Option<DateTime<Utc>>) -> FileRecord {
        let now = Utc::now();
        FileRecord {
            id: Uuid::new_v4(),
            name: "report.pdf".to_string(),
            path: "u1/report.pdf".to_string(),
            size: 1024,
            mime_type: "application/pdf".to_string(),
            file_url: "https://cdn.example.com/u1/report.pdf".to_string(),
            thumbnail_url: None,
            user_id: "user_1".to_string(),
            parent_id: None,
            is_folder: false,
            is_starred: false,
            is_trash: false,
            is_public: true,
            share_password: None,
            share_expires_at: expires_at,
            share_id: Some("tok".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_no_expiry_never_expires() {
        let file = record(None);
        assert!(!file.is_share_expired(Utc::now() + Duration::days(365)));
    }

    #[test]
    fn test_expiry_is_strict() {
        let deadline = Utc::now();
        let file = record(Some(deadline));
        assert!(!file.is_share_expired(deadline));
        assert!(!file.is_share_expired(deadline - Duration::minutes(1)));
        assert!(file.is_share_expired(deadline + Duration::seconds(1)));
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let mut file = record(None);
        file.share_password = Some("$argon2id$...".to_string());
        let json = serde_json::to_value(&file).expect("serialize");
        assert!(json.get("share_password").is_none());
        assert_eq!(json["type"], "application/pdf");
    }
}
