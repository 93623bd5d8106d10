//! Share grant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An audit record of a sharing relationship.
///
/// One row is appended per share event; rows accumulate across re-shares
/// of the same file and only disappear when the file itself is deleted
/// (cascade). Only the file's own `share_id` is live — grants are history
/// plus access accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ShareGrant {
    /// Unique grant identifier.
    pub id: Uuid,
    /// The shared file.
    pub file_id: Uuid,
    /// The sharing user.
    pub user_id: String,
    /// Argon2 hash of the share password at grant time.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Expiry at grant time (None = never).
    pub expires_at: Option<DateTime<Utc>>,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
    /// Number of successful anonymous accesses.
    pub access_count: i32,
    /// When the share was last successfully accessed.
    pub last_accessed_at: Option<DateTime<Utc>>,
}

/// Data required to create a new share grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareGrant {
    /// The shared file.
    pub file_id: Uuid,
    /// The sharing user.
    pub user_id: String,
    /// Password hash to record.
    pub password: Option<String>,
    /// Expiry to record.
    pub expires_at: Option<DateTime<Utc>>,
}
