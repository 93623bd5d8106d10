//! Share link value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The result of sharing a file: the public token and URL.
///
/// Carries the token, never the file's internal id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLink {
    /// The opaque public share token.
    pub share_id: String,
    /// The full URL for accessing the share.
    pub share_url: String,
    /// When the link expires (None = never).
    pub expires_at: Option<DateTime<Utc>>,
}
