//! Identity-token verification configuration.
//!
//! Dropspace does not issue credentials itself; an external identity
//! provider signs bearer tokens carrying a stable user id. This section
//! configures how those tokens are verified.

use serde::{Deserialize, Serialize};

/// Identity verification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to verify identity-provider tokens (HMAC-SHA256).
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Expected token issuer. Empty disables the issuer check.
    #[serde(default)]
    pub issuer: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            issuer: String::new(),
        }
    }
}

fn default_token_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}
