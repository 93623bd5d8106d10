//! Share-link configuration.

use serde::{Deserialize, Serialize};

/// Configuration for publicly reachable share links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Base URL the application is reachable under; share URLs are built
    /// as `{public_base_url}/share/{token}`.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
        }
    }
}

impl SharingConfig {
    /// Build the externally visible URL for a share token.
    pub fn share_url(&self, token: &str) -> String {
        format!(
            "{}/share/{token}",
            self.public_base_url.trim_end_matches('/')
        )
    }
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url_strips_trailing_slash() {
        let config = SharingConfig {
            public_base_url: "https://drop.example.com/".to_string(),
        };
        assert_eq!(
            config.share_url("abc123"),
            "https://drop.example.com/share/abc123"
        );
    }
}
