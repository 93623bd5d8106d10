//! Share link token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

/// Number of random bytes per token. 16 bytes encode to 22 URL-safe
/// characters, leaving collisions negligible at any realistic scale.
const TOKEN_BYTES: usize = 16;

/// Generates unguessable share link tokens.
#[derive(Debug, Clone)]
pub struct LinkService;

impl LinkService {
    /// Creates a new link service.
    pub fn new() -> Self {
        Self
    }

    /// Generates a URL-safe random token for share links.
    pub fn generate_token(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

impl Default for LinkService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tokens_are_url_safe() {
        let token = LinkService::new().generate_token();
        assert_eq!(token.len(), 22);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_tokens_do_not_repeat() {
        let links = LinkService::new();
        let tokens: HashSet<String> = (0..1000).map(|_| links.generate_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }
}
