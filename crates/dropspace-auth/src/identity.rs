//! Verification of identity-provider bearer tokens.
//!
//! Dropspace never issues credentials; it only verifies the HMAC-signed
//! tokens the external identity provider mints and extracts the stable
//! user id from the subject claim.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use dropspace_core::config::auth::AuthConfig;
use dropspace_core::error::AppError;

/// Claims payload expected in identity-provider tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject — the stable user id.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Decodes and validates identity-provider tokens.
#[derive(Clone)]
pub struct IdentityVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl IdentityVerifier {
    /// Creates a verifier from configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if !config.issuer.is_empty() {
            validation.set_issuer(&[&config.issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies a bearer token and returns its claims.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AppError> {
        decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::unauthorized("Invalid or expired access token"))
    }
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier").finish_non_exhaustive()
    }
}
