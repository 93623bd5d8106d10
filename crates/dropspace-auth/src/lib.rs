//! # dropspace-auth
//!
//! Argon2id hashing for share passwords, and verification of the bearer
//! tokens minted by the external identity provider.

pub mod identity;
pub mod password;

pub use identity::IdentityVerifier;
pub use password::PasswordHasher;
