//! # dropspace-core
//!
//! Core crate for Dropspace. Contains configuration schemas, shared
//! pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Dropspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
