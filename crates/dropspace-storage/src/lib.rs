//! # dropspace-storage
//!
//! Content-store abstraction. Binary content lives in an external object
//! store/CDN; this crate only turns stored path keys into fetchable URLs.

pub mod content;

pub use content::{CdnContentStore, ContentStore};
