//! File record management.

pub mod service;

pub use service::{FileService, NewFolder, RegisterUpload};
