//! File record entity and projections.

pub mod metadata;
pub mod model;

pub use metadata::SharedFileMetadata;
pub use model::{CreateFileRecord, FileRecord};
