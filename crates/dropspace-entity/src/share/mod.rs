//! Share grant entity and share-link value object.

pub mod link;
pub mod model;

pub use link::ShareLink;
pub use model::{CreateShareGrant, ShareGrant};
