//! Share link protocol and the anonymous access gate.

pub mod access;
pub mod link;
pub mod service;

pub use access::{AccessService, ShareAccess};
pub use link::LinkService;
pub use service::{ShareRequest, ShareService};
