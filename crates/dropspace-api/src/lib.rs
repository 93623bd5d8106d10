//! # dropspace-api
//!
//! HTTP API layer for Dropspace built on Axum.
//!
//! Provides the REST endpoints, the anonymous share gate endpoint,
//! middleware (CORS, logging), extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
