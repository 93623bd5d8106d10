//! # dropspace-database
//!
//! PostgreSQL connection management, the store traits services depend on,
//! and their concrete sqlx implementations.

pub mod connection;
pub mod migration;
pub mod stores;

pub use connection::DatabasePool;
