//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use dropspace_auth::identity::IdentityVerifier;
use dropspace_core::config::AppConfig;
use dropspace_service::file::FileService;
use dropspace_service::share::{AccessService, ShareService};
use dropspace_service::trash::TrashService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks).
    pub db_pool: PgPool,
    /// Identity-provider token verifier.
    pub identity: Arc<IdentityVerifier>,
    /// File record service.
    pub file_service: Arc<FileService>,
    /// Trash lifecycle service.
    pub trash_service: Arc<TrashService>,
    /// Share link service.
    pub share_service: Arc<ShareService>,
    /// Anonymous access gate.
    pub access_service: Arc<AccessService>,
}
