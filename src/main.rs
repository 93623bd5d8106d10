//! Dropspace server — hosted file-sharing backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use dropspace_api::state::AppState;
use dropspace_auth::identity::IdentityVerifier;
use dropspace_auth::password::PasswordHasher;
use dropspace_core::config::AppConfig;
use dropspace_core::error::AppError;
use dropspace_database::DatabasePool;
use dropspace_database::stores::{FileStore, PgFileStore, PgShareGrantStore, ShareGrantStore};
use dropspace_service::file::FileService;
use dropspace_service::share::{AccessService, ShareService};
use dropspace_service::trash::TrashService;
use dropspace_storage::content::{CdnContentStore, ContentStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("DROPSPACE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Dropspace v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    dropspace_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // ── Stores ───────────────────────────────────────────────────
    let file_store: Arc<dyn FileStore> = Arc::new(PgFileStore::new(db_pool.clone()));
    let grant_store: Arc<dyn ShareGrantStore> = Arc::new(PgShareGrantStore::new(db_pool.clone()));
    let content_store: Arc<dyn ContentStore> = Arc::new(CdnContentStore::new(&config.storage));

    // ── Auth primitives ──────────────────────────────────────────
    let hasher = Arc::new(PasswordHasher::new());
    let identity = Arc::new(IdentityVerifier::new(&config.auth));

    // ── Services ─────────────────────────────────────────────────
    let file_service = Arc::new(FileService::new(
        Arc::clone(&file_store),
        Arc::clone(&content_store),
    ));
    let trash_service = Arc::new(TrashService::new(Arc::clone(&file_store)));
    let share_service = Arc::new(ShareService::new(
        Arc::clone(&file_store),
        Arc::clone(&grant_store),
        Arc::clone(&hasher),
        config.sharing.clone(),
    ));
    let access_service = Arc::new(AccessService::new(file_store, grant_store, hasher));

    // ── HTTP server ──────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        db_pool,
        identity,
        file_service,
        trash_service,
        share_service,
        access_service,
    };

    let app = dropspace_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Dropspace server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Dropspace server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
