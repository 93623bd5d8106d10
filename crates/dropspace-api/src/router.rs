//! Route definitions for the Dropspace HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size_bytes as usize;

    let api_routes = Router::new()
        .merge(file_routes())
        .merge(trash_routes())
        .merge(share_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// File and folder CRUD
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route("/files/upload", post(handlers::file::register_upload))
        .route("/files/{id}", get(handlers::file::get_file))
        .route("/files/{id}/star", patch(handlers::file::toggle_star))
        .route("/files/{id}/rename", patch(handlers::file::rename_file))
        .route("/files/{id}/move", patch(handlers::file::move_file))
        .route("/folders", post(handlers::folder::create_folder))
}

/// Trash lifecycle: soft-delete, restore, permanent delete
fn trash_routes() -> Router<AppState> {
    Router::new()
        .route("/files/trash", post(handlers::trash::trash_files))
        .route("/files/restore", post(handlers::trash::restore_files))
        .route("/files/restore-all", post(handlers::trash::restore_all))
        .route("/files/delete", post(handlers::trash::delete_files))
        .route("/files/empty-trash", post(handlers::trash::empty_trash))
}

/// Share management and anonymous access
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/files/{id}/share", post(handlers::share::share_file))
        .route("/files/{id}/share", delete(handlers::share::revoke_share))
        .route("/share/{share_id}", post(handlers::share::access_shared))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);
    cors = cors.allow_headers(Any);

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
