//! Trash lifecycle handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{FileIdsRequest, validated};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/trash
pub async fn trash_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<FileIdsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let req = validated(req)?;
    let moved = state.trash_service.trash_files(&auth, &req.file_ids).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "moved_count": moved } }),
    ))
}

/// POST /api/files/restore
pub async fn restore_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<FileIdsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let req = validated(req)?;
    let restored = state
        .trash_service
        .restore_files(&auth, &req.file_ids)
        .await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "restored_count": restored } }),
    ))
}

/// POST /api/files/restore-all
pub async fn restore_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let restored = state.trash_service.restore_all(&auth).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "restored_count": restored } }),
    ))
}

/// POST /api/files/delete
pub async fn delete_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<FileIdsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let req = validated(req)?;
    let deleted = state
        .trash_service
        .delete_files(&auth, &req.file_ids)
        .await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "deleted_count": deleted } }),
    ))
}

/// POST /api/files/empty-trash
pub async fn empty_trash(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.trash_service.empty_trash(&auth).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "deleted_count": deleted } }),
    ))
}
