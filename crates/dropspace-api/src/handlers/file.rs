//! File record handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use dropspace_database::stores::FileListView;
use dropspace_service::file::RegisterUpload;

use crate::dto::request::{
    ListFilesParams, MoveFileRequest, RegisterUploadRequest, RenameFileRequest, validated,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/files/upload
pub async fn register_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RegisterUploadRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let req = validated(req)?;

    let record = state
        .file_service
        .register_upload(
            &auth,
            RegisterUpload {
                name: req.name,
                path: req.path,
                size: req.size,
                mime_type: req.mime_type,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": record })))
}

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListFilesParams>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let view = if params.trash.unwrap_or(false) {
        FileListView::Trash
    } else if params.starred.unwrap_or(false) {
        FileListView::Starred
    } else {
        FileListView::Folder(params.parent_id)
    };

    let result = state
        .file_service
        .list(&auth, view, pagination.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let record = state.file_service.get(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": record })))
}

/// PATCH /api/files/{id}/star
pub async fn toggle_star(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let record = state.file_service.toggle_star(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": record })))
}

/// PATCH /api/files/{id}/rename
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameFileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let req = validated(req)?;
    let record = state.file_service.rename(&auth, id, &req.name).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": record })))
}

/// PATCH /api/files/{id}/move
pub async fn move_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveFileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let record = state.file_service.move_to(&auth, id, req.parent_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": record })))
}
