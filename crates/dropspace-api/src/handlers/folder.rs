//! Folder handlers.

use axum::Json;
use axum::extract::State;

use dropspace_service::file::NewFolder;

use crate::dto::request::{CreateFolderRequest, validated};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let req = validated(req)?;

    let record = state
        .file_service
        .create_folder(
            &auth,
            NewFolder {
                name: req.name,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": record })))
}
