//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use dropspace_core::error::AppError;
use dropspace_core::result::AppResult;

/// Runs validator checks, mapping failures into the domain error type.
pub fn validated<T: Validate>(req: T) -> AppResult<T> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(req)
}

/// Register a file whose content was uploaded to the content store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUploadRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Content-store path/key.
    #[validate(length(min = 1, message = "Content path is required"))]
    pub path: String,
    /// Size in bytes.
    #[validate(range(min = 0, message = "Size must not be negative"))]
    pub size: i64,
    /// MIME type.
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "MIME type is required"))]
    pub mime_type: String,
    /// Containing folder.
    pub parent_id: Option<Uuid>,
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Containing folder.
    pub parent_id: Option<Uuid>,
}

/// Rename request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFileRequest {
    /// New name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Move (re-parent) request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFileRequest {
    /// Target folder (None = root level).
    pub parent_id: Option<Uuid>,
}

/// Bulk lifecycle request carrying explicit record ids.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FileIdsRequest {
    /// Targeted record ids.
    #[validate(length(min = 1, message = "file_ids must not be empty"))]
    pub file_ids: Vec<Uuid>,
}

/// Share creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareFileRequest {
    /// Optional password protection.
    pub password: Option<String>,
    /// Optional lifetime in hours.
    pub expiry_hours: Option<i64>,
}

/// Anonymous share access request.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AccessShareRequest {
    /// Password, if the share is protected.
    pub password: Option<String>,
}

/// Query parameters for listing files.
#[derive(Debug, Clone, Deserialize)]
pub struct ListFilesParams {
    /// Folder to list (None = root level).
    pub parent_id: Option<Uuid>,
    /// Restrict to starred records.
    pub starred: Option<bool>,
    /// List the trash view instead of active records.
    pub trash: Option<bool>,
}
