//! Share link handlers and the anonymous access gate endpoint.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use dropspace_service::share::{ShareAccess, ShareRequest};

use crate::dto::request::{AccessShareRequest, ShareFileRequest};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/{id}/share
pub async fn share_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ShareFileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let link = state
        .share_service
        .create_share(
            &auth,
            id,
            ShareRequest {
                password: req.password,
                expiry_hours: req.expiry_hours,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": link })))
}

/// DELETE /api/files/{id}/share
pub async fn revoke_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.share_service.revoke_share(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Share link revoked" } }),
    ))
}

/// POST /api/share/{share_id} — anonymous share access.
///
/// A password-protected share accessed without a password answers with
/// `requires_password: true` so the client can prompt instead of showing
/// a hard failure.
pub async fn access_shared(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
    Json(req): Json<AccessShareRequest>,
) -> Result<Response, ApiError> {
    let outcome = state
        .access_service
        .access_share(&share_id, req.password.as_deref())
        .await?;

    let response = match outcome {
        ShareAccess::Granted(metadata) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "data": metadata })),
        )
            .into_response(),
        ShareAccess::PasswordRequired => (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({
                "success": false,
                "error": "PASSWORD_REQUIRED",
                "message": "Password required",
                "requires_password": true,
            })),
        )
            .into_response(),
    };

    Ok(response)
}
