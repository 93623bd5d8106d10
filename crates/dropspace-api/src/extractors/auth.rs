//! `AuthUser` extractor — pulls the identity provider's bearer token from
//! the Authorization header, verifies it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use dropspace_core::error::AppError;
use dropspace_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError(AppError::unauthorized("Missing Authorization header")))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError(AppError::unauthorized("Invalid Authorization header format"))
        })?;

        let claims = state.identity.verify(token)?;

        Ok(AuthUser(RequestContext::new(claims.sub)))
    }
}
