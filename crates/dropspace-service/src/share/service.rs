//! Share link creation and revocation.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use dropspace_auth::password::PasswordHasher;
use dropspace_core::config::sharing::SharingConfig;
use dropspace_core::error::AppError;
use dropspace_core::result::AppResult;
use dropspace_database::stores::{FileStore, ShareGrantStore};
use dropspace_entity::share::{CreateShareGrant, ShareLink};

use super::link::LinkService;
use crate::context::RequestContext;

/// Options for sharing a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRequest {
    /// Password protection (optional). Hashed before storage; the
    /// plaintext is never persisted.
    pub password: Option<String>,
    /// Lifetime of the link in hours (None = never expires).
    pub expiry_hours: Option<i64>,
}

/// Mints and revokes share links.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// File store.
    files: Arc<dyn FileStore>,
    /// Share grant store.
    grants: Arc<dyn ShareGrantStore>,
    /// Token generator.
    links: LinkService,
    /// Password hasher for protected shares.
    hasher: Arc<PasswordHasher>,
    /// Public URL settings.
    sharing: SharingConfig,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        files: Arc<dyn FileStore>,
        grants: Arc<dyn ShareGrantStore>,
        hasher: Arc<PasswordHasher>,
        sharing: SharingConfig,
    ) -> Self {
        Self {
            files,
            grants,
            links: LinkService::new(),
            hasher,
            sharing,
        }
    }

    /// Shares a file, returning its public link.
    ///
    /// Only the owner may share. Re-sharing an already-shared file keeps
    /// the existing token, so the public URL stays stable; password and
    /// expiry are taken from the current request each time. Every call
    /// appends a grant row to the audit trail.
    pub async fn create_share(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        req: ShareRequest,
    ) -> AppResult<ShareLink> {
        if let Some(password) = &req.password {
            if password.is_empty() {
                return Err(AppError::validation("Share password must not be empty"));
            }
        }
        if let Some(hours) = req.expiry_hours {
            if hours <= 0 {
                return Err(AppError::validation(
                    "Expiry must be a positive number of hours",
                ));
            }
        }

        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if file.user_id != ctx.user_id {
            return Err(AppError::unauthorized("Only the owner can share a file"));
        }

        let token = match &file.share_id {
            Some(existing) => existing.clone(),
            None => self.links.generate_token(),
        };

        let password_hash = match &req.password {
            Some(password) => Some(self.hasher.hash_password(password)?),
            None => None,
        };

        let expires_at = req.expiry_hours.map(|hours| ctx.request_time + Duration::hours(hours));

        let file = self
            .files
            .apply_share(file.id, &token, password_hash.as_deref(), expires_at)
            .await?;

        self.grants
            .insert(&CreateShareGrant {
                file_id: file.id,
                user_id: ctx.user_id.clone(),
                password: password_hash,
                expires_at,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            protected = file.share_password.is_some(),
            expires = ?expires_at,
            "Share link created"
        );

        Ok(ShareLink {
            share_url: self.sharing.share_url(&token),
            share_id: token,
            expires_at,
        })
    }

    /// Revokes sharing for a file.
    ///
    /// Clears the token and all share fields; the audit trail of grant
    /// rows is retained. A subsequent share mints a fresh token.
    pub async fn revoke_share(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if file.user_id != ctx.user_id {
            return Err(AppError::unauthorized(
                "Only the owner can revoke a share link",
            ));
        }

        self.files.clear_share(file.id).await?;

        info!(user_id = %ctx.user_id, file_id = %file.id, "Share link revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropspace_core::error::ErrorKind;

    use crate::testing::{MemoryFileStore, MemoryShareGrantStore, file_record};

    fn sharing_config() -> SharingConfig {
        SharingConfig {
            public_base_url: "https://drop.example.com".to_string(),
        }
    }

    fn service(
        files: &Arc<MemoryFileStore>,
        grants: &Arc<MemoryShareGrantStore>,
    ) -> ShareService {
        ShareService::new(
            files.clone(),
            grants.clone(),
            Arc::new(PasswordHasher::new()),
            sharing_config(),
        )
    }

    fn plain_request() -> ShareRequest {
        ShareRequest {
            password: None,
            expiry_hours: None,
        }
    }

    #[tokio::test]
    async fn test_share_mints_token_and_builds_url() {
        let files = MemoryFileStore::new();
        let grants = MemoryShareGrantStore::new();
        let id = files.seed(file_record("alice", "a.txt"));

        let ctx = RequestContext::new("alice");
        let link = service(&files, &grants)
            .create_share(&ctx, id, plain_request())
            .await
            .expect("share");

        assert_eq!(
            link.share_url,
            format!("https://drop.example.com/share/{}", link.share_id)
        );
        assert!(link.expires_at.is_none());

        let stored = files.get(id).expect("present");
        assert!(stored.is_public);
        assert_eq!(stored.share_id.as_deref(), Some(link.share_id.as_str()));
    }

    #[tokio::test]
    async fn test_resharing_keeps_the_same_token() {
        let files = MemoryFileStore::new();
        let grants = MemoryShareGrantStore::new();
        let id = files.seed(file_record("alice", "a.txt"));

        let ctx = RequestContext::new("alice");
        let svc = service(&files, &grants);
        let first = svc.create_share(&ctx, id, plain_request()).await.expect("share");
        let second = svc.create_share(&ctx, id, plain_request()).await.expect("share");

        assert_eq!(first.share_id, second.share_id);
        // Each share event still lands in the audit trail.
        assert_eq!(grants.count_for_file(id), 2);
    }

    #[tokio::test]
    async fn test_only_the_owner_can_share() {
        let files = MemoryFileStore::new();
        let grants = MemoryShareGrantStore::new();
        let id = files.seed(file_record("alice", "a.txt"));

        let ctx = RequestContext::new("mallory");
        let err = service(&files, &grants)
            .create_share(&ctx, id, plain_request())
            .await
            .expect_err("not the owner");

        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert!(!files.get(id).expect("present").is_public);
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let files = MemoryFileStore::new();
        let grants = MemoryShareGrantStore::new();
        let id = files.seed(file_record("alice", "a.txt"));

        let ctx = RequestContext::new("alice");
        service(&files, &grants)
            .create_share(
                &ctx,
                id,
                ShareRequest {
                    password: Some("hunter2".to_string()),
                    expiry_hours: None,
                },
            )
            .await
            .expect("share");

        let stored = files.get(id).expect("present");
        let hash = stored.share_password.expect("protected");
        assert_ne!(hash, "hunter2");
        assert!(
            PasswordHasher::new()
                .verify_password("hunter2", &hash)
                .expect("verify")
        );
    }

    #[tokio::test]
    async fn test_expiry_hours_set_the_deadline() {
        let files = MemoryFileStore::new();
        let grants = MemoryShareGrantStore::new();
        let id = files.seed(file_record("alice", "a.txt"));

        let ctx = RequestContext::new("alice");
        let link = service(&files, &grants)
            .create_share(
                &ctx,
                id,
                ShareRequest {
                    password: None,
                    expiry_hours: Some(24),
                },
            )
            .await
            .expect("share");

        assert_eq!(
            link.expires_at.expect("expiry"),
            ctx.request_time + Duration::hours(24)
        );
    }

    #[tokio::test]
    async fn test_empty_password_is_rejected() {
        let files = MemoryFileStore::new();
        let grants = MemoryShareGrantStore::new();
        let id = files.seed(file_record("alice", "a.txt"));

        let ctx = RequestContext::new("alice");
        let err = service(&files, &grants)
            .create_share(
                &ctx,
                id,
                ShareRequest {
                    password: Some(String::new()),
                    expiry_hours: None,
                },
            )
            .await
            .expect_err("empty password");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_revoke_clears_share_fields_and_next_share_is_fresh() {
        let files = MemoryFileStore::new();
        let grants = MemoryShareGrantStore::new();
        let id = files.seed(file_record("alice", "a.txt"));

        let ctx = RequestContext::new("alice");
        let svc = service(&files, &grants);
        let first = svc.create_share(&ctx, id, plain_request()).await.expect("share");
        svc.revoke_share(&ctx, id).await.expect("revoke");

        let stored = files.get(id).expect("present");
        assert!(!stored.is_public);
        assert!(stored.share_id.is_none());
        assert!(stored.share_password.is_none());

        let second = svc.create_share(&ctx, id, plain_request()).await.expect("share");
        assert_ne!(first.share_id, second.share_id);
    }
}
