//! Anonymous share access gate.
//!
//! Converts a share token plus an optional password into either a
//! restricted metadata projection or a typed denial. No identity is
//! required; password guesses are not throttled at this layer.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use dropspace_auth::password::PasswordHasher;
use dropspace_core::error::AppError;
use dropspace_core::result::AppResult;
use dropspace_database::stores::{FileStore, ShareGrantStore};
use dropspace_entity::file::SharedFileMetadata;
use dropspace_entity::share::CreateShareGrant;

/// Outcome of a share access evaluation that did not end in a denial.
#[derive(Debug, Clone)]
pub enum ShareAccess {
    /// Access granted; the restricted projection of the file.
    Granted(SharedFileMetadata),
    /// The share is password-protected and no password was supplied.
    /// Distinguished from a hard denial so the caller can prompt.
    PasswordRequired,
}

/// Evaluates anonymous share requests.
#[derive(Debug, Clone)]
pub struct AccessService {
    /// File store.
    files: Arc<dyn FileStore>,
    /// Share grant store.
    grants: Arc<dyn ShareGrantStore>,
    /// Password hasher for verification.
    hasher: Arc<PasswordHasher>,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(
        files: Arc<dyn FileStore>,
        grants: Arc<dyn ShareGrantStore>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            files,
            grants,
            hasher,
        }
    }

    /// Evaluates a share token and optional password.
    ///
    /// Checks run in order and short-circuit: token lookup, public flag,
    /// expiry against the wall clock, then the password gate. On success
    /// the matching grant has its access counter bumped and its
    /// last-accessed stamp refreshed.
    pub async fn access_share(
        &self,
        share_id: &str,
        password: Option<&str>,
    ) -> AppResult<ShareAccess> {
        let file = self
            .files
            .find_by_share_id(share_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share link not found"))?;

        if !file.is_public {
            return Err(AppError::forbidden("File is not shared"));
        }

        if file.is_share_expired(Utc::now()) {
            return Err(AppError::forbidden("Share link has expired"));
        }

        if let Some(hash) = &file.share_password {
            let Some(supplied) = password else {
                return Ok(ShareAccess::PasswordRequired);
            };
            if !self.hasher.verify_password(supplied, hash)? {
                return Err(AppError::forbidden("Invalid password"));
            }
        }

        // The grant trail self-heals: if the file was shared before grants
        // existed, or history was cleared, recreate the row on first access.
        let grant = match self.grants.find_latest_for_file(file.id).await? {
            Some(grant) => grant,
            None => {
                self.grants
                    .insert(&CreateShareGrant {
                        file_id: file.id,
                        user_id: file.user_id.clone(),
                        password: file.share_password.clone(),
                        expires_at: file.share_expires_at,
                    })
                    .await?
            }
        };

        self.grants.record_access(grant.id).await?;

        debug!(file_id = %file.id, "Share accessed");
        Ok(ShareAccess::Granted(SharedFileMetadata::from(&file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use dropspace_core::config::sharing::SharingConfig;
    use dropspace_core::error::ErrorKind;

    use crate::context::RequestContext;
    use crate::share::service::{ShareRequest, ShareService};
    use crate::testing::{MemoryFileStore, MemoryShareGrantStore, file_record};

    struct Harness {
        files: Arc<MemoryFileStore>,
        grants: Arc<MemoryShareGrantStore>,
        shares: ShareService,
        access: AccessService,
    }

    impl Harness {
        async fn access_share(
            &self,
            token: &str,
            password: Option<&str>,
        ) -> AppResult<ShareAccess> {
            self.access.access_share(token, password).await
        }
    }

    fn harness() -> Harness {
        let files = MemoryFileStore::new();
        let grants = MemoryShareGrantStore::new();
        let hasher = Arc::new(PasswordHasher::new());
        let shares = ShareService::new(
            files.clone(),
            grants.clone(),
            hasher.clone(),
            SharingConfig {
                public_base_url: "https://drop.example.com".to_string(),
            },
        );
        let access = AccessService::new(files.clone(), grants.clone(), hasher);
        Harness {
            files,
            grants,
            shares,
            access,
        }
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_found() {
        let h = harness();
        let err = h
            .access_share("no-such-token", None)
            .await
            .expect_err("unknown token");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_password_round_trip() {
        let h = harness();
        let id = h.files.seed(file_record("alice", "secret.pdf"));
        let ctx = RequestContext::new("alice");
        let link = h
            .shares
            .create_share(
                &ctx,
                id,
                ShareRequest {
                    password: Some("p".to_string()),
                    expiry_hours: None,
                },
            )
            .await
            .expect("share");

        // No password: the caller must be told to prompt.
        match h.access_share(&link.share_id, None).await.expect("gate") {
            ShareAccess::PasswordRequired => {}
            other => panic!("expected PasswordRequired, got {other:?}"),
        }

        // Wrong password: hard denial.
        let err = h
            .access_share(&link.share_id, Some("wrong"))
            .await
            .expect_err("wrong password");
        assert_eq!(err.kind, ErrorKind::Forbidden);

        // Correct password: restricted metadata, nothing sensitive.
        match h.access_share(&link.share_id, Some("p")).await.expect("gate") {
            ShareAccess::Granted(meta) => {
                assert_eq!(meta.name, "secret.pdf");
                assert_eq!(meta.id, id);
            }
            other => panic!("expected Granted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_not_public_is_forbidden() {
        let h = harness();
        let mut record = file_record("alice", "a.txt");
        record.share_id = Some("stale-token".to_string());
        record.is_public = false;
        h.files.seed(record);

        let err = h
            .access_share("stale-token", None)
            .await
            .expect_err("not shared");
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_expiry_boundary() {
        let h = harness();

        let mut live = file_record("alice", "live.txt");
        live.is_public = true;
        live.share_id = Some("live-token".to_string());
        live.share_expires_at = Some(Utc::now() + Duration::minutes(1));
        h.files.seed(live);

        let mut dead = file_record("alice", "dead.txt");
        dead.is_public = true;
        dead.share_id = Some("dead-token".to_string());
        dead.share_expires_at = Some(Utc::now() - Duration::minutes(1));
        h.files.seed(dead);

        assert!(matches!(
            h.access_share("live-token", None).await.expect("gate"),
            ShareAccess::Granted(_)
        ));

        let err = h
            .access_share("dead-token", None)
            .await
            .expect_err("expired");
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_access_bumps_the_counter_and_stamp() {
        let h = harness();
        let id = h.files.seed(file_record("alice", "a.txt"));
        let ctx = RequestContext::new("alice");
        let link = h
            .shares
            .create_share(
                &ctx,
                id,
                ShareRequest {
                    password: None,
                    expiry_hours: None,
                },
            )
            .await
            .expect("share");

        h.access_share(&link.share_id, None).await.expect("gate");
        h.access_share(&link.share_id, None).await.expect("gate");

        let grant = h.grants.latest_for_file(id).expect("grant");
        assert_eq!(grant.access_count, 2);
        assert!(grant.last_accessed_at.is_some());
    }

    #[tokio::test]
    async fn test_grant_self_heals_on_first_access() {
        let h = harness();
        let mut record = file_record("alice", "old.txt");
        record.is_public = true;
        record.share_id = Some("old-token".to_string());
        let id = h.files.seed(record);
        assert_eq!(h.grants.count_for_file(id), 0);

        h.access_share("old-token", None).await.expect("gate");

        let grant = h.grants.latest_for_file(id).expect("recreated");
        assert_eq!(grant.access_count, 1);
        assert_eq!(grant.user_id, "alice");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_accesses_do_not_lose_counts() {
        let h = harness();
        let id = h.files.seed(file_record("alice", "hot.txt"));
        let ctx = RequestContext::new("alice");
        let link = h
            .shares
            .create_share(
                &ctx,
                id,
                ShareRequest {
                    password: None,
                    expiry_hours: None,
                },
            )
            .await
            .expect("share");

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..100 {
            let access = h.access.clone();
            let token = link.share_id.clone();
            tasks.spawn(async move { access.access_share(&token, None).await });
        }
        while let Some(result) = tasks.join_next().await {
            assert!(matches!(
                result.expect("join").expect("gate"),
                ShareAccess::Granted(_)
            ));
        }

        assert_eq!(h.grants.latest_for_file(id).expect("grant").access_count, 100);
    }

    #[tokio::test]
    async fn test_metadata_projection_is_restricted() {
        let h = harness();
        let mut record = file_record("alice", "a.txt");
        record.is_public = true;
        record.share_id = Some("token-a".to_string());
        h.files.seed(record);

        let ShareAccess::Granted(meta) =
            h.access_share("token-a", None).await.expect("gate")
        else {
            panic!("expected Granted");
        };

        let json = serde_json::to_value(&meta).expect("serialize");
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert!(keys.contains(&"file_url"));
        assert!(!keys.contains(&"user_id"));
        assert!(!keys.contains(&"path"));
        assert!(!keys.contains(&"share_password"));
    }

    #[tokio::test]
    async fn test_concurrent_self_heal_settles_on_one_counted_grant() {
        // Two racing first accesses may both insert a grant; the counter
        // on whichever row later lookups settle on must still be exact
        // for subsequent accesses.
        let h = harness();
        let mut record = file_record("alice", "race.txt");
        record.is_public = true;
        record.share_id = Some("race-token".to_string());
        let id = h.files.seed(record);

        h.access_share("race-token", None).await.expect("gate");
        let first = h.grants.latest_for_file(id).expect("grant");
        h.access_share("race-token", None).await.expect("gate");
        let second = h.grants.latest_for_file(id).expect("grant");

        assert_eq!(first.id, second.id);
        assert_eq!(second.access_count, 2);
    }
}
