//! PostgreSQL share grant store implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use dropspace_core::error::{AppError, ErrorKind};
use dropspace_core::result::AppResult;
use dropspace_entity::share::{CreateShareGrant, ShareGrant};

use super::ShareGrantStore;

/// sqlx-backed [`ShareGrantStore`].
#[derive(Debug, Clone)]
pub struct PgShareGrantStore {
    pool: PgPool,
}

impl PgShareGrantStore {
    /// Create a new share grant store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareGrantStore for PgShareGrantStore {
    async fn insert(&self, data: &CreateShareGrant) -> AppResult<ShareGrant> {
        sqlx::query_as::<_, ShareGrant>(
            "INSERT INTO file_shares (file_id, user_id, password, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.file_id)
        .bind(&data.user_id)
        .bind(&data.password)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create share grant", e))
    }

    async fn find_latest_for_file(&self, file_id: Uuid) -> AppResult<Option<ShareGrant>> {
        sqlx::query_as::<_, ShareGrant>(
            "SELECT * FROM file_shares WHERE file_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share grant", e))
    }

    async fn record_access(&self, id: Uuid) -> AppResult<ShareGrant> {
        // Single-statement increment; concurrent accesses serialize per-row
        // inside PostgreSQL instead of racing a read-modify-write.
        sqlx::query_as::<_, ShareGrant>(
            "UPDATE file_shares SET access_count = access_count + 1, last_accessed_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record access", e))?
        .ok_or_else(|| AppError::not_found("Share grant not found"))
    }
}
