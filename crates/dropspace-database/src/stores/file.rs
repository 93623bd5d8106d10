//! PostgreSQL file store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use dropspace_core::error::{AppError, ErrorKind};
use dropspace_core::result::AppResult;
use dropspace_core::types::pagination::{PageRequest, PageResponse};
use dropspace_entity::file::{CreateFileRecord, FileRecord};

use super::{FileListView, FileStore};

/// sqlx-backed [`FileStore`].
#[derive(Debug, Clone)]
pub struct PgFileStore {
    pool: PgPool,
}

impl PgFileStore {
    /// Create a new file store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for PgFileStore {
    async fn create(&self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "INSERT INTO files (name, path, size, \"type\", file_url, thumbnail_url, user_id, parent_id, is_folder) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.path)
        .bind(data.size)
        .bind(&data.mime_type)
        .bind(&data.file_url)
        .bind(&data.thumbnail_url)
        .bind(&data.user_id)
        .bind(data.parent_id)
        .bind(data.is_folder)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file record", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_by_share_id(&self, share_id: &str) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE share_id = $1")
            .bind(share_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find file by share token", e)
            })
    }

    async fn list(
        &self,
        user_id: &str,
        view: &FileListView,
        page: &PageRequest,
    ) -> AppResult<PageResponse<FileRecord>> {
        match view {
            FileListView::Folder(parent_id) => {
                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM files \
                     WHERE user_id = $1 AND is_trash = FALSE AND parent_id IS NOT DISTINCT FROM $2",
                )
                .bind(user_id)
                .bind(parent_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count files", e)
                })?;

                let files = sqlx::query_as::<_, FileRecord>(
                    "SELECT * FROM files \
                     WHERE user_id = $1 AND is_trash = FALSE AND parent_id IS NOT DISTINCT FROM $2 \
                     ORDER BY is_folder DESC, name ASC LIMIT $3 OFFSET $4",
                )
                .bind(user_id)
                .bind(parent_id)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list files", e)
                })?;

                Ok(PageResponse::new(files, page.page, page.page_size, total as u64))
            }
            FileListView::Starred => {
                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM files \
                     WHERE user_id = $1 AND is_trash = FALSE AND is_starred = TRUE",
                )
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count starred files", e)
                })?;

                let files = sqlx::query_as::<_, FileRecord>(
                    "SELECT * FROM files \
                     WHERE user_id = $1 AND is_trash = FALSE AND is_starred = TRUE \
                     ORDER BY is_folder DESC, name ASC LIMIT $2 OFFSET $3",
                )
                .bind(user_id)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list starred files", e)
                })?;

                Ok(PageResponse::new(files, page.page, page.page_size, total as u64))
            }
            FileListView::Trash => {
                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM files WHERE user_id = $1 AND is_trash = TRUE",
                )
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count trashed files", e)
                })?;

                let files = sqlx::query_as::<_, FileRecord>(
                    "SELECT * FROM files WHERE user_id = $1 AND is_trash = TRUE \
                     ORDER BY updated_at DESC LIMIT $2 OFFSET $3",
                )
                .bind(user_id)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list trashed files", e)
                })?;

                Ok(PageResponse::new(files, page.page, page.page_size, total as u64))
            }
        }
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "UPDATE files SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename file", e))?
        .ok_or_else(|| AppError::not_found("File not found"))
    }

    async fn set_starred(&self, id: Uuid, starred: bool) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "UPDATE files SET is_starred = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(starred)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update star flag", e))?
        .ok_or_else(|| AppError::not_found("File not found"))
    }

    async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "UPDATE files SET parent_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move file", e))?
        .ok_or_else(|| AppError::not_found("File not found"))
    }

    async fn ancestor_ids(&self, id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "WITH RECURSIVE ancestors AS ( \
                SELECT id, parent_id FROM files WHERE id = $1 \
                UNION ALL \
                SELECT f.id, f.parent_id FROM files f INNER JOIN ancestors a ON f.id = a.parent_id \
             ) SELECT id FROM ancestors",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to walk ancestor chain", e))
    }

    async fn trash(&self, user_id: &str, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE files SET is_trash = TRUE, updated_at = NOW() \
             WHERE user_id = $1 AND id = ANY($2) AND is_trash = FALSE",
        )
        .bind(user_id)
        .bind(ids)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to trash files", e))?;
        Ok(result.rows_affected())
    }

    async fn restore(&self, user_id: &str, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE files SET is_trash = FALSE, updated_at = NOW() \
             WHERE user_id = $1 AND id = ANY($2) AND is_trash = TRUE",
        )
        .bind(user_id)
        .bind(ids)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to restore files", e))?;
        Ok(result.rows_affected())
    }

    async fn restore_all(&self, user_id: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE files SET is_trash = FALSE, updated_at = NOW() \
             WHERE user_id = $1 AND is_trash = TRUE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to restore trash", e))?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, user_id: &str, ids: &[Uuid]) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM files WHERE user_id = $1 AND id = ANY($2) AND is_trash = TRUE")
                .bind(user_id)
                .bind(ids)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete files", e)
                })?;
        Ok(result.rows_affected())
    }

    async fn delete_trashed(&self, user_id: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM files WHERE user_id = $1 AND is_trash = TRUE")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to empty trash", e))?;
        Ok(result.rows_affected())
    }

    async fn apply_share(
        &self,
        id: Uuid,
        share_id: &str,
        password_hash: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "UPDATE files SET is_public = TRUE, share_id = $2, share_password = $3, \
             share_expires_at = $4, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(share_id)
        .bind(password_hash)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to share file", e))?
        .ok_or_else(|| AppError::not_found("File not found"))
    }

    async fn clear_share(&self, id: Uuid) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "UPDATE files SET is_public = FALSE, share_id = NULL, share_password = NULL, \
             share_expires_at = NULL, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke share", e))?
        .ok_or_else(|| AppError::not_found("File not found"))
    }
}
