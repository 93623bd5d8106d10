//! Trash lifecycle service.
//!
//! Drives each file record through `Active -> Trashed -> Deleted`.
//! Permanent deletion requires prior trashing; there is no direct path
//! from `Active` to `Deleted`. Every bulk mutation is scoped to the
//! intersection of the requested ids and the caller's eligible records,
//! and the reported count is the number of records actually transitioned.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use dropspace_core::error::AppError;
use dropspace_core::result::AppResult;
use dropspace_database::stores::FileStore;

use crate::context::RequestContext;

/// Manages soft-delete, restore, and permanent deletion of file records.
#[derive(Debug, Clone)]
pub struct TrashService {
    /// File store.
    files: Arc<dyn FileStore>,
}

impl TrashService {
    /// Creates a new trash service.
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self { files }
    }

    /// Moves the given records to trash.
    ///
    /// Ids that are not owned by the caller or are already trashed are
    /// silently excluded; if nothing remains eligible the call fails and
    /// mutates nothing.
    pub async fn trash_files(&self, ctx: &RequestContext, ids: &[Uuid]) -> AppResult<u64> {
        require_ids(ids)?;

        let moved = self.files.trash(&ctx.user_id, ids).await?;
        if moved == 0 {
            return Err(AppError::validation("No valid files to move to trash"));
        }

        info!(
            user_id = %ctx.user_id,
            requested = ids.len(),
            moved,
            "Files moved to trash"
        );
        Ok(moved)
    }

    /// Restores the given trashed records.
    pub async fn restore_files(&self, ctx: &RequestContext, ids: &[Uuid]) -> AppResult<u64> {
        require_ids(ids)?;

        let restored = self.files.restore(&ctx.user_id, ids).await?;
        if restored == 0 {
            return Err(AppError::validation("No valid files to restore"));
        }

        info!(
            user_id = %ctx.user_id,
            requested = ids.len(),
            restored,
            "Files restored from trash"
        );
        Ok(restored)
    }

    /// Restores every trashed record of the caller. Idempotent.
    pub async fn restore_all(&self, ctx: &RequestContext) -> AppResult<u64> {
        let restored = self.files.restore_all(&ctx.user_id).await?;
        info!(user_id = %ctx.user_id, restored, "Trash restored");
        Ok(restored)
    }

    /// Permanently deletes the given records.
    ///
    /// Only records that are currently trashed (and owned by the caller)
    /// are eligible; an `Active` record is never removed by this path.
    pub async fn delete_files(&self, ctx: &RequestContext, ids: &[Uuid]) -> AppResult<u64> {
        require_ids(ids)?;

        let deleted = self.files.delete(&ctx.user_id, ids).await?;
        if deleted == 0 {
            return Err(AppError::validation("No valid files to delete"));
        }

        info!(
            user_id = %ctx.user_id,
            requested = ids.len(),
            deleted,
            "Files permanently deleted"
        );
        Ok(deleted)
    }

    /// Permanently deletes every trashed record of the caller. Idempotent.
    pub async fn empty_trash(&self, ctx: &RequestContext) -> AppResult<u64> {
        let deleted = self.files.delete_trashed(&ctx.user_id).await?;
        info!(user_id = %ctx.user_id, deleted, "Trash emptied");
        Ok(deleted)
    }
}

fn require_ids(ids: &[Uuid]) -> AppResult<()> {
    if ids.is_empty() {
        return Err(AppError::validation("file_ids must not be empty"));
    }
    Ok(())
}
