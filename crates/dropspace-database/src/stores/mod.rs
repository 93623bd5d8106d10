//! Store traits and their PostgreSQL implementations.
//!
//! Services depend on these traits rather than on sqlx directly, so the
//! trash and share state machines can be exercised against in-memory
//! stores in tests. The concrete implementations in [`file`] and
//! [`share`] are the only code in the workspace that speaks SQL.

pub mod file;
pub mod share;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use dropspace_core::result::AppResult;
use dropspace_core::types::pagination::{PageRequest, PageResponse};
use dropspace_entity::file::{CreateFileRecord, FileRecord};
use dropspace_entity::share::{CreateShareGrant, ShareGrant};

pub use file::PgFileStore;
pub use share::PgShareGrantStore;

/// Which slice of a user's records a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileListView {
    /// Active records inside one folder (None = root level).
    Folder(Option<Uuid>),
    /// All active starred records.
    Starred,
    /// All trashed records.
    Trash,
}

/// Persistence operations for file records.
///
/// Bulk mutations are scoped in the statement itself to
/// `(user_id, id ∈ requested, stage predicate)` and report the number of
/// rows actually transitioned — callers must not assume it equals the
/// number of ids requested.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new file record.
    async fn create(&self, data: &CreateFileRecord) -> AppResult<FileRecord>;

    /// Find a record by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FileRecord>>;

    /// Find a record by its public share token.
    async fn find_by_share_id(&self, share_id: &str) -> AppResult<Option<FileRecord>>;

    /// List a user's records for the given view.
    async fn list(
        &self,
        user_id: &str,
        view: &FileListView,
        page: &PageRequest,
    ) -> AppResult<PageResponse<FileRecord>>;

    /// Rename a record.
    async fn rename(&self, id: Uuid, name: &str) -> AppResult<FileRecord>;

    /// Set the starred flag.
    async fn set_starred(&self, id: Uuid, starred: bool) -> AppResult<FileRecord>;

    /// Re-parent a record.
    async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> AppResult<FileRecord>;

    /// The id chain from a record up to its root (inclusive of the record).
    async fn ancestor_ids(&self, id: Uuid) -> AppResult<Vec<Uuid>>;

    /// Move the given active records of `user_id` to trash.
    async fn trash(&self, user_id: &str, ids: &[Uuid]) -> AppResult<u64>;

    /// Restore the given trashed records of `user_id`.
    async fn restore(&self, user_id: &str, ids: &[Uuid]) -> AppResult<u64>;

    /// Restore every trashed record of `user_id`.
    async fn restore_all(&self, user_id: &str) -> AppResult<u64>;

    /// Permanently remove the given records of `user_id` that are trashed.
    async fn delete(&self, user_id: &str, ids: &[Uuid]) -> AppResult<u64>;

    /// Permanently remove every trashed record of `user_id`.
    async fn delete_trashed(&self, user_id: &str) -> AppResult<u64>;

    /// Publish a record under the given share token.
    async fn apply_share(
        &self,
        id: Uuid,
        share_id: &str,
        password_hash: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<FileRecord>;

    /// Clear all sharing fields of a record.
    async fn clear_share(&self, id: Uuid) -> AppResult<FileRecord>;
}

/// Persistence operations for share grants.
#[async_trait]
pub trait ShareGrantStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append a new grant row.
    async fn insert(&self, data: &CreateShareGrant) -> AppResult<ShareGrant>;

    /// The most recent grant for a file, if any.
    async fn find_latest_for_file(&self, file_id: Uuid) -> AppResult<Option<ShareGrant>>;

    /// Atomically increment the access counter and stamp the access time.
    ///
    /// The increment happens in a single statement so concurrent accesses
    /// never lose updates.
    async fn record_access(&self, id: Uuid) -> AppResult<ShareGrant>;
}
