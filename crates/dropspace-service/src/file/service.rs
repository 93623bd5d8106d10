//! File record service.
//!
//! Creation and organization of file records. Binary content never moves
//! through here — the client uploads straight to the external content
//! store and then registers the record; this service derives the
//! fetchable URLs from the recorded path key.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use dropspace_core::error::AppError;
use dropspace_core::result::AppResult;
use dropspace_core::types::pagination::{PageRequest, PageResponse};
use dropspace_database::stores::{FileListView, FileStore};
use dropspace_entity::file::{CreateFileRecord, FileRecord};
use dropspace_storage::content::ContentStore;

use crate::context::RequestContext;

/// MIME type recorded for folder rows.
const FOLDER_MIME_TYPE: &str = "folder";

/// Registration data for content already uploaded to the content store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUpload {
    /// Display name.
    pub name: String,
    /// Path/key the client uploaded the content under.
    pub path: String,
    /// Size in bytes.
    pub size: i64,
    /// MIME type.
    pub mime_type: String,
    /// Containing folder.
    pub parent_id: Option<Uuid>,
}

/// Data for creating a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFolder {
    /// Folder name.
    pub name: String,
    /// Containing folder.
    pub parent_id: Option<Uuid>,
}

/// Manages file and folder records.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File store.
    files: Arc<dyn FileStore>,
    /// External content store (URL derivation only).
    content: Arc<dyn ContentStore>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<dyn FileStore>, content: Arc<dyn ContentStore>) -> Self {
        Self { files, content }
    }

    /// Registers a file whose content was uploaded to the content store.
    pub async fn register_upload(
        &self,
        ctx: &RequestContext,
        req: RegisterUpload,
    ) -> AppResult<FileRecord> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("File name must not be empty"));
        }
        if req.path.trim().is_empty() {
            return Err(AppError::validation("Content path must not be empty"));
        }
        if req.size < 0 {
            return Err(AppError::validation("File size must not be negative"));
        }
        if let Some(parent_id) = req.parent_id {
            self.ensure_parent_folder(ctx, parent_id).await?;
        }

        let record = self
            .files
            .create(&CreateFileRecord {
                name: req.name,
                file_url: self.content.file_url(&req.path),
                thumbnail_url: self.content.thumbnail_url(&req.path),
                path: req.path,
                size: req.size,
                mime_type: req.mime_type,
                user_id: ctx.user_id.clone(),
                parent_id: req.parent_id,
                is_folder: false,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %record.id,
            size = record.size,
            "File registered"
        );
        Ok(record)
    }

    /// Creates a folder record.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: NewFolder,
    ) -> AppResult<FileRecord> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Folder name must not be empty"));
        }
        if let Some(parent_id) = req.parent_id {
            self.ensure_parent_folder(ctx, parent_id).await?;
        }

        let record = self
            .files
            .create(&CreateFileRecord {
                name: req.name,
                path: String::new(),
                size: 0,
                mime_type: FOLDER_MIME_TYPE.to_string(),
                file_url: String::new(),
                thumbnail_url: None,
                user_id: ctx.user_id.clone(),
                parent_id: req.parent_id,
                is_folder: true,
            })
            .await?;

        info!(user_id = %ctx.user_id, folder_id = %record.id, "Folder created");
        Ok(record)
    }

    /// Fetches one owned record.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<FileRecord> {
        let file = self
            .files
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;
        ensure_owner(ctx, &file)?;
        Ok(file)
    }

    /// Lists the caller's records for the given view.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        view: FileListView,
        page: PageRequest,
    ) -> AppResult<PageResponse<FileRecord>> {
        self.files.list(&ctx.user_id, &view, &page).await
    }

    /// Flips the starred flag of an owned record.
    pub async fn toggle_star(&self, ctx: &RequestContext, id: Uuid) -> AppResult<FileRecord> {
        let file = self.get(ctx, id).await?;
        self.files.set_starred(file.id, !file.is_starred).await
    }

    /// Renames an owned record.
    pub async fn rename(&self, ctx: &RequestContext, id: Uuid, name: &str) -> AppResult<FileRecord> {
        if name.trim().is_empty() {
            return Err(AppError::validation("File name must not be empty"));
        }
        let file = self.get(ctx, id).await?;
        self.files.rename(file.id, name).await
    }

    /// Moves an owned record under a new parent (None = root level).
    ///
    /// The target parent must be an owned folder, and the moved record
    /// must not appear in the target's ancestor chain — a record can
    /// never become its own ancestor.
    pub async fn move_to(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        new_parent: Option<Uuid>,
    ) -> AppResult<FileRecord> {
        let file = self.get(ctx, id).await?;

        if let Some(parent_id) = new_parent {
            if parent_id == file.id {
                return Err(AppError::conflict("A folder cannot contain itself"));
            }
            self.ensure_parent_folder(ctx, parent_id).await?;

            let chain = self.files.ancestor_ids(parent_id).await?;
            if chain.contains(&file.id) {
                return Err(AppError::conflict(
                    "Cannot move a folder into its own subtree",
                ));
            }
        }

        self.files.set_parent(file.id, new_parent).await
    }

    /// Validates that `parent_id` names a folder owned by the caller.
    async fn ensure_parent_folder(
        &self,
        ctx: &RequestContext,
        parent_id: Uuid,
    ) -> AppResult<FileRecord> {
        let parent = self
            .files
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| AppError::not_found("Parent folder not found"))?;

        if parent.user_id != ctx.user_id {
            return Err(AppError::unauthorized(
                "Parent folder belongs to another user",
            ));
        }
        if !parent.is_folder {
            return Err(AppError::validation("Parent must be a folder"));
        }
        Ok(parent)
    }
}

fn ensure_owner(ctx: &RequestContext, file: &FileRecord) -> AppResult<()> {
    if file.user_id != ctx.user_id {
        return Err(AppError::unauthorized("You do not own this file"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropspace_core::config::storage::StorageConfig;
    use dropspace_core::error::ErrorKind;
    use dropspace_storage::content::CdnContentStore;

    use crate::testing::{MemoryFileStore, file_record, folder_record};

    fn service(store: &Arc<MemoryFileStore>) -> FileService {
        let content = CdnContentStore::new(&StorageConfig {
            content_base_url: "https://cdn.example.com/files".to_string(),
            thumbnail_base_url: "https://cdn.example.com/thumbs".to_string(),
        });
        FileService::new(store.clone(), Arc::new(content))
    }

    fn upload(parent_id: Option<Uuid>) -> RegisterUpload {
        RegisterUpload {
            name: "cat.png".to_string(),
            path: "alice/cat.png".to_string(),
            size: 2048,
            mime_type: "image/png".to_string(),
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_register_derives_urls_from_the_content_store() {
        let store = MemoryFileStore::new();
        let ctx = RequestContext::new("alice");

        let record = service(&store)
            .register_upload(&ctx, upload(None))
            .await
            .expect("register");

        assert_eq!(record.file_url, "https://cdn.example.com/files/alice/cat.png");
        assert_eq!(
            record.thumbnail_url.as_deref(),
            Some("https://cdn.example.com/thumbs/alice/cat.png")
        );
        assert_eq!(record.user_id, "alice");
        assert!(!record.is_folder);
    }

    #[tokio::test]
    async fn test_parent_must_be_an_owned_folder() {
        let store = MemoryFileStore::new();
        let svc = service(&store);
        let ctx = RequestContext::new("alice");

        let plain_file = store.seed(file_record("alice", "not-a-folder.txt"));
        let err = svc
            .register_upload(&ctx, upload(Some(plain_file)))
            .await
            .expect_err("file as parent");
        assert_eq!(err.kind, ErrorKind::Validation);

        let foreign_folder = store.seed(folder_record("bob", "Bob's"));
        let err = svc
            .register_upload(&ctx, upload(Some(foreign_folder)))
            .await
            .expect_err("foreign parent");
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        let err = svc
            .register_upload(&ctx, upload(Some(Uuid::new_v4())))
            .await
            .expect_err("missing parent");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_folder_rows_have_no_content() {
        let store = MemoryFileStore::new();
        let ctx = RequestContext::new("alice");

        let folder = service(&store)
            .create_folder(
                &ctx,
                NewFolder {
                    name: "Documents".to_string(),
                    parent_id: None,
                },
            )
            .await
            .expect("create");

        assert!(folder.is_folder);
        assert_eq!(folder.size, 0);
        assert_eq!(folder.file_url, "");
        assert_eq!(folder.mime_type, "folder");
    }

    #[tokio::test]
    async fn test_get_is_owner_scoped() {
        let store = MemoryFileStore::new();
        let id = store.seed(file_record("alice", "a.txt"));

        let err = service(&store)
            .get(&RequestContext::new("mallory"), id)
            .await
            .expect_err("foreign record");
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_toggle_star_flips_the_flag() {
        let store = MemoryFileStore::new();
        let id = store.seed(file_record("alice", "a.txt"));
        let ctx = RequestContext::new("alice");
        let svc = service(&store);

        assert!(svc.toggle_star(&ctx, id).await.expect("star").is_starred);
        assert!(!svc.toggle_star(&ctx, id).await.expect("unstar").is_starred);
    }

    #[tokio::test]
    async fn test_move_rejects_cycles() {
        let store = MemoryFileStore::new();
        let ctx = RequestContext::new("alice");
        let svc = service(&store);

        let top = store.seed(folder_record("alice", "top"));
        let mut mid_record = folder_record("alice", "mid");
        mid_record.parent_id = Some(top);
        let mid = store.seed(mid_record);

        // top -> mid is fine to traverse, but top cannot descend into mid.
        let err = svc
            .move_to(&ctx, top, Some(mid))
            .await
            .expect_err("cycle");
        assert_eq!(err.kind, ErrorKind::Conflict);

        let err = svc
            .move_to(&ctx, top, Some(top))
            .await
            .expect_err("self-parent");
        assert_eq!(err.kind, ErrorKind::Conflict);

        // Moving mid to the root level is legal.
        let moved = svc.move_to(&ctx, mid, None).await.expect("move");
        assert_eq!(moved.parent_id, None);
    }

    #[tokio::test]
    async fn test_list_views_are_disjoint() {
        let store = MemoryFileStore::new();
        let ctx = RequestContext::new("alice");
        let svc = service(&store);

        let folder = store.seed(folder_record("alice", "docs"));
        let mut starred = file_record("alice", "fav.txt");
        starred.is_starred = true;
        store.seed(starred);
        let mut trashed = file_record("alice", "junk.txt");
        trashed.is_trash = true;
        store.seed(trashed);
        let mut nested = file_record("alice", "inner.txt");
        nested.parent_id = Some(folder);
        store.seed(nested);

        let root = svc
            .list(&ctx, FileListView::Folder(None), PageRequest::default())
            .await
            .expect("list");
        // The folder and the starred root file; trashed and nested excluded.
        assert_eq!(root.total_items, 2);

        let starred = svc
            .list(&ctx, FileListView::Starred, PageRequest::default())
            .await
            .expect("list");
        assert_eq!(starred.total_items, 1);

        let trash = svc
            .list(&ctx, FileListView::Trash, PageRequest::default())
            .await
            .expect("list");
        assert_eq!(trash.total_items, 1);

        let nested = svc
            .list(&ctx, FileListView::Folder(Some(folder)), PageRequest::default())
            .await
            .expect("list");
        assert_eq!(nested.total_items, 1);
    }
}
