//! In-memory store implementations used by the service test suites.
//!
//! These mirror the behavior of the sqlx stores — including bulk scoping
//! and single-operation counter increments — over plain hash maps, so the
//! state machines can be tested without a database.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use dropspace_core::error::AppError;
use dropspace_core::result::AppResult;
use dropspace_core::types::pagination::{PageRequest, PageResponse};
use dropspace_database::stores::{FileListView, FileStore, ShareGrantStore};
use dropspace_entity::file::{CreateFileRecord, FileRecord};
use dropspace_entity::share::{CreateShareGrant, ShareGrant};

/// Builds a plain active file record owned by `user_id`.
pub fn file_record(user_id: &str, name: &str) -> FileRecord {
    let now = Utc::now();
    FileRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        path: format!("{user_id}/{name}"),
        size: 100,
        mime_type: "text/plain".to_string(),
        file_url: format!("https://cdn.example.com/files/{user_id}/{name}"),
        thumbnail_url: None,
        user_id: user_id.to_string(),
        parent_id: None,
        is_folder: false,
        is_starred: false,
        is_trash: false,
        is_public: false,
        share_password: None,
        share_expires_at: None,
        share_id: None,
        created_at: now,
        updated_at: now,
    }
}

/// Builds a folder record owned by `user_id`.
pub fn folder_record(user_id: &str, name: &str) -> FileRecord {
    let mut record = file_record(user_id, name);
    record.path = String::new();
    record.size = 0;
    record.mime_type = "folder".to_string();
    record.file_url = String::new();
    record.is_folder = true;
    record
}

/// Hash-map [`FileStore`].
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: Mutex<HashMap<Uuid, FileRecord>>,
}

impl MemoryFileStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Inserts a pre-built record and returns its id.
    pub fn seed(&self, record: FileRecord) -> Uuid {
        let id = record.id;
        self.files.lock().unwrap().insert(id, record);
        id
    }

    /// Snapshot of one record.
    pub fn get(&self, id: Uuid) -> Option<FileRecord> {
        self.files.lock().unwrap().get(&id).cloned()
    }

    fn update<F>(&self, id: Uuid, mutate: F) -> AppResult<FileRecord>
    where
        F: FnOnce(&mut FileRecord),
    {
        let mut files = self.files.lock().unwrap();
        let record = files
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("File not found"))?;
        mutate(record);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn create(&self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        let now = Utc::now();
        let record = FileRecord {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            path: data.path.clone(),
            size: data.size,
            mime_type: data.mime_type.clone(),
            file_url: data.file_url.clone(),
            thumbnail_url: data.thumbnail_url.clone(),
            user_id: data.user_id.clone(),
            parent_id: data.parent_id,
            is_folder: data.is_folder,
            is_starred: false,
            is_trash: false,
            is_public: false,
            share_password: None,
            share_expires_at: None,
            share_id: None,
            created_at: now,
            updated_at: now,
        };
        self.files.lock().unwrap().insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FileRecord>> {
        Ok(self.get(id))
    }

    async fn find_by_share_id(&self, share_id: &str) -> AppResult<Option<FileRecord>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .values()
            .find(|f| f.share_id.as_deref() == Some(share_id))
            .cloned())
    }

    async fn list(
        &self,
        user_id: &str,
        view: &FileListView,
        page: &PageRequest,
    ) -> AppResult<PageResponse<FileRecord>> {
        let files = self.files.lock().unwrap();
        let mut matches: Vec<FileRecord> = files
            .values()
            .filter(|f| f.user_id == user_id)
            .filter(|f| match view {
                FileListView::Folder(parent_id) => !f.is_trash && f.parent_id == *parent_id,
                FileListView::Starred => !f.is_trash && f.is_starred,
                FileListView::Trash => f.is_trash,
            })
            .cloned()
            .collect();

        match view {
            FileListView::Trash => matches.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            _ => matches.sort_by(|a, b| {
                b.is_folder
                    .cmp(&a.is_folder)
                    .then_with(|| a.name.cmp(&b.name))
            }),
        }

        let total = matches.len() as u64;
        let items: Vec<FileRecord> = matches
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<FileRecord> {
        self.update(id, |f| f.name = name.to_string())
    }

    async fn set_starred(&self, id: Uuid, starred: bool) -> AppResult<FileRecord> {
        self.update(id, |f| f.is_starred = starred)
    }

    async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> AppResult<FileRecord> {
        self.update(id, |f| f.parent_id = parent_id)
    }

    async fn ancestor_ids(&self, id: Uuid) -> AppResult<Vec<Uuid>> {
        let files = self.files.lock().unwrap();
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if !seen.insert(current) {
                break;
            }
            chain.push(current);
            cursor = files.get(&current).and_then(|f| f.parent_id);
        }
        Ok(chain)
    }

    async fn trash(&self, user_id: &str, ids: &[Uuid]) -> AppResult<u64> {
        let mut files = self.files.lock().unwrap();
        let now = Utc::now();
        let mut moved = 0;
        for record in files.values_mut() {
            if record.user_id == user_id && ids.contains(&record.id) && !record.is_trash {
                record.is_trash = true;
                record.updated_at = now;
                moved += 1;
            }
        }
        Ok(moved)
    }

    async fn restore(&self, user_id: &str, ids: &[Uuid]) -> AppResult<u64> {
        let mut files = self.files.lock().unwrap();
        let now = Utc::now();
        let mut restored = 0;
        for record in files.values_mut() {
            if record.user_id == user_id && ids.contains(&record.id) && record.is_trash {
                record.is_trash = false;
                record.updated_at = now;
                restored += 1;
            }
        }
        Ok(restored)
    }

    async fn restore_all(&self, user_id: &str) -> AppResult<u64> {
        let mut files = self.files.lock().unwrap();
        let now = Utc::now();
        let mut restored = 0;
        for record in files.values_mut() {
            if record.user_id == user_id && record.is_trash {
                record.is_trash = false;
                record.updated_at = now;
                restored += 1;
            }
        }
        Ok(restored)
    }

    async fn delete(&self, user_id: &str, ids: &[Uuid]) -> AppResult<u64> {
        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|id, record| {
            !(record.user_id == user_id && ids.contains(id) && record.is_trash)
        });
        Ok((before - files.len()) as u64)
    }

    async fn delete_trashed(&self, user_id: &str) -> AppResult<u64> {
        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|_, record| !(record.user_id == user_id && record.is_trash));
        Ok((before - files.len()) as u64)
    }

    async fn apply_share(
        &self,
        id: Uuid,
        share_id: &str,
        password_hash: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<FileRecord> {
        self.update(id, |f| {
            f.is_public = true;
            f.share_id = Some(share_id.to_string());
            f.share_password = password_hash.map(str::to_string);
            f.share_expires_at = expires_at;
        })
    }

    async fn clear_share(&self, id: Uuid) -> AppResult<FileRecord> {
        self.update(id, |f| {
            f.is_public = false;
            f.share_id = None;
            f.share_password = None;
            f.share_expires_at = None;
        })
    }
}

/// Vec-backed [`ShareGrantStore`].
#[derive(Debug, Default)]
pub struct MemoryShareGrantStore {
    grants: Mutex<Vec<ShareGrant>>,
}

impl MemoryShareGrantStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of grant rows recorded for a file.
    pub fn count_for_file(&self, file_id: Uuid) -> usize {
        self.grants
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.file_id == file_id)
            .count()
    }

    /// Snapshot of the most recent grant for a file.
    pub fn latest_for_file(&self, file_id: Uuid) -> Option<ShareGrant> {
        self.grants
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|g| g.file_id == file_id)
            .cloned()
    }
}

#[async_trait]
impl ShareGrantStore for MemoryShareGrantStore {
    async fn insert(&self, data: &CreateShareGrant) -> AppResult<ShareGrant> {
        let grant = ShareGrant {
            id: Uuid::new_v4(),
            file_id: data.file_id,
            user_id: data.user_id.clone(),
            password: data.password.clone(),
            expires_at: data.expires_at,
            created_at: Utc::now(),
            access_count: 0,
            last_accessed_at: None,
        };
        self.grants.lock().unwrap().push(grant.clone());
        Ok(grant)
    }

    async fn find_latest_for_file(&self, file_id: Uuid) -> AppResult<Option<ShareGrant>> {
        Ok(self.latest_for_file(file_id))
    }

    async fn record_access(&self, id: Uuid) -> AppResult<ShareGrant> {
        let mut grants = self.grants.lock().unwrap();
        let grant = grants
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| AppError::not_found("Share grant not found"))?;
        grant.access_count += 1;
        grant.last_accessed_at = Some(Utc::now());
        Ok(grant.clone())
    }
}
