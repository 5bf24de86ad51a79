/**
 * In-Memory Document Store
 *
 * A HashMap-backed store used by tests and by database-less startup. The
 * server stays fully functional with it; records simply do not survive a
 * restart.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::shared::record::ShareLinkRecord;

use super::{DocumentStore, PasswordAction, RecordPatch, StoreError};

/// HashMap-backed store with reader/writer locking
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<String, ShareLinkRecord>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (test helper)
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(&self, slug: &str) -> Result<Option<ShareLinkRecord>, StoreError> {
        Ok(self.records.read().await.get(slug).cloned())
    }

    async fn insert_one(&self, record: &ShareLinkRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.slug) {
            return Err(StoreError::DuplicateSlug {
                slug: record.slug.clone(),
            });
        }
        records.insert(record.slug.clone(), record.clone());
        Ok(())
    }

    async fn update_one(&self, slug: &str, patch: RecordPatch) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(slug) else {
            return Ok(false);
        };

        record.content = patch.content;
        record.mode = patch.mode;
        record.is_private = patch.is_private;
        record.access_type = patch.access_type;
        record.updated_at = patch.updated_at;
        match patch.password_action {
            PasswordAction::Set(hash) => record.password_hash = Some(hash),
            PasswordAction::Clear => record.password_hash = None,
            PasswordAction::Keep => {}
        }

        Ok(true)
    }

    async fn exists(&self, slug: &str) -> Result<bool, StoreError> {
        Ok(self.records.read().await.contains_key(slug))
    }
}
