//! In-process [`Store`] used when no database is configured, and by tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use catalog_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::PersistedRecord;
use crate::store::{Store, StoreError};

/// A table held in a `BTreeMap` keyed by id.
///
/// Ids come from a monotonic counter starting at 1 and are never reused,
/// even after deletes. Iteration order is id order.
pub struct MemoryStore<R> {
    rows: RwLock<BTreeMap<DbId, R>>,
    next_id: AtomicI64,
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: PersistedRecord> Store<R> for MemoryStore<R> {
    async fn list(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<R>, StoreError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn add(&self, mut record: R) -> Result<R, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.assign_id(id);
        record.detach_relations();
        self.rows.write().await.insert(id, record.clone());
        tracing::debug!(id, "Inserted in-memory record");
        Ok(record)
    }

    async fn update(&self, mut record: R) -> Result<R, StoreError> {
        let id = record.id();
        record.detach_relations();
        let mut rows = self.rows.write().await;
        match rows.get_mut(&id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(StoreError::Missing(id)),
        }
    }

    async fn remove(&self, record: R) -> Result<(), StoreError> {
        let id = record.id();
        match self.rows.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::Missing(id)),
        }
    }
}
