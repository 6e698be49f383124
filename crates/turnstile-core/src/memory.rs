//! In-memory permission store.
//!
//! A conforming [`Store`] over a hash map, suitable for tests and
//! single-process embedding. The natural-key map itself guarantees at most
//! one record per key under concurrent upserts.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::permission::{Permission, PermissionKey};
use crate::store::{Store, StoreError};

/// In-memory [`Store`] keyed on the permission natural key.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<PermissionKey, Permission>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, query: &Permission) -> Result<Permission, StoreError> {
        let records = self.records.read().await;
        if let Some(id) = &query.id {
            // Surrogate lookups are rare; a scan is fine at this scale.
            return records
                .values()
                .find(|p| p.id.as_deref() == Some(id))
                .cloned()
                .ok_or(StoreError::NotFound);
        }
        records
            .get(&query.natural_key())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn upsert(&self, perm: &Permission) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let key = perm.natural_key();
        let id = records
            .get(&key)
            .and_then(|existing| existing.id.clone())
            .or_else(|| perm.id.clone())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut stored = perm.clone();
        stored.id = Some(id);
        records.insert(key, stored);
        Ok(())
    }

    async fn remove(&self, perm: &Permission) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if let Some(id) = &perm.id {
            records.retain(|_, p| p.id.as_deref() != Some(id.as_str()));
            return Ok(());
        }
        records.remove(&perm.natural_key());
        Ok(())
    }
}
