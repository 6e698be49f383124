//! The persistence contract backing the engine.
//!
//! Any conforming implementation may back the engine: a relational table,
//! a document collection, or an in-memory map. The engine's correctness
//! depends only on this contract, not on the backing technology.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::permission::Permission;

/// Errors reported by a [`Store`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record matches the query. Distinguishable from backend failures
    /// so `can` can report a definitive `false` instead of an error.
    #[error("Permission not found")]
    NotFound,

    /// Backend failure: connectivity, timeout, constraint violation.
    #[error("Store error: {0}")]
    Backend(String),
}

/// Persistence contract for permission records.
///
/// Records are keyed on the natural 5-tuple
/// `(grant_type, grant_id, action, resource_type, resource_id)`; the
/// surrogate id exists for callers that already hold one. Implementations
/// must keep `upsert` idempotent with respect to the natural key and safe
/// under concurrent same-key calls (exactly one record survives).
#[async_trait]
pub trait Store: Send + Sync {
    /// Look up a permission by surrogate id if present in `query`,
    /// otherwise by natural key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no record matches.
    async fn get(&self, query: &Permission) -> Result<Permission, StoreError>;

    /// Insert or replace the record for `perm`'s natural key, assigning a
    /// surrogate id on first insert and preserving it afterwards.
    async fn upsert(&self, perm: &Permission) -> Result<(), StoreError>;

    /// Delete by surrogate id if present, otherwise by natural key.
    /// Deleting a record that does not exist is a no-op.
    async fn remove(&self, perm: &Permission) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: Store + ?Sized> Store for Box<S> {
    async fn get(&self, query: &Permission) -> Result<Permission, StoreError> {
        (**self).get(query).await
    }

    async fn upsert(&self, perm: &Permission) -> Result<(), StoreError> {
        (**self).upsert(perm).await
    }

    async fn remove(&self, perm: &Permission) -> Result<(), StoreError> {
        (**self).remove(perm).await
    }
}

#[async_trait]
impl<S: Store + ?Sized> Store for Arc<S> {
    async fn get(&self, query: &Permission) -> Result<Permission, StoreError> {
        (**self).get(query).await
    }

    async fn upsert(&self, perm: &Permission) -> Result<(), StoreError> {
        (**self).upsert(perm).await
    }

    async fn remove(&self, perm: &Permission) -> Result<(), StoreError> {
        (**self).remove(perm).await
    }
}
