//! SQLite-backed permission store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use turnstile_core::{Permission, Store, StoreError};

use crate::codec;
use crate::db::{unix_timestamp, Database};

/// Permission record as stored in `SQLite`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
struct PermissionRow {
    id: String,
    grant_type: String,
    grant_id: String,
    action: String,
    resource_type: String,
    resource_id: String,
    created_at: i64,
    updated_at: i64,
}

impl PermissionRow {
    fn into_permission(self) -> Result<Permission, StoreError> {
        Ok(Permission {
            id: Some(self.id),
            grant_type: self.grant_type,
            grant_id: codec::decode(&self.grant_id).map_err(StoreError::Backend)?,
            action: self.action,
            resource_type: self.resource_type,
            resource_id: codec::decode(&self.resource_id).map_err(StoreError::Backend)?,
        })
    }
}

/// [`Store`] implementation over a `SQLite` `permissions` table.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Create a store over an opened database.
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// The underlying database handle.
    pub const fn database(&self) -> &Database {
        &self.db
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl Store for SqliteStore {
    async fn get(&self, query: &Permission) -> Result<Permission, StoreError> {
        let row = if let Some(id) = &query.id {
            sqlx::query_as::<_, PermissionRow>("SELECT * FROM permissions WHERE id = ?")
                .bind(id)
                .fetch_optional(self.db.pool())
                .await
                .map_err(backend)?
        } else {
            sqlx::query_as::<_, PermissionRow>(
                "SELECT * FROM permissions \
                 WHERE grant_type = ? AND grant_id = ? AND action = ? \
                   AND resource_type = ? AND resource_id = ?",
            )
            .bind(&query.grant_type)
            .bind(codec::encode(&query.grant_id))
            .bind(&query.action)
            .bind(&query.resource_type)
            .bind(codec::encode(&query.resource_id))
            .fetch_optional(self.db.pool())
            .await
            .map_err(backend)?
        };

        row.ok_or(StoreError::NotFound)?.into_permission()
    }

    async fn upsert(&self, perm: &Permission) -> Result<(), StoreError> {
        let now = unix_timestamp();
        let id = perm
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        // The conflict target is the unique natural-key index; an existing
        // row keeps its surrogate id and created_at.
        sqlx::query(
            "INSERT INTO permissions \
             (id, grant_type, grant_id, action, resource_type, resource_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(grant_type, grant_id, action, resource_type, resource_id) \
             DO UPDATE SET updated_at = excluded.updated_at",
        )
        .bind(&id)
        .bind(&perm.grant_type)
        .bind(codec::encode(&perm.grant_id))
        .bind(&perm.action)
        .bind(&perm.resource_type)
        .bind(codec::encode(&perm.resource_id))
        .bind(now)
        .bind(now)
        .execute(self.db.pool())
        .await
        .map_err(backend)?;

        debug!(
            grant_type = %perm.grant_type,
            action = %perm.action,
            resource_type = %perm.resource_type,
            "Permission granted"
        );

        Ok(())
    }

    async fn remove(&self, perm: &Permission) -> Result<(), StoreError> {
        let result = if let Some(id) = &perm.id {
            sqlx::query("DELETE FROM permissions WHERE id = ?")
                .bind(id)
                .execute(self.db.pool())
                .await
                .map_err(backend)?
        } else {
            sqlx::query(
                "DELETE FROM permissions \
                 WHERE grant_type = ? AND grant_id = ? AND action = ? \
                   AND resource_type = ? AND resource_id = ?",
            )
            .bind(&perm.grant_type)
            .bind(codec::encode(&perm.grant_id))
            .bind(&perm.action)
            .bind(&perm.resource_type)
            .bind(codec::encode(&perm.resource_id))
            .execute(self.db.pool())
            .await
            .map_err(backend)?
        };

        // Zero matched rows means the desired end state already holds.
        debug!(
            grant_type = %perm.grant_type,
            action = %perm.action,
            removed = result.rows_affected(),
            "Permission revoked"
        );

        Ok(())
    }
}
