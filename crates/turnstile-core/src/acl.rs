//! The permission engine.
//!
//! `Acl` builds canonical permission keys from resolved parties and
//! delegates persistence to an injected [`Store`]. It holds no state of its
//! own; every operation constructs one transient [`Permission`] and issues
//! exactly one store round-trip, so it is safe to share across tasks
//! without locking.

use crate::error::{Error, Result};
use crate::party::{resolve, Party};
use crate::permission::Permission;
use crate::store::{Store, StoreError};

/// Exact-match access control engine over a pluggable store.
pub struct Acl<S> {
    store: S,
}

impl<S: Store> Acl<S> {
    /// Create an engine backed by `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Grant `action` on `resource` to `actor`.
    ///
    /// Granting twice with identical arguments leaves exactly one persisted
    /// record for the natural key.
    pub async fn allow<'a>(
        &self,
        actor: impl Into<Party<'a>>,
        action: &str,
        resource: impl Into<Party<'a>>,
    ) -> Result<()> {
        let perm = build_permission(actor.into(), action, resource.into())?;
        self.store.upsert(&perm).await?;
        Ok(())
    }

    /// Whether `actor` may perform `action` on `resource`.
    ///
    /// Absence of a grant is `Ok(false)`, not an error; any other store
    /// failure propagates.
    pub async fn can<'a>(
        &self,
        actor: impl Into<Party<'a>>,
        action: &str,
        resource: impl Into<Party<'a>>,
    ) -> Result<bool> {
        let perm = build_permission(actor.into(), action, resource.into())?;
        match self.store.get(&perm).await {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Revoke `action` on `resource` from `actor`, matching by natural key.
    ///
    /// Revoking a grant that does not exist is a no-op.
    pub async fn remove_permission<'a>(
        &self,
        actor: impl Into<Party<'a>>,
        action: &str,
        resource: impl Into<Party<'a>>,
    ) -> Result<()> {
        let perm = build_permission(actor.into(), action, resource.into())?;
        self.store.remove(&perm).await?;
        Ok(())
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }
}

/// Build the candidate permission for one engine call.
///
/// Fails before any store round-trip when either side resolves without a
/// type.
fn build_permission(
    actor: Party<'_>,
    action: &str,
    resource: Party<'_>,
) -> Result<Permission> {
    let (grant_type, grant_id) = resolve(actor);
    let Some(grant_type) = grant_type else {
        return Err(Error::Resolution(
            "actor must be a category string or expose an ACL type".to_string(),
        ));
    };

    let (resource_type, resource_id) = resolve(resource);
    let Some(resource_type) = resource_type else {
        return Err(Error::Resolution(
            "resource must be a category string or expose an ACL type".to_string(),
        ));
    };

    Ok(Permission {
        id: None,
        grant_type,
        grant_id,
        action: action.to_string(),
        resource_type,
        resource_id,
    })
}
