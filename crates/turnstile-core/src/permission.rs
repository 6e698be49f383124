//! Canonical permission records.

use serde::{Deserialize, Serialize};

use crate::identity::IdentityValue;

/// A single exact-match grant: an actor of `grant_type`/`grant_id` may
/// perform `action` on the resource of `resource_type`/`resource_id`.
///
/// Built transiently by the engine on every call; only the store holds
/// persisted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Surrogate identifier assigned by the store on first insert. `None`
    /// for a permission that has not been persisted.
    pub id: Option<String>,
    /// Actor category ("staff", or a bare category string).
    pub grant_type: String,
    /// Actor identity within its category.
    pub grant_id: IdentityValue,
    /// The verb being authorized.
    pub action: String,
    /// Resource category.
    pub resource_type: String,
    /// Resource identity within its category.
    pub resource_id: IdentityValue,
}

/// Natural key of a permission record.
///
/// Stores must hold at most one record per key, regardless of the surrogate
/// id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionKey {
    /// Actor category.
    pub grant_type: String,
    /// Actor identity.
    pub grant_id: IdentityValue,
    /// Authorized verb.
    pub action: String,
    /// Resource category.
    pub resource_type: String,
    /// Resource identity.
    pub resource_id: IdentityValue,
}

impl Permission {
    /// The natural key identifying this permission.
    pub fn natural_key(&self) -> PermissionKey {
        PermissionKey {
            grant_type: self.grant_type.clone(),
            grant_id: self.grant_id.clone(),
            action: self.action.clone(),
            resource_type: self.resource_type.clone(),
            resource_id: self.resource_id.clone(),
        }
    }
}
