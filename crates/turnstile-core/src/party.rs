//! Actor and resource resolution.
//!
//! Call sites hand the engine either a bare category string (`"guest"`,
//! `"doc"`) or a typed domain object implementing [`AclEntity`]. Resolution
//! normalizes both into a `(type, identity)` pair; a party without a type
//! cannot be turned into a permission key and is reported as a resolution
//! error by the engine.

use crate::identity::IdentityValue;

/// Capabilities a domain object may expose to take part in access control.
///
/// The two capabilities are independent. An object that provides only
/// [`acl_type`](Self::acl_type) resolves with the wildcard identity; one
/// that provides only [`acl_identity`](Self::acl_identity) cannot be
/// resolved at all, since permission keys are grouped by type first.
pub trait AclEntity {
    /// Category this object belongs to ("staff", "article").
    fn acl_type(&self) -> Option<String> {
        None
    }

    /// Identity of this object within its category.
    fn acl_identity(&self) -> Option<IdentityValue> {
        None
    }
}

/// One side of a permission: the actor or the resource.
#[derive(Clone, Copy)]
pub enum Party<'a> {
    /// A bare category with no sub-identity, e.g. the literal group
    /// `"guest"`. Useful for coarse permissions without a domain type.
    Category(&'a str),
    /// A typed domain object.
    Object(&'a dyn AclEntity),
}

impl<'a> From<&'a str> for Party<'a> {
    fn from(name: &'a str) -> Self {
        Self::Category(name)
    }
}

impl<'a, T: AclEntity> From<&'a T> for Party<'a> {
    fn from(entity: &'a T) -> Self {
        Self::Object(entity)
    }
}

/// Resolve a party into its `(type, identity)` pair.
///
/// A `None` type signals an unresolvable party. The identity falls back to
/// the wildcard whenever the party carries none of its own.
pub(crate) fn resolve(party: Party<'_>) -> (Option<String>, IdentityValue) {
    match party {
        Party::Category(name) => (Some(name.to_string()), IdentityValue::wildcard()),
        Party::Object(entity) => (
            entity.acl_type(),
            entity
                .acl_identity()
                .unwrap_or_else(IdentityValue::wildcard),
        ),
    }
}
