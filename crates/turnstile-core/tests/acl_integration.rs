#![allow(clippy::unwrap_used)] // Integration tests use unwrap for brevity

//! Integration tests for the ACL engine over the in-memory store.
//!
//! Exercises the full flow: grant → check → revoke, resolution failures,
//! and store error propagation.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use turnstile_core::{
    Acl, AclEntity, Error, IdentityValue, MemoryStore, Permission, Store, StoreError,
};

struct Staff {
    id: String,
}

impl AclEntity for Staff {
    fn acl_type(&self) -> Option<String> {
        Some("staff".to_string())
    }

    fn acl_identity(&self) -> Option<IdentityValue> {
        Some(IdentityValue::from(self.id.clone()))
    }
}

struct Article {
    id: i64,
}

impl AclEntity for Article {
    fn acl_type(&self) -> Option<String> {
        Some("article".to_string())
    }

    fn acl_identity(&self) -> Option<IdentityValue> {
        Some(IdentityValue::Int(self.id))
    }
}

fn test_acl() -> Acl<MemoryStore> {
    Acl::new(MemoryStore::new())
}

#[tokio::test]
async fn staff_article_scenario() {
    let acl = test_acl();
    let staff = Staff {
        id: "miclle".to_string(),
    };
    let article = Article { id: 123 };

    for action in ["view", "create", "update", "delete"] {
        acl.allow(&staff, action, &article).await.unwrap();
    }
    acl.allow("guest", "view", "doc").await.unwrap();

    assert!(acl.can(&staff, "view", &article).await.unwrap());
    assert!(acl.can(&staff, "delete", &article).await.unwrap());
    // Never granted.
    assert!(!acl.can(&staff, "rm", &article).await.unwrap());

    acl.remove_permission(&staff, "delete", &article)
        .await
        .unwrap();
    assert!(!acl.can(&staff, "delete", &article).await.unwrap());
    // Revoking one action leaves the others intact.
    assert!(acl.can(&staff, "view", &article).await.unwrap());

    assert!(acl.can("guest", "view", "doc").await.unwrap());
    acl.remove_permission("guest", "view", "doc").await.unwrap();
    assert!(!acl.can("guest", "view", "doc").await.unwrap());
}

#[tokio::test]
async fn idempotent_grant() {
    let acl = test_acl();
    let staff = Staff {
        id: "alice".to_string(),
    };
    let article = Article { id: 1 };

    acl.allow(&staff, "view", &article).await.unwrap();
    acl.allow(&staff, "view", &article).await.unwrap();

    assert_eq!(acl.store().len().await, 1);
    assert!(acl.can(&staff, "view", &article).await.unwrap());
}

#[tokio::test]
async fn action_specificity() {
    let acl = test_acl();
    let staff = Staff {
        id: "alice".to_string(),
    };
    let article = Article { id: 1 };

    acl.allow(&staff, "view", &article).await.unwrap();
    assert!(!acl.can(&staff, "delete", &article).await.unwrap());
}

#[tokio::test]
async fn wildcard_identity_for_bare_strings() {
    let acl = test_acl();

    acl.allow("guest", "view", "doc").await.unwrap();
    assert!(acl.can("guest", "view", "doc").await.unwrap());
    assert!(!acl.can("guest", "delete", "doc").await.unwrap());
    assert!(!acl.can("member", "view", "doc").await.unwrap());
}

#[tokio::test]
async fn grants_do_not_leak_across_resource_identities() {
    let acl = test_acl();
    let staff = Staff {
        id: "alice".to_string(),
    };

    acl.allow(&staff, "update", &Article { id: 1 }).await.unwrap();

    assert!(acl.can(&staff, "update", &Article { id: 1 }).await.unwrap());
    assert!(!acl.can(&staff, "update", &Article { id: 2 }).await.unwrap());
}

#[tokio::test]
async fn grants_do_not_leak_across_actor_identities() {
    let acl = test_acl();

    let alice = Staff {
        id: "alice".to_string(),
    };
    let bob = Staff {
        id: "bob".to_string(),
    };
    let article = Article { id: 1 };

    acl.allow(&alice, "update", &article).await.unwrap();
    assert!(!acl.can(&bob, "update", &article).await.unwrap());
}

struct TypeOnly;

impl AclEntity for TypeOnly {
    fn acl_type(&self) -> Option<String> {
        Some("guest".to_string())
    }
}

#[tokio::test]
async fn type_only_object_matches_bare_string_grants() {
    let acl = test_acl();

    // Both resolve to ("guest", "*"), so they share one natural key.
    acl.allow("guest", "view", "doc").await.unwrap();
    assert!(acl.can(&TypeOnly, "view", "doc").await.unwrap());
    assert_eq!(acl.store().len().await, 1);
}

#[tokio::test]
async fn removing_absent_grant_is_ok() {
    let acl = test_acl();
    acl.remove_permission("guest", "view", "doc").await.unwrap();
    assert!(!acl.can("guest", "view", "doc").await.unwrap());
}

/// Store double that counts round-trips and never matches.
#[derive(Default)]
struct CountingStore {
    calls: AtomicUsize,
}

#[async_trait]
impl Store for CountingStore {
    async fn get(&self, _query: &Permission) -> Result<Permission, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::NotFound)
    }

    async fn upsert(&self, _perm: &Permission) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, _perm: &Permission) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct IdentityOnly;

impl AclEntity for IdentityOnly {
    fn acl_identity(&self) -> Option<IdentityValue> {
        Some(IdentityValue::Int(42))
    }
}

#[tokio::test]
async fn resolution_failure_performs_no_store_call() {
    let acl = Acl::new(CountingStore::default());

    assert!(matches!(
        acl.allow(&IdentityOnly, "view", "doc").await,
        Err(Error::Resolution(_))
    ));
    assert!(matches!(
        acl.can(&IdentityOnly, "view", "doc").await,
        Err(Error::Resolution(_))
    ));
    assert!(matches!(
        acl.remove_permission(&IdentityOnly, "view", "doc").await,
        Err(Error::Resolution(_))
    ));

    assert_eq!(acl.store().calls.load(Ordering::SeqCst), 0);
}

/// Store double that fails every operation with a backend error.
struct FailingStore;

#[async_trait]
impl Store for FailingStore {
    async fn get(&self, _query: &Permission) -> Result<Permission, StoreError> {
        Err(StoreError::Backend("connection reset".to_string()))
    }

    async fn upsert(&self, _perm: &Permission) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection reset".to_string()))
    }

    async fn remove(&self, _perm: &Permission) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection reset".to_string()))
    }
}

#[tokio::test]
async fn backend_errors_propagate_verbatim() {
    let acl = Acl::new(FailingStore);

    assert!(matches!(
        acl.allow("guest", "view", "doc").await,
        Err(Error::Store(StoreError::Backend(_)))
    ));
    // Only NotFound maps to a definitive false; other errors surface.
    assert!(matches!(
        acl.can("guest", "view", "doc").await,
        Err(Error::Store(StoreError::Backend(_)))
    ));
    assert!(matches!(
        acl.remove_permission("guest", "view", "doc").await,
        Err(Error::Store(StoreError::Backend(_)))
    ));
}

#[tokio::test]
async fn engine_works_over_boxed_store() {
    let store: Box<dyn Store> = Box::new(MemoryStore::new());
    let acl = Acl::new(store);

    acl.allow("guest", "view", "doc").await.unwrap();
    assert!(acl.can("guest", "view", "doc").await.unwrap());
}
