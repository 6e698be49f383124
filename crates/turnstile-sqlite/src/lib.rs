//! SQLite storage for Turnstile permissions.
//!
//! Implements the [`turnstile_core::Store`] contract over a SQLite
//! `permissions` table: natural-key uniqueness is enforced by a unique
//! index, and two non-unique secondary indexes keep grantee- and
//! resource-side lookups efficient.

mod codec;
mod db;
mod store;

pub use db::{Database, DatabaseError};
pub use store::SqliteStore;
