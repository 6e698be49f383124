//! Error types for the Turnstile core library.

use thiserror::Error;

use crate::store::StoreError;

/// Result type alias using the Turnstile [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`Acl`](crate::Acl) operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The actor or resource could not be resolved into a permission key.
    /// Indicates an unsupported value shape at the call site, never a
    /// transient condition.
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// The backing store failed. Propagated verbatim; the engine attaches
    /// no context and performs no recovery.
    #[error(transparent)]
    Store(#[from] StoreError),
}
