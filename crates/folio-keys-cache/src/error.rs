//! Error types for the cache module.

use folio_keys_core::CollectionId;
use folio_keys_store::StoreError;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Error propagated unchanged from the store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A different key already exists for the identifier.
    ///
    /// Signals a consistency bug upstream (e.g. double key generation);
    /// never resolved by overwriting.
    #[error("conflicting key material for collection {id}")]
    KeyMismatch { id: CollectionId },

    /// No key is known for the identifier, in cache or store.
    #[error("no key for collection {0}")]
    KeyNotFound(CollectionId),

    /// The cache handle was used before a cache was installed.
    #[error("key cache has not been initialised")]
    NotInitialised,

    /// A cache was installed into a handle twice.
    #[error("key cache has already been initialised")]
    AlreadyInitialised,
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
