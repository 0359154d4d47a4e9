//! Error types for the keyring module.

use folio_keys_cache::CacheError;
use folio_keys_core::CoreError;
use thiserror::Error;

use crate::collaborators::{PermissionError, RegistryError};

/// Errors that can occur during keyring operations.
///
/// Denial is not an error: a caller the permission service turns down
/// gets `None`/no-op, never one of these.
#[derive(Debug, Error)]
pub enum KeyringError {
    /// The caller's email is empty.
    #[error("user email is required")]
    UserEmailRequired,

    /// The collection carries no description.
    #[error("collection description is required")]
    DescriptionRequired,

    /// The collection description carries an empty identifier.
    #[error("collection identifier is required")]
    CollectionIdRequired,

    /// The collection identifier is malformed.
    #[error("invalid collection identifier")]
    InvalidCollectionId(#[source] CoreError),

    /// The permission check itself failed; the original error is the
    /// cause. Never converted into a denial.
    #[error("permission check failed")]
    PermissionCheck(#[source] PermissionError),

    /// The collections registry failed to produce a visible set.
    #[error("failed to filter collections for user")]
    FilterCollectionsFailed(#[source] RegistryError),

    /// Error propagated from the cache (and through it, the store).
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Result type for keyring operations.
pub type Result<T> = std::result::Result<T, KeyringError>;
