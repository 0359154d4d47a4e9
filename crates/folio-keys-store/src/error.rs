//! Error types for the store module.

use std::path::PathBuf;

use folio_keys_core::{CollectionId, CoreError};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No key exists for the identifier.
    #[error("no key for collection {0}")]
    KeyNotFound(CollectionId),

    /// A key already exists for the identifier; the store never overwrites.
    #[error("key already exists for collection {0}")]
    KeyAlreadyExists(CollectionId),

    /// The persisted ciphertext could not be decrypted into a valid key.
    /// Signals corruption or a master key mismatch.
    #[error("failed to decrypt key for collection {id}")]
    DecryptionFailed {
        id: CollectionId,
        #[source]
        source: CoreError,
    },

    /// The store directory does not exist.
    #[error("store directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
