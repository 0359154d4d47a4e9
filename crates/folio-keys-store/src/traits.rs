//! KeyStore trait: the abstract interface for collection key persistence.
//!
//! This trait keeps the cache storage-agnostic. Implementations include
//! the file-per-key store (primary) and an in-memory store (for tests).

use std::collections::BTreeMap;

use async_trait::async_trait;
use folio_keys_core::{CollectionId, CollectionKey};

use crate::error::Result;

/// The KeyStore trait: async interface for encrypted key persistence.
///
/// All methods are async; the file backend routes blocking fs and cipher
/// work through `spawn_blocking` to avoid stalling the runtime.
///
/// # Design Notes
///
/// - **One key per identifier**: `write` fails with `KeyAlreadyExists`
///   rather than overwriting; deletion is explicit.
/// - **Strict enumeration**: `read_all` is all-or-nothing, failing with
///   `DecryptionFailed` on the first undecryptable entry.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Check whether a key exists for the identifier.
    async fn exists(&self, id: &CollectionId) -> Result<bool>;

    /// Decrypt and return the key for the identifier.
    ///
    /// # Returns
    /// - `KeyNotFound` if no key is persisted for `id`.
    /// - `DecryptionFailed` if the stored bytes cannot be decrypted or
    ///   parsed as a valid key.
    async fn read(&self, id: &CollectionId) -> Result<CollectionKey>;

    /// Encrypt `key` under the master key and persist it for `id`.
    ///
    /// Fails with `KeyAlreadyExists` if a key is already persisted;
    /// callers must `delete` first.
    async fn write(&self, id: &CollectionId, key: &CollectionKey) -> Result<()>;

    /// Enumerate and decrypt every persisted key.
    ///
    /// Fails with `DecryptionFailed` (naming the offending identifier) on
    /// the first entry that cannot be decrypted, and `DirectoryNotFound`
    /// if the backing directory is gone.
    async fn read_all(&self) -> Result<BTreeMap<CollectionId, CollectionKey>>;

    /// Remove the key for the identifier.
    ///
    /// Fails with `KeyNotFound` if nothing is persisted for `id`.
    async fn delete(&self, id: &CollectionId) -> Result<()>;
}
