//! In-memory implementation of the KeyStore trait.
//!
//! This is primarily for testing. It has the same semantics as the file
//! store, including real encrypt/decrypt of every entry, but keeps the
//! ciphertext in a map with no persistence.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use folio_keys_core::{decrypt_key, encrypt_key, CollectionId, CollectionKey, MasterKey};

use crate::error::{Result, StoreError};
use crate::traits::KeyStore;

/// In-memory key store.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryKeyStore {
    master: MasterKey,
    entries: RwLock<BTreeMap<CollectionId, Vec<u8>>>,
}

impl MemoryKeyStore {
    /// Create an empty store with a fresh random master key.
    pub fn new() -> Self {
        Self::with_master(MasterKey::generate())
    }

    /// Create an empty store with explicit master key material.
    pub fn with_master(master: MasterKey) -> Self {
        Self {
            master,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Insert undecryptable bytes for an identifier, bypassing `write`.
    ///
    /// Lets tests exercise the `DecryptionFailed` paths without touching
    /// the filesystem.
    pub fn poison(&self, id: &CollectionId) {
        self.entries
            .write()
            .expect("store lock poisoned")
            .insert(id.clone(), b"not ciphertext".to_vec());
    }
}

impl Default for MemoryKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn exists(&self, id: &CollectionId) -> Result<bool> {
        let entries = self.entries.read().expect("store lock poisoned");
        Ok(entries.contains_key(id))
    }

    async fn read(&self, id: &CollectionId) -> Result<CollectionKey> {
        let entries = self.entries.read().expect("store lock poisoned");
        let ciphertext = entries
            .get(id)
            .ok_or_else(|| StoreError::KeyNotFound(id.clone()))?;

        decrypt_key(&self.master, ciphertext).map_err(|source| StoreError::DecryptionFailed {
            id: id.clone(),
            source,
        })
    }

    async fn write(&self, id: &CollectionId, key: &CollectionKey) -> Result<()> {
        let mut entries = self.entries.write().expect("store lock poisoned");
        if entries.contains_key(id) {
            return Err(StoreError::KeyAlreadyExists(id.clone()));
        }

        entries.insert(id.clone(), encrypt_key(&self.master, key));
        Ok(())
    }

    async fn read_all(&self) -> Result<BTreeMap<CollectionId, CollectionKey>> {
        let entries = self.entries.read().expect("store lock poisoned");

        let mut keys = BTreeMap::new();
        for (id, ciphertext) in entries.iter() {
            let key = decrypt_key(&self.master, ciphertext).map_err(|source| {
                StoreError::DecryptionFailed {
                    id: id.clone(),
                    source,
                }
            })?;
            keys.insert(id.clone(), key);
        }

        Ok(keys)
    }

    async fn delete(&self, id: &CollectionId) -> Result<()> {
        let mut entries = self.entries.write().expect("store lock poisoned");
        entries
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::KeyNotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CollectionId {
        CollectionId::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryKeyStore::new();
        let key = CollectionKey::generate();

        store.write(&id("138"), &key).await.unwrap();
        assert!(store.exists(&id("138")).await.unwrap());
        assert_eq!(store.read(&id("138")).await.unwrap(), key);

        store.delete(&id("138")).await.unwrap();
        assert!(!store.exists(&id("138")).await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_store_rejects_duplicate_write() {
        let store = MemoryKeyStore::new();
        store.write(&id("a"), &CollectionKey::generate()).await.unwrap();

        let result = store.write(&id("a"), &CollectionKey::generate()).await;
        assert!(matches!(result, Err(StoreError::KeyAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_poisoned_entry_fails_read_and_read_all() {
        let store = MemoryKeyStore::new();
        store.write(&id("good"), &CollectionKey::generate()).await.unwrap();
        store.poison(&id("bad"));

        assert!(matches!(
            store.read(&id("bad")).await,
            Err(StoreError::DecryptionFailed { .. })
        ));
        assert!(matches!(
            store.read_all().await,
            Err(StoreError::DecryptionFailed { ref id, .. }) if id.as_str() == "bad"
        ));
    }
}
