//! The write-through key cache.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use folio_keys_core::{CollectionId, CollectionKey};
use folio_keys_store::KeyStore;
use tokio::sync::Mutex;

use crate::error::{CacheError, Result};

/// Write-through cache mapping collection identifiers to decrypted keys.
///
/// One exclusive lock serializes `add`, `get`, `remove`, `load`, and
/// `list` against each other, including their store I/O. That is what
/// guarantees two tasks cannot both observe "not present" and write
/// divergent keys for the same identifier.
pub struct KeyCache {
    store: Arc<dyn KeyStore>,
    entries: Mutex<BTreeMap<CollectionId, CollectionKey>>,
}

impl KeyCache {
    /// Construct a cache over `store`, performing an initial full load.
    ///
    /// Store errors from the initial load propagate; a cache is never
    /// handed out in a half-synchronized state.
    pub async fn open(store: Arc<dyn KeyStore>) -> Result<Self> {
        let entries = store.read_all().await?;
        tracing::debug!(collections = entries.len(), "key cache loaded");
        Ok(Self {
            store,
            entries: Mutex::new(entries),
        })
    }

    /// Register a key for a collection, writing through to the store.
    ///
    /// Adding the key material already held for `id` (in cache or store)
    /// is a silent no-op. Adding *different* material for an identifier
    /// that already has a key fails with [`CacheError::KeyMismatch`]
    /// without writing anywhere.
    pub async fn add(&self, id: &CollectionId, key: &CollectionKey) -> Result<()> {
        let mut entries = self.entries.lock().await;

        if let Some(existing) = entries.get(id) {
            if existing == key {
                return Ok(());
            }
            tracing::warn!(collection = %id, "rejected conflicting key material");
            return Err(CacheError::KeyMismatch { id: id.clone() });
        }

        // Not cached: the store is the source of truth.
        if self.store.exists(id).await? {
            let stored = self.store.read(id).await?;
            if stored != *key {
                tracing::warn!(collection = %id, "rejected conflicting key material");
                return Err(CacheError::KeyMismatch { id: id.clone() });
            }
            // Already durable; adopt without writing.
            entries.insert(id.clone(), key.clone());
            return Ok(());
        }

        self.store.write(id, key).await?;
        entries.insert(id.clone(), key.clone());
        Ok(())
    }

    /// Fetch the key for a collection, filling the cache on a miss.
    ///
    /// Fails with [`CacheError::KeyNotFound`] if neither the cache nor
    /// the store knows the identifier. Failed store reads are never
    /// cached.
    pub async fn get(&self, id: &CollectionId) -> Result<CollectionKey> {
        let mut entries = self.entries.lock().await;

        if let Some(key) = entries.get(id) {
            return Ok(key.clone());
        }

        if !self.store.exists(id).await? {
            return Err(CacheError::KeyNotFound(id.clone()));
        }

        let key = self.store.read(id).await?;
        entries.insert(id.clone(), key.clone());
        Ok(key)
    }

    /// Remove a collection's key from the store, then evict it.
    ///
    /// Fails with [`CacheError::KeyNotFound`] if the store has no key for
    /// the identifier. Store deletion happens first; an identifier the
    /// cache never held is still a successful removal.
    pub async fn remove(&self, id: &CollectionId) -> Result<()> {
        let mut entries = self.entries.lock().await;

        if !self.store.exists(id).await? {
            return Err(CacheError::KeyNotFound(id.clone()));
        }

        self.store.delete(id).await?;
        entries.remove(id);
        Ok(())
    }

    /// Resynchronize the cache from the store, wholesale.
    ///
    /// Identifiers previously cached but absent from the store are
    /// dropped; an empty store empties the cache. Not a merge.
    pub async fn load(&self) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let loaded = self.store.read_all().await?;
        tracing::debug!(collections = loaded.len(), "key cache resynchronized");
        *entries = loaded;
        Ok(())
    }

    /// The set of identifiers currently known.
    ///
    /// A warm cache answers from memory; a cold (empty) cache enumerates
    /// the store first so an empty answer is never invented while keys
    /// exist durably.
    pub async fn list(&self) -> Result<BTreeSet<CollectionId>> {
        let mut entries = self.entries.lock().await;

        if entries.is_empty() {
            *entries = self.store.read_all().await?;
        }

        Ok(entries.keys().cloned().collect())
    }
}
