//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a file store over a temp
//! directory, opened caches, and canned users/collections.

use std::sync::Arc;

use folio_keys_cache::KeyCache;
use folio_keys_core::{CollectionId, CollectionKey, MasterKey};
use folio_keys_keyring::{Collection, User};
use folio_keys_store::{FileKeyStore, StoreError};

/// A test fixture owning a temp directory, master key material, and a
/// file store rooted in it.
///
/// The temp directory lives as long as the fixture; opening a second
/// store or cache over the same fixture models a process restart.
pub struct TestFixture {
    dir: tempfile::TempDir,
    master: MasterKey,
}

impl TestFixture {
    /// Create a fixture with a fresh temp directory and random master key.
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            master: MasterKey::generate(),
        })
    }

    /// Open a file store over the fixture's directory and master key.
    pub fn open_store(&self) -> Result<FileKeyStore, StoreError> {
        FileKeyStore::open(self.dir.path(), self.master.clone())
    }

    /// Open a freshly loaded cache over a new store instance.
    pub async fn open_cache(&self) -> Result<Arc<KeyCache>, folio_keys_cache::CacheError> {
        let store = Arc::new(self.open_store()?);
        Ok(Arc::new(KeyCache::open(store).await?))
    }

    /// The master key material shared by all stores of this fixture.
    pub fn master(&self) -> &MasterKey {
        &self.master
    }

    /// A valid identifier for tests.
    pub fn collection_id(&self, name: &str) -> CollectionId {
        CollectionId::new(name).expect("valid test identifier")
    }
}

/// An editor-level test user.
pub fn editor() -> User {
    User::new("editor@folio.example")
}

/// A restricted viewer test user.
pub fn viewer() -> User {
    User::new("viewer@folio.example")
}

/// A collection shape carrying the given identifier.
pub fn collection(id: &str) -> Collection {
    Collection::with_id(id)
}

/// A deterministic key for tests that need stable material.
pub fn fixed_key(tag: u8) -> CollectionKey {
    CollectionKey::from_bytes([tag; 32])
}
