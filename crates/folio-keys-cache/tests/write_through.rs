//! Cache/store agreement over the file backend.

use std::sync::Arc;

use folio_keys_cache::{CacheError, KeyCache};
use folio_keys_core::{CollectionId, CollectionKey, MasterKey};
use folio_keys_store::{FileKeyStore, KeyStore};

fn id(s: &str) -> CollectionId {
    CollectionId::new(s).unwrap()
}

#[tokio::test]
async fn cache_survives_restart_over_same_store() {
    let dir = tempfile::tempdir().unwrap();
    let master = MasterKey::generate();
    let key = CollectionKey::generate();

    {
        let store = Arc::new(FileKeyStore::open(dir.path(), master.clone()).unwrap());
        let cache = KeyCache::open(store).await.unwrap();
        cache.add(&id("summer-issue"), &key).await.unwrap();
    }

    // Fresh cache over the same directory and master key: the earlier
    // write is visible without any explicit load call.
    let store = Arc::new(FileKeyStore::open(dir.path(), master).unwrap());
    let cache = KeyCache::open(store).await.unwrap();
    assert_eq!(cache.get(&id("summer-issue")).await.unwrap(), key);
}

#[tokio::test]
async fn collection_138_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileKeyStore::open(dir.path(), MasterKey::generate()).unwrap());
    let cache = KeyCache::open(store.clone()).await.unwrap();

    let id = id("138");
    let key = CollectionKey::generate();

    assert!(!store.exists(&id).await.unwrap());

    cache.add(&id, &key).await.unwrap();
    assert!(store.exists(&id).await.unwrap());
    assert_eq!(cache.get(&id).await.unwrap(), key);

    cache.remove(&id).await.unwrap();
    assert!(!store.exists(&id).await.unwrap());

    let result = cache.get(&id).await;
    assert!(matches!(result, Err(CacheError::KeyNotFound(_))));
}

#[tokio::test]
async fn mismatched_add_changes_nothing_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileKeyStore::open(dir.path(), MasterKey::generate()).unwrap());
    let cache = KeyCache::open(store.clone()).await.unwrap();

    let k1 = CollectionKey::generate();
    cache.add(&id("a"), &k1).await.unwrap();

    let result = cache.add(&id("a"), &CollectionKey::generate()).await;
    assert!(matches!(result, Err(CacheError::KeyMismatch { .. })));

    // Store and cache still agree on the original key.
    assert_eq!(store.read(&id("a")).await.unwrap(), k1);
    assert_eq!(cache.get(&id("a")).await.unwrap(), k1);
}

#[tokio::test]
async fn load_drops_identifiers_missing_from_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileKeyStore::open(dir.path(), MasterKey::generate()).unwrap());
    let cache = KeyCache::open(store.clone()).await.unwrap();

    let kb = CollectionKey::generate();
    cache.add(&id("a"), &CollectionKey::generate()).await.unwrap();
    cache.add(&id("b"), &kb).await.unwrap();

    // "a" is removed from the store out-of-band, then a full resync runs.
    store.delete(&id("a")).await.unwrap();
    cache.load().await.unwrap();

    let listed = cache.list().await.unwrap();
    assert_eq!(listed.into_iter().collect::<Vec<_>>(), vec![id("b")]);
    assert_eq!(cache.get(&id("b")).await.unwrap(), kb);
}
