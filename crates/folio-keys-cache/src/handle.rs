//! Install-once handle to the process-wide key cache.
//!
//! The handle is an explicitly constructed cell the host application's
//! composition root owns and passes to consumers. There is no hidden
//! global state and no null-check race: use-before-install is a typed
//! error, not a lazily-initialized singleton.

use std::sync::{Arc, OnceLock};

use crate::cache::KeyCache;
use crate::error::{CacheError, Result};

/// A cell holding the shared [`KeyCache`], installed exactly once.
#[derive(Default)]
pub struct CacheHandle {
    cell: OnceLock<Arc<KeyCache>>,
}

impl CacheHandle {
    /// Create an empty, uninstalled handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the cache. Fails with [`CacheError::AlreadyInitialised`]
    /// on a second call.
    pub fn install(&self, cache: Arc<KeyCache>) -> Result<()> {
        self.cell
            .set(cache)
            .map_err(|_| CacheError::AlreadyInitialised)
    }

    /// Get the installed cache. Fails with [`CacheError::NotInitialised`]
    /// if nothing has been installed yet.
    pub fn get(&self) -> Result<Arc<KeyCache>> {
        self.cell
            .get()
            .cloned()
            .ok_or(CacheError::NotInitialised)
    }

    /// Whether a cache has been installed.
    pub fn is_installed(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_keys_store::MemoryKeyStore;

    async fn make_cache() -> Arc<KeyCache> {
        Arc::new(
            KeyCache::open(Arc::new(MemoryKeyStore::new()))
                .await
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_get_before_install_fails() {
        let handle = CacheHandle::new();
        assert!(matches!(handle.get(), Err(CacheError::NotInitialised)));
        assert!(!handle.is_installed());
    }

    #[tokio::test]
    async fn test_install_then_get() {
        let handle = CacheHandle::new();
        let cache = make_cache().await;

        handle.install(cache.clone()).unwrap();
        assert!(handle.is_installed());
        assert!(Arc::ptr_eq(&handle.get().unwrap(), &cache));
    }

    #[tokio::test]
    async fn test_double_install_fails() {
        let handle = CacheHandle::new();
        handle.install(make_cache().await).unwrap();

        let result = handle.install(make_cache().await);
        assert!(matches!(result, Err(CacheError::AlreadyInitialised)));
    }
}
