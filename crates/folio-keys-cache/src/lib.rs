//! # Folio Keys Cache
//!
//! Write-through, in-memory cache over the collection key store. The
//! cache is the only component that mutates the store on behalf of the
//! rest of the system.
//!
//! ## Overview
//!
//! Collection counts are small and key operations infrequent, so the
//! cache uses one coarse lock: every operation is serialized, which is
//! exactly what keeps two concurrent writers from persisting divergent
//! keys for the same collection.
//!
//! ## Key Types
//!
//! - [`KeyCache`] - The write-through cache itself
//! - [`CacheHandle`] - Install-once handle held by the composition root
//!
//! ## Invariants
//!
//! - A cached value always equals what the store holds for the same
//!   identifier; disagreement is a hard [`CacheError::KeyMismatch`],
//!   never a silent overwrite.
//! - `add` is idempotent for equal key material.
//! - `load` is a full resynchronization, not a merge.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use folio_keys_cache::{CacheHandle, KeyCache};
//! use folio_keys_store::MemoryKeyStore;
//!
//! async fn example() {
//!     let cache = KeyCache::open(Arc::new(MemoryKeyStore::new())).await.unwrap();
//!
//!     let handle = CacheHandle::new();
//!     handle.install(Arc::new(cache)).unwrap();
//!     let cache = handle.get().unwrap();
//! }
//! ```

pub mod cache;
pub mod error;
pub mod handle;

pub use cache::KeyCache;
pub use error::{CacheError, Result};
pub use handle::CacheHandle;
