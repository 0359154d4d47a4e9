//! # Folio Keys Store
//!
//! Durable, encrypted persistence of collection keys. Provides a
//! trait-based interface with a file-per-key primary backend and an
//! in-memory backend for testing.
//!
//! ## Overview
//!
//! The store holds exactly one symmetric key per collection identifier,
//! encrypted at rest under the process-wide master key. It carries no
//! caching and no authorization; those live in the cache and keyring
//! layers above it.
//!
//! ## Key Types
//!
//! - [`KeyStore`] - The async trait for all persistence operations
//! - [`FileKeyStore`] - One `<id>.key` ciphertext file per identifier
//! - [`MemoryKeyStore`] - In-memory backend for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use folio_keys_core::{CollectionId, CollectionKey, MasterKey};
//! use folio_keys_store::{FileKeyStore, KeyStore};
//!
//! async fn example() {
//!     let store = FileKeyStore::open("keys", MasterKey::generate()).unwrap();
//!
//!     let id = CollectionId::new("138").unwrap();
//!     let key = CollectionKey::generate();
//!
//!     store.write(&id, &key).await.unwrap();
//!     assert!(store.exists(&id).await.unwrap());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **No overwrites**: `write` for an existing identifier fails; callers
//!   must `delete` first.
//! - **All-or-nothing enumeration**: `read_all` fails on the first entry
//!   that cannot be decrypted, naming the offending identifier.
//! - **Ciphertext only on disk**: decrypted key bytes never leave the
//!   store boundary in persisted form.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use file::FileKeyStore;
pub use memory::MemoryKeyStore;
pub use traits::KeyStore;
