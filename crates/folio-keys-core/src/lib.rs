//! # Folio Keys Core
//!
//! Core primitives for the folio collection key subsystem: collection
//! identifiers, key material, and the AES-CBC at-rest encryption used by
//! the key store.
//!
//! ## Overview
//!
//! Every in-progress publishing collection is protected by its own
//! symmetric key. This crate defines the identifier and key types shared
//! by the store, cache, and keyring layers, plus the cipher used to
//! persist collection keys at rest.
//!
//! ## Key Types
//!
//! - [`CollectionId`] - Validated opaque identifier naming a collection
//! - [`CollectionKey`] - 256-bit symmetric key protecting one collection
//! - [`MasterKey`] - Process-wide key + IV encrypting collection keys at rest
//!
//! ## Usage
//!
//! ```rust
//! use folio_keys_core::{encrypt_key, decrypt_key, CollectionKey, MasterKey};
//!
//! let master = MasterKey::generate();
//! let key = CollectionKey::generate();
//!
//! let ciphertext = encrypt_key(&master, &key);
//! let recovered = decrypt_key(&master, &ciphertext).unwrap();
//! assert_eq!(recovered, key);
//! ```
//!
//! ## Design Notes
//!
//! - **One key per collection**: keys are generated once and immutable
//!   for the life of the collection.
//! - **Shared IV**: every collection key is encrypted under the same
//!   master key and IV. See the security note on [`MasterKey`].

pub mod crypto;
pub mod error;
pub mod id;
pub mod key;

pub use crypto::{decrypt_key, encrypt_key};
pub use error::CoreError;
pub use id::CollectionId;
pub use key::{CollectionKey, MasterKey, COLLECTION_KEY_LEN, MASTER_IV_LEN};
