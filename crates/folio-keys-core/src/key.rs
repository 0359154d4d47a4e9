//! Key material: per-collection keys and the process-wide master key.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::CoreError;

/// Length in bytes of a collection key (AES-256).
pub const COLLECTION_KEY_LEN: usize = 32;

/// Length in bytes of the master IV (one AES block).
pub const MASTER_IV_LEN: usize = 16;

/// A 256-bit symmetric key protecting one collection's content.
///
/// Generated once when the collection is created and immutable for the
/// life of the collection.
#[derive(Clone, PartialEq, Eq)]
pub struct CollectionKey([u8; COLLECTION_KEY_LEN]);

impl CollectionKey {
    /// Generate a new random key from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; COLLECTION_KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; COLLECTION_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice, checking the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        let bytes: [u8; COLLECTION_KEY_LEN] =
            bytes.try_into().map_err(|_| CoreError::InvalidKeyLength {
                expected: COLLECTION_KEY_LEN,
                got: bytes.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; COLLECTION_KEY_LEN] {
        &self.0
    }

    /// Short stable fingerprint for logs and diagnostics.
    ///
    /// Never log the key bytes themselves; log this.
    pub fn fingerprint(&self) -> String {
        let hash = blake3::hash(&self.0);
        hex::encode(&hash.as_bytes()[..8])
    }
}

impl fmt::Debug for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CollectionKey")
            .field(&self.fingerprint())
            .finish()
    }
}

/// The process-wide master key and IV used to encrypt collection keys
/// at rest.
///
/// Supplied once at store construction and reused for every entry.
///
/// # Security
///
/// Every entry in a store is encrypted under this one key/IV pair, so
/// CBC leaks equality of key material between entries. Moving to
/// per-entry IVs changes the on-disk format; see DESIGN.md.
#[derive(Clone)]
pub struct MasterKey {
    key: [u8; COLLECTION_KEY_LEN],
    iv: [u8; MASTER_IV_LEN],
}

impl MasterKey {
    /// Generate random master key material from the OS RNG.
    pub fn generate() -> Self {
        let mut key = [0u8; COLLECTION_KEY_LEN];
        let mut iv = [0u8; MASTER_IV_LEN];
        OsRng.fill_bytes(&mut key);
        OsRng.fill_bytes(&mut iv);
        Self { key, iv }
    }

    /// Create from raw key and IV bytes.
    pub const fn from_bytes(key: [u8; COLLECTION_KEY_LEN], iv: [u8; MASTER_IV_LEN]) -> Self {
        Self { key, iv }
    }

    /// The raw master key bytes.
    pub fn key_bytes(&self) -> &[u8; COLLECTION_KEY_LEN] {
        &self.key
    }

    /// The raw IV bytes.
    pub fn iv_bytes(&self) -> &[u8; MASTER_IV_LEN] {
        &self.iv
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterKey")
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_differ() {
        let k1 = CollectionKey::generate();
        let k2 = CollectionKey::generate();
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_from_slice_length_check() {
        let result = CollectionKey::from_slice(&[0u8; 16]);
        assert!(matches!(
            result,
            Err(CoreError::InvalidKeyLength { expected: 32, got: 16 })
        ));

        let key = CollectionKey::from_slice(&[0x42; 32]).unwrap();
        assert_eq!(key.as_bytes(), &[0x42; 32]);
    }

    #[test]
    fn test_fingerprint_stable_and_short() {
        let key = CollectionKey::from_bytes([0x42; 32]);
        assert_eq!(key.fingerprint(), key.fingerprint());
        assert_eq!(key.fingerprint().len(), 16);
    }

    #[test]
    fn test_debug_redacts_key_bytes() {
        let key = CollectionKey::from_bytes([0x42; 32]);
        let debug = format!("{:?}", key);
        assert!(!debug.contains("42, 42"));

        let master = MasterKey::generate();
        assert!(format!("{:?}", master).contains("REDACTED"));
    }
}
