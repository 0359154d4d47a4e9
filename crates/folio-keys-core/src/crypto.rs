//! At-rest encryption of collection keys.
//!
//! Collection keys are persisted as AES-256-CBC ciphertext (PKCS#7
//! padding) under the process-wide master key and IV. The plaintext is
//! always exactly the 32 raw key bytes; anything else coming out of
//! decryption means the file is corrupt or was written under a different
//! master key.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::CoreError;
use crate::key::{CollectionKey, MasterKey, COLLECTION_KEY_LEN};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Encrypt a collection key under the master key/IV.
pub fn encrypt_key(master: &MasterKey, key: &CollectionKey) -> Vec<u8> {
    // Key and IV lengths are fixed by the types, so construction cannot fail.
    let cipher = Aes256CbcEnc::new(master.key_bytes().into(), master.iv_bytes().into());
    cipher.encrypt_padded_vec_mut::<Pkcs7>(key.as_bytes())
}

/// Decrypt a collection key from its at-rest ciphertext.
///
/// Fails with [`CoreError::DecryptFailed`] if the padding is invalid
/// (plaintext file, corruption, or a master key mismatch) and with
/// [`CoreError::InvalidKeyLength`] if the plaintext is not exactly one
/// key's worth of bytes.
pub fn decrypt_key(master: &MasterKey, ciphertext: &[u8]) -> Result<CollectionKey, CoreError> {
    let cipher = Aes256CbcDec::new(master.key_bytes().into(), master.iv_bytes().into());
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CoreError::DecryptFailed("bad padding or truncated ciphertext".into()))?;

    if plaintext.len() != COLLECTION_KEY_LEN {
        return Err(CoreError::InvalidKeyLength {
            expected: COLLECTION_KEY_LEN,
            got: plaintext.len(),
        });
    }
    CollectionKey::from_slice(&plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let master = MasterKey::generate();
        let key = CollectionKey::generate();

        let ciphertext = encrypt_key(&master, &key);
        assert_ne!(&ciphertext[..], key.as_bytes().as_slice());

        let recovered = decrypt_key(&master, &ciphertext).unwrap();
        assert_eq!(recovered, key);
    }

    #[test]
    fn test_ciphertext_is_padded_to_block_boundary() {
        let master = MasterKey::generate();
        let key = CollectionKey::generate();

        // 32 bytes of plaintext plus a full PKCS#7 padding block.
        let ciphertext = encrypt_key(&master, &key);
        assert_eq!(ciphertext.len(), 48);
    }

    #[test]
    fn test_decrypt_with_wrong_master_key_fails() {
        let master = MasterKey::generate();
        let other = MasterKey::generate();
        let key = CollectionKey::generate();

        let ciphertext = encrypt_key(&master, &key);
        let result = decrypt_key(&other, &ciphertext);
        // Either the padding breaks or a garbage key of the wrong shape
        // comes out; both are errors, and a silent wrong key is impossible
        // to distinguish here (CBC carries no authentication tag).
        if let Ok(recovered) = result {
            assert_ne!(recovered, key);
        }
    }

    #[test]
    fn test_decrypt_plaintext_file_fails() {
        let master = MasterKey::generate();
        let result = decrypt_key(&master, b"this is not ciphertext");
        assert!(result.is_err());
    }

    #[test]
    fn test_decrypt_empty_fails() {
        let master = MasterKey::generate();
        assert!(decrypt_key(&master, &[]).is_err());
    }

    #[test]
    fn test_same_key_same_ciphertext_under_shared_iv() {
        // The documented IV-reuse limitation: equal keys encrypt to equal
        // ciphertext under the same master key/IV.
        let master = MasterKey::generate();
        let key = CollectionKey::generate();

        assert_eq!(encrypt_key(&master, &key), encrypt_key(&master, &key));
    }

    proptest! {
        #[test]
        fn prop_round_trip_arbitrary_keys(bytes in any::<[u8; 32]>()) {
            let master = MasterKey::generate();
            let key = CollectionKey::from_bytes(bytes);

            let ciphertext = encrypt_key(&master, &key);
            let recovered = decrypt_key(&master, &ciphertext).unwrap();
            prop_assert_eq!(recovered, key);
        }
    }
}
