//! File-per-key implementation of the KeyStore trait.
//!
//! This is the primary backend. Each collection key lives in its own
//! `<id>.key` file under the store directory, containing only AES-CBC
//! ciphertext. Blocking fs and cipher work runs in spawn_blocking.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use folio_keys_core::{decrypt_key, encrypt_key, CollectionId, CollectionKey, MasterKey};

use crate::error::{Result, StoreError};
use crate::traits::KeyStore;

/// Extension of every key file. Keeps the identifier-to-path mapping
/// deterministic and injective.
const KEY_FILE_EXT: &str = "key";

/// File-backed key store.
///
/// Cheap to clone internally per operation; the directory path and master
/// key material are the only state.
pub struct FileKeyStore {
    dir: PathBuf,
    master: MasterKey,
}

impl FileKeyStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>, master: MasterKey) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, master })
    }

    /// The directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the key file for an identifier.
    fn key_path(dir: &Path, id: &CollectionId) -> PathBuf {
        dir.join(format!("{}.{}", id, KEY_FILE_EXT))
    }
}

/// Map a spawn_blocking join failure into a store error.
fn join_error(e: tokio::task::JoinError) -> StoreError {
    StoreError::Io(io::Error::new(
        io::ErrorKind::Other,
        format!("spawn_blocking failed: {}", e),
    ))
}

#[async_trait]
impl KeyStore for FileKeyStore {
    async fn exists(&self, id: &CollectionId) -> Result<bool> {
        let path = Self::key_path(&self.dir, id);

        tokio::task::spawn_blocking(move || Ok(path.try_exists()?))
            .await
            .map_err(join_error)?
    }

    async fn read(&self, id: &CollectionId) -> Result<CollectionKey> {
        let path = Self::key_path(&self.dir, id);
        let master = self.master.clone();
        let id = id.clone();

        tokio::task::spawn_blocking(move || {
            let ciphertext = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(StoreError::KeyNotFound(id));
                }
                Err(e) => return Err(e.into()),
            };

            decrypt_key(&master, &ciphertext)
                .map_err(|source| StoreError::DecryptionFailed { id, source })
        })
        .await
        .map_err(join_error)?
    }

    async fn write(&self, id: &CollectionId, key: &CollectionKey) -> Result<()> {
        let path = Self::key_path(&self.dir, id);
        let master = self.master.clone();
        let id = id.clone();
        let key = key.clone();

        tokio::task::spawn_blocking(move || {
            if path.try_exists()? {
                return Err(StoreError::KeyAlreadyExists(id));
            }

            let ciphertext = encrypt_key(&master, &key);
            fs::write(&path, ciphertext)?;

            tracing::debug!(collection = %id, fingerprint = %key.fingerprint(), "persisted collection key");
            Ok(())
        })
        .await
        .map_err(join_error)?
    }

    async fn read_all(&self) -> Result<BTreeMap<CollectionId, CollectionKey>> {
        let dir = self.dir.clone();
        let master = self.master.clone();

        tokio::task::spawn_blocking(move || {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(StoreError::DirectoryNotFound(dir));
                }
                Err(e) => return Err(e.into()),
            };

            let mut keys = BTreeMap::new();
            for entry in entries {
                let path = entry?.path();
                if path.extension().and_then(|e| e.to_str()) != Some(KEY_FILE_EXT) {
                    continue;
                }

                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let Ok(id) = CollectionId::new(stem) else {
                    tracing::warn!(file = %path.display(), "skipping key file with malformed name");
                    continue;
                };

                let ciphertext = fs::read(&path)?;
                let key = decrypt_key(&master, &ciphertext)
                    .map_err(|source| StoreError::DecryptionFailed { id: id.clone(), source })?;
                keys.insert(id, key);
            }

            Ok(keys)
        })
        .await
        .map_err(join_error)?
    }

    async fn delete(&self, id: &CollectionId) -> Result<()> {
        let path = Self::key_path(&self.dir, id);
        let id = id.clone();

        tokio::task::spawn_blocking(move || {
            match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::debug!(collection = %id, "deleted collection key");
                    Ok(())
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::KeyNotFound(id)),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(join_error)?
    }
}
