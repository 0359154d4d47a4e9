//! Error types for the folio keys core.

use thiserror::Error;

/// Core errors for identifier validation and key cryptography.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The collection identifier is empty or malformed.
    #[error("invalid collection identifier: {0}")]
    InvalidIdentifier(String),

    /// Raw key bytes have the wrong length.
    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    /// Ciphertext could not be decrypted into a valid collection key.
    #[error("key decryption failed: {0}")]
    DecryptFailed(String),
}
