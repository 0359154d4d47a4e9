//! Collection identifiers.
//!
//! A [`CollectionId`] is the opaque string naming a publishing collection.
//! It is the lookup key for every operation in this subsystem, so it is
//! validated once at construction and treated as well-formed everywhere
//! downstream.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A validated, non-empty collection identifier.
///
/// The store derives one file name per identifier, so the identifier must
/// stay injective under that mapping: empty strings, path separators, and
/// leading dots are rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct CollectionId(String);

impl CollectionId {
    /// Create a new identifier, validating its shape.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::InvalidIdentifier(
                "identifier must not be empty".into(),
            ));
        }
        if id.contains('/') || id.contains('\\') {
            return Err(CoreError::InvalidIdentifier(format!(
                "identifier {:?} contains a path separator",
                id
            )));
        }
        if id.starts_with('.') {
            return Err(CoreError::InvalidIdentifier(format!(
                "identifier {:?} starts with a dot",
                id
            )));
        }
        Ok(Self(id))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CollectionId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CollectionId {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for CollectionId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
