//! Consumed collaborator interfaces and shapes.
//!
//! The permission service, the collections registry, and the collection
//! object itself are external to this subsystem; only the contracts
//! consumed here are modelled.

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Failure of the permission backend (I/O-shaped, e.g. a directory
/// service being unreachable). Never interpreted as a denial.
#[derive(Debug)]
pub struct PermissionError {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl PermissionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for PermissionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// Failure of the collections registry.
#[derive(Debug)]
pub struct RegistryError {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl RegistryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for RegistryError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// Decides whether a user may edit (and therefore see) protected
/// collection content.
#[async_trait]
pub trait PermissionService: Send + Sync {
    /// Whether the user identified by `email` has edit rights.
    async fn can_edit(&self, email: &str) -> std::result::Result<bool, PermissionError>;
}

/// Enumerates the collections a restricted user may view.
///
/// Must return an empty vec, not an error, when nothing matches.
#[async_trait]
pub trait CollectionRegistry: Send + Sync {
    /// Collections visible to the user identified by `email`.
    async fn visible_to(&self, email: &str)
        -> std::result::Result<Vec<Collection>, RegistryError>;
}

/// A caller of the keyring. Identity for permission checks is the email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// The consumed shape of a publishing collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub description: Option<CollectionDescription>,
}

impl Collection {
    /// A collection carrying just an identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            description: Some(CollectionDescription { id: id.into() }),
        }
    }
}

/// Descriptive metadata of a collection; only the identifier matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionDescription {
    pub id: String,
}
