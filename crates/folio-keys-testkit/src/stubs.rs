//! Canned collaborator implementations.
//!
//! Configurable stand-ins for the permission service and collections
//! registry, covering the allow, deny, and failure behaviours tests need.

use async_trait::async_trait;
use folio_keys_keyring::{
    Collection, CollectionRegistry, PermissionError, PermissionService, RegistryError,
};

/// A permission service granting edit rights to a fixed set of emails.
///
/// Construct with [`StubPermissions::allowing`] or make every check fail
/// with [`StubPermissions::failing`].
pub struct StubPermissions {
    editors: Vec<String>,
    failure: Option<String>,
}

impl StubPermissions {
    /// Allow exactly the given emails; everyone else is denied.
    pub fn allowing<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            editors: emails.into_iter().map(Into::into).collect(),
            failure: None,
        }
    }

    /// Deny everyone.
    pub fn denying() -> Self {
        Self::allowing(Vec::<String>::new())
    }

    /// Fail every check with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            editors: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl PermissionService for StubPermissions {
    async fn can_edit(&self, email: &str) -> Result<bool, PermissionError> {
        if let Some(message) = &self.failure {
            return Err(PermissionError::new(message.clone()));
        }
        Ok(self.editors.iter().any(|e| e == email))
    }
}

/// A registry answering with a fixed visible set for one email.
pub struct StubRegistry {
    email: String,
    visible: Vec<Collection>,
    failure: Option<String>,
}

impl StubRegistry {
    /// `email` sees collections with the given identifiers; everyone
    /// else sees an empty set.
    pub fn visible_for<I, S>(email: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            email: email.into(),
            visible: ids.into_iter().map(|id| Collection::with_id(id)).collect(),
            failure: None,
        }
    }

    /// A registry where nothing is visible to anyone.
    pub fn empty() -> Self {
        Self::visible_for("", Vec::<String>::new())
    }

    /// Fail every query with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            email: String::new(),
            visible: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl CollectionRegistry for StubRegistry {
    async fn visible_to(&self, email: &str) -> Result<Vec<Collection>, RegistryError> {
        if let Some(message) = &self.failure {
            return Err(RegistryError::new(message.clone()));
        }
        if email == self.email {
            Ok(self.visible.clone())
        } else {
            Ok(Vec::new())
        }
    }
}
