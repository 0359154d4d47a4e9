//! The keyring: permission-gated access to collection keys.

use std::collections::BTreeSet;
use std::sync::Arc;

use folio_keys_cache::{CacheError, KeyCache};
use folio_keys_core::{CollectionId, CollectionKey};

use crate::collaborators::{Collection, CollectionRegistry, PermissionService, User};
use crate::error::{KeyringError, Result};

/// Authorization façade over the key cache.
///
/// Stateless apart from the shared cache handle and its collaborators;
/// all key state lives in the cache and store below.
pub struct Keyring<P, R> {
    cache: Arc<KeyCache>,
    permissions: P,
    registry: R,
}

impl<P, R> Keyring<P, R>
where
    P: PermissionService,
    R: CollectionRegistry,
{
    /// Build a keyring over the shared cache and its collaborators.
    pub fn new(cache: Arc<KeyCache>, permissions: P, registry: R) -> Self {
        Self {
            cache,
            permissions,
            registry,
        }
    }

    /// Fetch the key for a collection on behalf of a user.
    ///
    /// Returns `None` both when the user is denied and when the
    /// collection has no key; typed errors are reserved for malformed
    /// input, collaborator failure, and infrastructure failure.
    pub async fn get(&self, user: &User, collection: &Collection) -> Result<Option<CollectionKey>> {
        let email = validate_user(user)?;
        let id = validate_collection(collection)?;

        if !self.check_can_edit(email).await? {
            tracing::debug!(user = email, collection = %id, "key access denied");
            return Ok(None);
        }

        match self.cache.get(&id).await {
            Ok(key) => Ok(Some(key)),
            Err(CacheError::KeyNotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Register a key for a collection on behalf of a user.
    ///
    /// A denied caller is a silent no-op. For an allowed caller the
    /// cache's idempotence and mismatch semantics apply unchanged.
    pub async fn add(
        &self,
        user: &User,
        collection: &Collection,
        key: &CollectionKey,
    ) -> Result<()> {
        let email = validate_user(user)?;
        let id = validate_collection(collection)?;

        if !self.check_can_edit(email).await? {
            tracing::debug!(user = email, collection = %id, "key add denied");
            return Ok(());
        }

        Ok(self.cache.add(&id, key).await?)
    }

    /// Remove a collection's key on behalf of a user.
    ///
    /// A denied caller is a silent no-op; for an allowed caller cache
    /// errors (including a missing key) propagate unchanged.
    pub async fn remove(&self, user: &User, collection: &Collection) -> Result<()> {
        let email = validate_user(user)?;
        let id = validate_collection(collection)?;

        if !self.check_can_edit(email).await? {
            tracing::debug!(user = email, collection = %id, "key removal denied");
            return Ok(());
        }

        Ok(self.cache.remove(&id).await?)
    }

    /// List the collection identifiers visible to a user.
    ///
    /// Editors get the full set the cache knows. Restricted viewers get
    /// the intersection of the registry's visible set with the cache's
    /// known identifiers.
    pub async fn list(&self, user: &User) -> Result<BTreeSet<CollectionId>> {
        let email = validate_user(user)?;
        let known = self.cache.list().await?;

        if self.check_can_edit(email).await? {
            return Ok(known);
        }

        let visible = self
            .registry
            .visible_to(email)
            .await
            .map_err(KeyringError::FilterCollectionsFailed)?;

        // Registry entries without a well-formed identifier cannot name a
        // cached key, so they drop out of the intersection.
        let visible_ids: BTreeSet<CollectionId> = visible
            .iter()
            .filter_map(|c| c.description.as_ref())
            .filter_map(|d| CollectionId::new(d.id.as_str()).ok())
            .collect();

        Ok(known.intersection(&visible_ids).cloned().collect())
    }

    /// Run the permission check, wrapping a failing backend with the
    /// original error as cause.
    async fn check_can_edit(&self, email: &str) -> Result<bool> {
        self.permissions
            .can_edit(email)
            .await
            .map_err(KeyringError::PermissionCheck)
    }
}

/// Validate the caller, returning the email used for permission checks.
fn validate_user(user: &User) -> Result<&str> {
    if user.email.is_empty() {
        return Err(KeyringError::UserEmailRequired);
    }
    Ok(&user.email)
}

/// Validate the collection argument down to its identifier.
fn validate_collection(collection: &Collection) -> Result<CollectionId> {
    let description = collection
        .description
        .as_ref()
        .ok_or(KeyringError::DescriptionRequired)?;

    if description.id.is_empty() {
        return Err(KeyringError::CollectionIdRequired);
    }

    CollectionId::new(description.id.as_str()).map_err(KeyringError::InvalidCollectionId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::PermissionError;
    use async_trait::async_trait;
    use folio_keys_store::MemoryKeyStore;

    struct AllowAll;

    #[async_trait]
    impl PermissionService for AllowAll {
        async fn can_edit(&self, _email: &str) -> std::result::Result<bool, PermissionError> {
            Ok(true)
        }
    }

    struct EmptyRegistry;

    #[async_trait]
    impl CollectionRegistry for EmptyRegistry {
        async fn visible_to(
            &self,
            _email: &str,
        ) -> std::result::Result<Vec<Collection>, crate::collaborators::RegistryError> {
            Ok(Vec::new())
        }
    }

    async fn make_keyring() -> Keyring<AllowAll, EmptyRegistry> {
        let store = Arc::new(MemoryKeyStore::new());
        let cache = Arc::new(KeyCache::open(store).await.unwrap());
        Keyring::new(cache, AllowAll, EmptyRegistry)
    }

    #[tokio::test]
    async fn test_empty_email_rejected() {
        let keyring = make_keyring().await;
        let user = User::new("");
        let collection = Collection::with_id("138");

        let result = keyring.get(&user, &collection).await;
        assert!(matches!(result, Err(KeyringError::UserEmailRequired)));

        let result = keyring.list(&user).await;
        assert!(matches!(result, Err(KeyringError::UserEmailRequired)));
    }

    #[tokio::test]
    async fn test_missing_description_rejected() {
        let keyring = make_keyring().await;
        let user = User::new("editor@folio.example");
        let collection = Collection { description: None };

        let result = keyring.get(&user, &collection).await;
        assert!(matches!(result, Err(KeyringError::DescriptionRequired)));
    }

    #[tokio::test]
    async fn test_empty_collection_id_rejected() {
        let keyring = make_keyring().await;
        let user = User::new("editor@folio.example");
        let collection = Collection::with_id("");

        let result = keyring.get(&user, &collection).await;
        assert!(matches!(result, Err(KeyringError::CollectionIdRequired)));

        let result = keyring
            .add(&user, &collection, &CollectionKey::generate())
            .await;
        assert!(matches!(result, Err(KeyringError::CollectionIdRequired)));

        let result = keyring.remove(&user, &collection).await;
        assert!(matches!(result, Err(KeyringError::CollectionIdRequired)));
    }

    #[tokio::test]
    async fn test_malformed_collection_id_rejected() {
        let keyring = make_keyring().await;
        let user = User::new("editor@folio.example");
        let collection = Collection::with_id("../escape");

        let result = keyring.get(&user, &collection).await;
        assert!(matches!(result, Err(KeyringError::InvalidCollectionId(_))));
    }

    #[tokio::test]
    async fn test_get_absent_key_is_none() {
        let keyring = make_keyring().await;
        let user = User::new("editor@folio.example");

        let result = keyring
            .get(&user, &Collection::with_id("138"))
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
