//! Mock implementation of IdentityStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::identity::{Identity, IdentityId, NewIdentity};
use crate::errors::{AuthError, DomainError};

use super::r#trait::IdentityStore;

/// Plaintext-password identity store for unit tests
pub struct MockIdentityStore {
    identities: RwLock<HashMap<IdentityId, (Identity, String)>>,
    next_id: AtomicU64,
    unavailable: AtomicBool,
}

impl MockIdentityStore {
    pub fn new() -> Self {
        Self {
            identities: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Seed an identity with a fixed ID
    pub async fn insert(&self, id: IdentityId, username: &str, password: &str) -> Identity {
        let identity = Identity::new(id, username);
        self.identities
            .write()
            .await
            .insert(id, (identity.clone(), password.to_string()));
        identity
    }

    pub async fn remove(&self, id: IdentityId) {
        self.identities.write().await.remove(&id);
    }

    /// Make every call fail as if the backing store were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::internal("identity store offline"));
        }
        Ok(())
    }
}

impl Default for MockIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityStore for MockIdentityStore {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, DomainError> {
        self.check_available()?;
        let identities = self.identities.read().await;
        Ok(identities
            .values()
            .find(|(identity, secret)| identity.username == username && secret == password)
            .map(|(identity, _)| identity.clone()))
    }

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, DomainError> {
        self.check_available()?;
        let identities = self.identities.read().await;
        Ok(identities.get(&id).map(|(identity, _)| identity.clone()))
    }

    async fn register(&self, new_identity: NewIdentity) -> Result<Identity, DomainError> {
        self.check_available()?;
        let mut identities = self.identities.write().await;

        if identities
            .values()
            .any(|(identity, _)| identity.username == new_identity.username)
        {
            return Err(AuthError::UsernameTaken {
                username: new_identity.username,
            }
            .into());
        }

        // Skip past seeded IDs
        let mut id = self.next_id.fetch_add(1, Ordering::SeqCst);
        while identities.contains_key(&id) {
            id = self.next_id.fetch_add(1, Ordering::SeqCst);
        }

        let identity = Identity::new(id, new_identity.username);
        identities.insert(id, (identity.clone(), new_identity.password));
        Ok(identity)
    }
}
