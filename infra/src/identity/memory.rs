//! Process-local identity store with bcrypt password hashes

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use ks_core::domain::entities::identity::{Identity, IdentityId, NewIdentity};
use ks_core::errors::{AuthError, DomainError};
use ks_core::repositories::IdentityStore;

use crate::InfrastructureError;

use super::hashing::{dummy_hash, hash_password, verify_password};

struct StoredIdentity {
    identity: Identity,
    password_hash: String,
}

#[derive(Default)]
struct Directory {
    by_id: HashMap<IdentityId, StoredIdentity>,
    by_username: HashMap<String, IdentityId>,
    next_id: IdentityId,
}

/// Identity store kept in memory; registrations are lost on restart
pub struct InMemoryIdentityStore {
    directory: RwLock<Directory>,
    bcrypt_cost: u32,
    dummy_hash: String,
}

impl InMemoryIdentityStore {
    pub fn new(bcrypt_cost: u32) -> Result<Self, InfrastructureError> {
        Ok(Self {
            directory: RwLock::new(Directory {
                next_id: 1,
                ..Directory::default()
            }),
            bcrypt_cost,
            dummy_hash: dummy_hash(bcrypt_cost)?,
        })
    }

    /// Number of registered identities
    pub async fn len(&self) -> usize {
        self.directory.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.directory.read().await.by_id.is_empty()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, DomainError> {
        let candidate = {
            let directory = self.directory.read().await;
            directory
                .by_username
                .get(username)
                .and_then(|id| directory.by_id.get(id))
                .map(|stored| (stored.identity.clone(), stored.password_hash.clone()))
        };

        match candidate {
            Some((identity, hash)) => {
                let ok = verify_password(password.to_string(), hash).await?;
                Ok(ok.then_some(identity))
            }
            None => {
                verify_password(password.to_string(), self.dummy_hash.clone()).await?;
                Ok(None)
            }
        }
    }

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, DomainError> {
        let directory = self.directory.read().await;
        Ok(directory.by_id.get(&id).map(|stored| stored.identity.clone()))
    }

    async fn register(&self, new_identity: NewIdentity) -> Result<Identity, DomainError> {
        let password_hash = hash_password(new_identity.password, self.bcrypt_cost).await?;

        let mut directory = self.directory.write().await;
        if directory.by_username.contains_key(&new_identity.username) {
            return Err(AuthError::UsernameTaken {
                username: new_identity.username,
            }
            .into());
        }

        let id = directory.next_id;
        directory.next_id += 1;

        let identity = Identity::new(id, new_identity.username);
        directory.by_username.insert(identity.username.clone(), id);
        directory.by_id.insert(
            id,
            StoredIdentity {
                identity: identity.clone(),
                password_hash,
            },
        );

        tracing::info!(identity_id = id, "Identity registered");
        Ok(identity)
    }
}
