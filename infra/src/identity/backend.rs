//! Configuration-selected identity store

use async_trait::async_trait;
use tracing::info;

use ks_core::domain::entities::identity::{Identity, IdentityId, NewIdentity};
use ks_core::errors::DomainError;
use ks_core::repositories::IdentityStore;

use crate::config::{AuthConfig, IdentityStoreKind};
use crate::database::DatabasePool;
use crate::InfrastructureError;

use super::{InMemoryIdentityStore, MySqlIdentityStore};

/// The identity store chosen at startup
pub enum IdentityBackend {
    Memory(InMemoryIdentityStore),
    MySql(MySqlIdentityStore),
}

impl IdentityBackend {
    /// Build the store named by `config.identity_store`
    pub fn connect(
        config: &AuthConfig,
        database: Option<&DatabasePool>,
    ) -> Result<Self, InfrastructureError> {
        info!(store = %config.identity_store, "Initializing identity store");

        match config.identity_store {
            IdentityStoreKind::Memory => Ok(Self::Memory(InMemoryIdentityStore::new(
                config.bcrypt_cost,
            )?)),
            IdentityStoreKind::MySql => {
                let pool = database.ok_or_else(|| {
                    InfrastructureError::Config(
                        "MySQL identity store requires a database connection".to_string(),
                    )
                })?;
                Ok(Self::MySql(MySqlIdentityStore::new(pool, config.bcrypt_cost)?))
            }
        }
    }

    pub fn kind(&self) -> IdentityStoreKind {
        match self {
            Self::Memory(_) => IdentityStoreKind::Memory,
            Self::MySql(_) => IdentityStoreKind::MySql,
        }
    }
}

#[async_trait]
impl IdentityStore for IdentityBackend {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, DomainError> {
        match self {
            Self::Memory(store) => store.verify_credentials(username, password).await,
            Self::MySql(store) => store.verify_credentials(username, password).await,
        }
    }

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, DomainError> {
        match self {
            Self::Memory(store) => store.find_by_id(id).await,
            Self::MySql(store) => store.find_by_id(id).await,
        }
    }

    async fn register(&self, new_identity: NewIdentity) -> Result<Identity, DomainError> {
        match self {
            Self::Memory(store) => store.register(new_identity).await,
            Self::MySql(store) => store.register(new_identity).await,
        }
    }
}
