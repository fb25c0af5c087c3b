//! Configuration-selected revocation ledger

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use ks_core::domain::entities::token::RevocationEntry;
use ks_core::errors::DomainError;
use ks_core::repositories::{InMemoryRevocationLedger, RevocationLedger};

use crate::cache::RedisClient;
use crate::config::{CacheConfig, LedgerBackendKind, LedgerConfig};
use crate::database::DatabasePool;
use crate::InfrastructureError;

use super::{MySqlRevocationLedger, RedisRevocationLedger};

/// The ledger chosen at startup
///
/// An enum rather than a trait object so the token service stays generic over
/// a single concrete type.
pub enum LedgerBackend {
    Memory(InMemoryRevocationLedger),
    MySql(MySqlRevocationLedger),
    Redis(RedisRevocationLedger),
}

impl LedgerBackend {
    /// Build the backend named by `config.backend`
    ///
    /// The MySQL backend reuses `database`, which must be present; the Redis
    /// backend opens its own connection from `cache`.
    pub async fn connect(
        config: &LedgerConfig,
        database: Option<&DatabasePool>,
        cache: &CacheConfig,
    ) -> Result<Self, InfrastructureError> {
        info!(backend = %config.backend, "Initializing revocation ledger");

        match config.backend {
            LedgerBackendKind::Memory => Ok(Self::Memory(InMemoryRevocationLedger::new())),
            LedgerBackendKind::MySql => {
                let pool = database.ok_or_else(|| {
                    InfrastructureError::Config(
                        "MySQL ledger backend requires a database connection".to_string(),
                    )
                })?;
                Ok(Self::MySql(MySqlRevocationLedger::new(pool)))
            }
            LedgerBackendKind::Redis => {
                let client = RedisClient::new(cache).await?;
                Ok(Self::Redis(RedisRevocationLedger::new(
                    client,
                    config.redis_key_prefix.clone(),
                )))
            }
        }
    }

    pub fn kind(&self) -> LedgerBackendKind {
        match self {
            Self::Memory(_) => LedgerBackendKind::Memory,
            Self::MySql(_) => LedgerBackendKind::MySql,
            Self::Redis(_) => LedgerBackendKind::Redis,
        }
    }
}

#[async_trait]
impl RevocationLedger for LedgerBackend {
    async fn put(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        match self {
            Self::Memory(ledger) => ledger.put(entry).await,
            Self::MySql(ledger) => ledger.put(entry).await,
            Self::Redis(ledger) => ledger.put(entry).await,
        }
    }

    async fn get_by_id(&self, token_id: Uuid) -> Result<Option<RevocationEntry>, DomainError> {
        match self {
            Self::Memory(ledger) => ledger.get_by_id(token_id).await,
            Self::MySql(ledger) => ledger.get_by_id(token_id).await,
            Self::Redis(ledger) => ledger.get_by_id(token_id).await,
        }
    }

    async fn delete_by_id(&self, token_id: Uuid) -> Result<bool, DomainError> {
        match self {
            Self::Memory(ledger) => ledger.delete_by_id(token_id).await,
            Self::MySql(ledger) => ledger.delete_by_id(token_id).await,
            Self::Redis(ledger) => ledger.delete_by_id(token_id).await,
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        match self {
            Self::Memory(ledger) => ledger.delete_expired(now).await,
            Self::MySql(ledger) => ledger.delete_expired(now).await,
            Self::Redis(ledger) => ledger.delete_expired(now).await,
        }
    }
}
