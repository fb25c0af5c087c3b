//! # Infrastructure Layer
//!
//! Concrete implementations of the Keystone storage interfaces:
//! - **Database**: MySQL connection pool and schema bootstrap using SQLx
//! - **Cache**: Redis client with connection retry
//! - **Ledger**: MySQL and Redis revocation ledgers, plus the `LedgerBackend`
//!   dispatcher selected by configuration
//! - **Identity**: in-memory and MySQL identity stores with bcrypt hashing

use ks_core::errors::DomainError;

/// Database module - MySQL connection pool and schema
pub mod database;

/// Cache module - Redis client
pub mod cache;

/// Revocation ledger adapters
pub mod ledger;

/// Identity store adapters
pub mod identity;

/// Configuration types consumed by this crate
pub mod config {
    pub use ks_shared::config::{
        AuthConfig, CacheConfig, DatabaseConfig, IdentityStoreKind, LedgerBackendKind,
        LedgerConfig,
    };
}

pub use cache::RedisClient;
pub use database::DatabasePool;
pub use identity::{IdentityBackend, InMemoryIdentityStore, MySqlIdentityStore};
pub use ledger::{LedgerBackend, MySqlRevocationLedger, RedisRevocationLedger};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Internal {
            message: error.to_string(),
        }
    }
}
