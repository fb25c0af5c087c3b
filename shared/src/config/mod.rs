//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing keys and token lifetimes
//! - `cache` - Redis connection used by the Redis revocation ledger
//! - `database` - MySQL connection used by the identity store and ledger
//! - `environment` - Environment detection and logging configuration
//! - `ledger` - Revocation ledger backend selection and cleanup schedule
//! - `server` - HTTP server binding

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod ledger;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, IdentityStoreKind, JwtConfig, DEFAULT_JWT_SECRET, MAX_TOKEN_TTL_SECONDS};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use ledger::{LedgerBackendKind, LedgerConfig};
pub use server::ServerConfig;

/// Configuration validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Missing required setting: {field}")]
    Missing { field: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Revocation ledger configuration
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Redis configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            ledger: LedgerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 9090),
            auth: AuthConfig::default(),
            ledger: LedgerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 9090),
            auth: AuthConfig {
                identity_store: IdentityStoreKind::MySql,
                ..AuthConfig::from_env()
            },
            ledger: LedgerConfig {
                backend: LedgerBackendKind::MySql,
                ..LedgerConfig::default()
            },
            database: DatabaseConfig::from_env().with_max_connections(50),
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Production => Self::production(),
            Environment::Development | Environment::Staging => Self::development(),
        };
        config.environment = env;
        config.server = ServerConfig::from_env();
        config.auth = AuthConfig::from_env();
        config.ledger = LedgerConfig::from_env();
        config.database = DatabaseConfig::from_env();
        config.cache = CacheConfig::from_env();
        config.logging = LoggingConfig::for_environment(env);
        config
    }

    /// Validate cross-field constraints before the server starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.validate()?;
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::invalid(
                "auth.jwt.secret",
                "the development secret cannot be used in production",
            ));
        }
        self.ledger.validate()?;
        Ok(())
    }
}
