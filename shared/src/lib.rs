//! Shared configuration and response types for the Keystone server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (JWT, ledger backend, database, cache, server, logging)
//! - Error response envelope shared by every HTTP endpoint

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, DatabaseConfig, Environment,
    IdentityStoreKind, JwtConfig, LedgerBackendKind, LedgerConfig, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
