//! Revocation ledger configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Storage backend holding refresh-token liveness entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackendKind {
    /// Process-local map; entries are lost on restart
    #[default]
    Memory,
    /// `refresh_tokens` table in MySQL
    #[serde(rename = "mysql")]
    MySql,
    /// One Redis key per entry
    Redis,
}

impl std::str::FromStr for LedgerBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "mysql" => Ok(Self::MySql),
            "redis" => Ok(Self::Redis),
            _ => Err(format!("Invalid ledger backend: {}", s)),
        }
    }
}

impl std::fmt::Display for LedgerBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::MySql => write!(f, "mysql"),
            Self::Redis => write!(f, "redis"),
        }
    }
}

/// Ledger backend and maintenance settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// Backend to use
    #[serde(default)]
    pub backend: LedgerBackendKind,

    /// Whether expired entries are purged periodically
    #[serde(default = "default_cleanup_enabled")]
    pub cleanup_enabled: bool,

    /// Seconds between cleanup runs
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,

    /// Key prefix for the Redis backend
    #[serde(default = "default_key_prefix")]
    pub redis_key_prefix: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            backend: LedgerBackendKind::default(),
            cleanup_enabled: default_cleanup_enabled(),
            cleanup_interval_seconds: default_cleanup_interval(),
            redis_key_prefix: default_key_prefix(),
        }
    }
}

impl LedgerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: std::env::var("LEDGER_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.backend),
            cleanup_enabled: std::env::var("LEDGER_CLEANUP_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_enabled),
            cleanup_interval_seconds: std::env::var("LEDGER_CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval_seconds),
            redis_key_prefix: std::env::var("LEDGER_REDIS_PREFIX")
                .unwrap_or(defaults.redis_key_prefix),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cleanup_enabled && self.cleanup_interval_seconds == 0 {
            return Err(ConfigError::invalid(
                "ledger.cleanup_interval_seconds",
                "must be positive when cleanup is enabled",
            ));
        }
        Ok(())
    }
}

fn default_cleanup_enabled() -> bool {
    true
}

fn default_cleanup_interval() -> u64 {
    3600 // hourly
}

fn default_key_prefix() -> String {
    String::from("keystone:refresh")
}
