//! Configuration for the token service

use chrono::Duration;
use ks_shared::config::{ConfigError, JwtConfig};

/// Claim values and lifetimes used when minting tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// `iss` claim written and required on every token
    pub issuer: String,
    /// `aud` claim written and required on every token
    pub audience: String,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            issuer: "keystone".to_string(),
            audience: "keystone-api".to_string(),
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
        }
    }
}

impl TokenServiceConfig {
    /// Build from the shared JWT settings (lifetimes are in seconds there)
    ///
    /// Fails when a lifetime does not fit a `chrono::Duration`.
    pub fn from_jwt_config(jwt: &JwtConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            access_ttl: ttl_from_seconds("auth.jwt.access_token_ttl", jwt.access_token_ttl)?,
            refresh_ttl: ttl_from_seconds("auth.jwt.refresh_token_ttl", jwt.refresh_token_ttl)?,
        })
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }
}

fn ttl_from_seconds(field: &str, seconds: i64) -> Result<Duration, ConfigError> {
    Duration::try_seconds(seconds).ok_or_else(|| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: format!("{} seconds is out of range", seconds),
    })
}
