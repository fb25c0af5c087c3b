//! Authentication and token signing configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Secret used when nothing is configured; refused in production
pub const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// Longest accepted token lifetime in seconds (ten years)
pub const MAX_TOKEN_TTL_SECONDS: i64 = 10 * 365 * 86_400;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret for HS256 signing
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Algorithm for JWT signing ("HS256" or "RS256")
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// PEM private key path (RS256 only)
    #[serde(default)]
    pub private_key_path: Option<String>,

    /// PEM public key path (RS256 only)
    #[serde(default)]
    pub public_key_path: Option<String>,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl: i64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl: i64,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// JWT audience claim
    #[serde(default = "default_audience")]
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            algorithm: default_algorithm(),
            private_key_path: None,
            public_key_path: None,
            access_token_ttl: default_access_ttl(),
            refresh_token_ttl: default_refresh_ttl(),
            issuer: default_issuer(),
            audience: default_audience(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_ttl_minutes(mut self, minutes: i64) -> Self {
        self.access_token_ttl = minutes * 60;
        self
    }

    /// Set refresh token lifetime in days
    pub fn with_refresh_ttl_days(mut self, days: i64) -> Self {
        self.refresh_token_ttl = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.algorithm.eq_ignore_ascii_case("HS256") && self.secret == DEFAULT_JWT_SECRET
    }

    /// Validate lifetimes and key material settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_ttl <= 0 {
            return Err(ConfigError::invalid("auth.jwt.access_token_ttl", "must be positive"));
        }
        if self.refresh_token_ttl <= 0 {
            return Err(ConfigError::invalid("auth.jwt.refresh_token_ttl", "must be positive"));
        }
        if self.access_token_ttl > MAX_TOKEN_TTL_SECONDS {
            return Err(ConfigError::invalid(
                "auth.jwt.access_token_ttl",
                "must not exceed ten years",
            ));
        }
        if self.refresh_token_ttl > MAX_TOKEN_TTL_SECONDS {
            return Err(ConfigError::invalid(
                "auth.jwt.refresh_token_ttl",
                "must not exceed ten years",
            ));
        }
        if self.access_token_ttl >= self.refresh_token_ttl {
            return Err(ConfigError::invalid(
                "auth.jwt.access_token_ttl",
                "must be shorter than the refresh token lifetime",
            ));
        }

        match self.algorithm.to_ascii_uppercase().as_str() {
            "HS256" => {
                if self.secret.is_empty() {
                    return Err(ConfigError::Missing {
                        field: "auth.jwt.secret".to_string(),
                    });
                }
            }
            "RS256" => {
                if self.private_key_path.is_none() {
                    return Err(ConfigError::Missing {
                        field: "auth.jwt.private_key_path".to_string(),
                    });
                }
                if self.public_key_path.is_none() {
                    return Err(ConfigError::Missing {
                        field: "auth.jwt.public_key_path".to_string(),
                    });
                }
            }
            other => {
                return Err(ConfigError::invalid(
                    "auth.jwt.algorithm",
                    format!("unsupported algorithm {}", other),
                ));
            }
        }

        Ok(())
    }
}

/// Where identities and password hashes live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityStoreKind {
    /// Process-local map, empty at startup
    #[default]
    Memory,
    /// `users` table in MySQL
    #[serde(rename = "mysql")]
    MySql,
}

impl std::str::FromStr for IdentityStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "mysql" => Ok(Self::MySql),
            _ => Err(format!("Invalid identity store: {}", s)),
        }
    }
}

impl std::fmt::Display for IdentityStoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::MySql => write!(f, "mysql"),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Identity store backend
    #[serde(default)]
    pub identity_store: IdentityStoreKind,

    /// bcrypt work factor for new password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            identity_store: IdentityStoreKind::default(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    /// bcrypt accepts work factors 4 through 31
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid("auth.bcrypt_cost", "must be between 4 and 31"));
        }
        self.jwt.validate()
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);
        let algorithm = std::env::var("JWT_ALGORITHM").unwrap_or(defaults.algorithm);
        let access_token_ttl = std::env::var("JWT_ACCESS_TOKEN_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.access_token_ttl);
        let refresh_token_ttl = std::env::var("JWT_REFRESH_TOKEN_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.refresh_token_ttl);

        Self {
            jwt: JwtConfig {
                secret,
                algorithm,
                private_key_path: std::env::var("JWT_PRIVATE_KEY_PATH").ok(),
                public_key_path: std::env::var("JWT_PUBLIC_KEY_PATH").ok(),
                access_token_ttl,
                refresh_token_ttl,
                issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
                audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
            },
            identity_store: std::env::var("IDENTITY_STORE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            bcrypt_cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_bcrypt_cost),
        }
    }
}

fn default_secret() -> String {
    String::from(DEFAULT_JWT_SECRET)
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_access_ttl() -> i64 {
    900 // 15 minutes
}

fn default_refresh_ttl() -> i64 {
    604800 // 7 days
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_issuer() -> String {
    String::from("keystone")
}

fn default_audience() -> String {
    String::from("keystone-api")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_ttl, 900);
        assert_eq!(config.refresh_token_ttl, 604800);
        assert_eq!(config.algorithm, "HS256");
        assert!(config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_ttl_minutes(30)
            .with_refresh_ttl_days(14);

        assert_eq!(config.access_token_ttl, 1800);
        assert_eq!(config.refresh_token_ttl, 1209600);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_access_ttl_must_be_shorter_than_refresh() {
        let mut config = JwtConfig::new("secret");
        config.access_token_ttl = config.refresh_token_ttl;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let mut config = JwtConfig::new("secret");
        config.access_token_ttl = 0;
        assert!(config.validate().is_err());

        let mut config = JwtConfig::new("secret");
        config.refresh_token_ttl = -5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        let mut config = JwtConfig::new("secret");
        config.refresh_token_ttl = i64::MAX;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::invalid("auth.jwt.refresh_token_ttl", "must not exceed ten years")
        );

        let mut config = JwtConfig::new("secret");
        config.refresh_token_ttl = MAX_TOKEN_TTL_SECONDS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rs256_requires_key_paths() {
        let mut config = JwtConfig::new("unused");
        config.algorithm = "RS256".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::Missing {
                field: "auth.jwt.private_key_path".to_string()
            })
        );

        config.private_key_path = Some("keys/private.pem".to_string());
        config.public_key_path = Some("keys/public.pem".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let mut config = AuthConfig::default();
        assert!(config.validate().is_ok());

        config.bcrypt_cost = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_identity_store_kind_parsing() {
        assert_eq!("MySQL".parse::<IdentityStoreKind>(), Ok(IdentityStoreKind::MySql));
        assert_eq!("memory".parse::<IdentityStoreKind>(), Ok(IdentityStoreKind::Memory));
        assert!("ldap".parse::<IdentityStoreKind>().is_err());
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let mut config = JwtConfig::new("secret");
        config.algorithm = "none".to_string();
        assert!(config.validate().is_err());
    }
}
