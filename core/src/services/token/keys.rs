//! Signing key material for JWT issuance and verification

use std::fs;
use std::path::Path;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use ks_shared::config::JwtConfig;

use crate::errors::TokenError;

/// Immutable key pair shared by every token the process signs or checks
///
/// Built once at startup and handed to the codec; tests construct their own
/// deterministic keys through the same constructors.
#[derive(Clone)]
pub struct SigningKeys {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeys")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl SigningKeys {
    /// Symmetric HS256 keys from a shared secret
    ///
    /// # Returns
    ///
    /// * `Ok(SigningKeys)` - Keys ready for use
    /// * `Err(TokenError::SigningError)` - The secret is empty
    pub fn hs256(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(key_error("HS256 secret must not be empty"));
        }

        Ok(Self {
            algorithm: Algorithm::HS256,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    /// Asymmetric RS256 keys from PEM strings
    ///
    /// # Arguments
    ///
    /// * `private_key_pem` - PEM-encoded RSA private key
    /// * `public_key_pem` - PEM-encoded RSA public key
    pub fn rs256_from_pem(private_key_pem: &str, public_key_pem: &str) -> Result<Self, TokenError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| key_error(format!("Invalid private key format: {}", e)))?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| key_error(format!("Invalid public key format: {}", e)))?;

        Ok(Self {
            algorithm: Algorithm::RS256,
            encoding_key,
            decoding_key,
        })
    }

    /// Asymmetric RS256 keys loaded from PEM files
    pub fn rs256_from_files<P: AsRef<Path>>(
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, TokenError> {
        let private_key_pem = fs::read_to_string(private_key_path.as_ref()).map_err(|e| {
            key_error(format!(
                "Failed to read private key {}: {}",
                private_key_path.as_ref().display(),
                e
            ))
        })?;

        let public_key_pem = fs::read_to_string(public_key_path.as_ref()).map_err(|e| {
            key_error(format!(
                "Failed to read public key {}: {}",
                public_key_path.as_ref().display(),
                e
            ))
        })?;

        Self::rs256_from_pem(&private_key_pem, &public_key_pem)
    }

    /// Keys selected by the configured algorithm
    pub fn from_jwt_config(config: &JwtConfig) -> Result<Self, TokenError> {
        match config.algorithm.to_ascii_uppercase().as_str() {
            "HS256" => Self::hs256(config.secret.as_bytes()),
            "RS256" => {
                let private_key_path = config
                    .private_key_path
                    .as_deref()
                    .ok_or_else(|| key_error("RS256 requires a private key path"))?;
                let public_key_path = config
                    .public_key_path
                    .as_deref()
                    .ok_or_else(|| key_error("RS256 requires a public key path"))?;
                Self::rs256_from_files(private_key_path, public_key_path)
            }
            other => Err(key_error(format!("Unsupported JWT algorithm: {}", other))),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

fn key_error(message: impl Into<String>) -> TokenError {
    TokenError::SigningError {
        message: message.into(),
    }
}
