//! JWT encoding and stateless verification

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Header, Validation};
use tracing::debug;

use crate::domain::entities::identity::IdentityId;
use crate::domain::entities::token::{TokenClaims, TokenKind};
use crate::errors::{TokenError, VerificationError};

use super::config::TokenServiceConfig;
use super::keys::SigningKeys;

/// Signs claims and checks signed tokens against one set of keys
///
/// Verification is purely local: signature, issuer and audience through
/// `jsonwebtoken`, then the token kind, then expiry. The ledger is never
/// consulted here.
pub struct TokenCodec {
    keys: SigningKeys,
    config: TokenServiceConfig,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("keys", &self.keys)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(keys: SigningKeys, config: TokenServiceConfig) -> Self {
        let mut validation = Validation::new(keys.algorithm());
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        // Expiry is checked by hand after the kind check, with no leeway
        validation.validate_exp = false;

        Self {
            keys,
            config,
            validation,
        }
    }

    /// Fresh claims with the lifetime configured for `kind`
    pub fn claims_at(
        &self,
        subject: IdentityId,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
    ) -> TokenClaims {
        let ttl = match kind {
            TokenKind::Access => self.config.access_ttl,
            TokenKind::Refresh => self.config.refresh_ttl,
        };

        TokenClaims::new(
            subject,
            kind,
            issued_at,
            ttl,
            &self.config.issuer,
            &self.config.audience,
        )
    }

    /// Encode and sign a set of claims
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let header = Header::new(self.keys.algorithm());
        encode(&header, claims, self.keys.encoding_key()).map_err(|e| TokenError::SigningError {
            message: format!("Failed to encode JWT: {}", e),
        })
    }

    /// Verify a token against the current clock
    pub fn verify(
        &self,
        token: &str,
        expected: TokenKind,
    ) -> Result<TokenClaims, VerificationError> {
        self.verify_at(token, expected, Utc::now())
    }

    /// Verify a token as of `now`
    ///
    /// # Returns
    ///
    /// * `Ok(TokenClaims)` - Signature, kind and expiry all check out
    /// * `Err(VerificationError::Malformed)` - Not a structurally valid token
    /// * `Err(VerificationError::SignatureInvalid)` - Tampered, wrong key, wrong issuer or audience
    /// * `Err(VerificationError::WrongKind)` - Access presented as refresh or vice versa
    /// * `Err(VerificationError::Expired)` - Past `exp`
    pub fn verify_at(
        &self,
        token: &str,
        expected: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, VerificationError> {
        let claims = decode::<TokenClaims>(token, self.keys.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "JWT decode failed");
                map_decode_error(e.kind())
            })?;

        if claims.kind != expected {
            return Err(VerificationError::WrongKind {
                expected,
                actual: claims.kind,
            });
        }

        if claims.subject().is_err() || claims.exp <= claims.iat {
            return Err(VerificationError::Malformed);
        }

        if claims.is_expired_at(now) {
            return Err(VerificationError::Expired);
        }

        Ok(claims)
    }
}

fn map_decode_error(kind: &ErrorKind) -> VerificationError {
    match kind {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience => VerificationError::SignatureInvalid,
        ErrorKind::ExpiredSignature => VerificationError::Expired,
        _ => VerificationError::Malformed,
    }
}
