//! Main token service implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{RevocationEntry, TokenClaims, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError, VerificationError};
use crate::repositories::{IdentityStore, RevocationLedger};
use crate::services::gate::AuthGate;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::keys::SigningKeys;

/// Issues, verifies, rotates and revokes token pairs
///
/// Access tokens are verified statelessly. Refresh tokens are additionally
/// bound to an entry in the revocation ledger, and rotation consumes that
/// entry through the ledger's compare-and-delete so each refresh token is
/// redeemable at most once.
pub struct TokenService<L: RevocationLedger, I: IdentityStore> {
    ledger: Arc<L>,
    identities: Arc<I>,
    codec: Arc<TokenCodec>,
}

impl<L: RevocationLedger, I: IdentityStore> TokenService<L, I> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `ledger` - Revocation ledger holding live refresh tokens
    /// * `identities` - Identity store used to resolve subjects on rotation
    /// * `keys` - Signing key material
    /// * `config` - Claim values and lifetimes
    pub fn new(
        ledger: Arc<L>,
        identities: Arc<I>,
        keys: SigningKeys,
        config: TokenServiceConfig,
    ) -> Self {
        Self {
            ledger,
            identities,
            codec: Arc::new(TokenCodec::new(keys, config)),
        }
    }

    pub fn codec(&self) -> Arc<TokenCodec> {
        self.codec.clone()
    }

    /// Request-time gate sharing this service's verification keys
    pub fn gate(&self) -> AuthGate {
        AuthGate::new(self.codec.clone())
    }

    /// Issue a new token pair for an identity
    ///
    /// The refresh token's ledger entry is written before the pair is
    /// returned; if that write fails, no pair is returned.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Both tokens signed and the refresh token recorded
    /// * `Err(TokenError::SigningError)` - Key or encoding failure
    /// * `Err(TokenError::LedgerUnavailable)` - Ledger write failed
    pub async fn issue(&self, identity: &Identity) -> Result<TokenPair, TokenError> {
        let now = Utc::now();
        let access_claims = self.codec.claims_at(identity.id, TokenKind::Access, now);
        let refresh_claims = self.codec.claims_at(identity.id, TokenKind::Refresh, now);

        let access_token = self.codec.sign(&access_claims)?;
        let refresh_token = self.codec.sign(&refresh_claims)?;

        self.ledger
            .put(RevocationEntry::for_refresh_claims(&refresh_claims, identity.id))
            .await
            .map_err(ledger_unavailable)?;

        debug!(
            subject = identity.id,
            access_token_id = %access_claims.jti,
            refresh_token_id = %refresh_claims.jti,
            "Issued token pair"
        );

        Ok(TokenPair::new(
            access_token,
            &access_claims,
            refresh_token,
            &refresh_claims,
        ))
    }

    /// Stateless check of signature, kind and expiry
    pub fn verify(
        &self,
        token: &str,
        expected: TokenKind,
    ) -> Result<TokenClaims, VerificationError> {
        self.codec.verify(token, expected)
    }

    /// Redeem a refresh token for a brand-new pair
    ///
    /// Once the ledger entry is found it is deleted before anything else can
    /// fail, so a refresh token is never redeemable twice. Concurrent callers
    /// presenting the same token race on the delete; the losers observe
    /// `Revoked`.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New pair issued, old refresh token consumed
    /// * `Err(TokenError::Invalid)` - Refresh token failed verification
    /// * `Err(TokenError::Revoked)` - Already redeemed, revoked or never issued here
    /// * `Err(TokenError::IdentityLookupFailed)` - Subject could not be resolved
    /// * `Err(TokenError::SigningError)` / `Err(TokenError::LedgerUnavailable)`
    pub async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, TokenError> {
        let claims = self.codec.verify(refresh_token, TokenKind::Refresh)?;
        let subject = claims.subject().map_err(|_| VerificationError::Malformed)?;

        let entry = self
            .ledger
            .get_by_id(claims.jti)
            .await
            .map_err(ledger_unavailable)?;

        let Some(entry) = entry else {
            warn!(token_id = %claims.jti, subject, "Refresh token reuse or unknown token");
            return Err(TokenError::Revoked);
        };

        let deleted = self
            .ledger
            .delete_by_id(claims.jti)
            .await
            .map_err(ledger_unavailable)?;

        if !deleted {
            warn!(token_id = %claims.jti, subject, "Lost rotation race for refresh token");
            return Err(TokenError::Revoked);
        }

        if entry.subject != subject {
            warn!(
                token_id = %claims.jti,
                claimed = subject,
                recorded = entry.subject,
                "Refresh token subject does not match ledger entry"
            );
            return Err(TokenError::Revoked);
        }

        let identity = match self.identities.find_by_id(subject).await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                return Err(TokenError::IdentityLookupFailed {
                    message: format!("identity {} not found", subject),
                })
            }
            Err(e) => {
                return Err(TokenError::IdentityLookupFailed {
                    message: e.to_string(),
                })
            }
        };

        let pair = self.issue(&identity).await?;

        info!(
            subject,
            old_token_id = %claims.jti,
            new_token_id = %pair.refresh_token_id,
            "Rotated refresh token"
        );

        Ok(pair)
    }

    /// Delete a refresh token's ledger entry without issuing a replacement
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Entry removed
    /// * `Err(TokenError::NotFound)` - Entry already absent
    /// * `Err(TokenError::Invalid)` - Refresh token failed verification
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), TokenError> {
        let claims = self.codec.verify(refresh_token, TokenKind::Refresh)?;

        let deleted = self
            .ledger
            .delete_by_id(claims.jti)
            .await
            .map_err(ledger_unavailable)?;

        if deleted {
            info!(token_id = %claims.jti, subject = %claims.sub, "Revoked refresh token");
            Ok(())
        } else {
            Err(TokenError::NotFound)
        }
    }

    /// Drop ledger entries whose refresh tokens have expired
    pub async fn cleanup_expired(&self) -> Result<usize, TokenError> {
        self.ledger
            .delete_expired(Utc::now())
            .await
            .map_err(ledger_unavailable)
    }
}

fn ledger_unavailable(error: DomainError) -> TokenError {
    TokenError::LedgerUnavailable {
        message: error.to_string(),
    }
}
