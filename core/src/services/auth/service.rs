//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::identity::{Identity, NewIdentity};
use crate::domain::entities::token::TokenPair;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{IdentityStore, RevocationLedger};
use crate::services::token::TokenService;

/// Authentication flows exposed to the HTTP layer
pub struct AuthService<L: RevocationLedger, I: IdentityStore> {
    /// Identity store for credential checks and registration
    identities: Arc<I>,
    /// Token service for pair issuance and rotation
    tokens: Arc<TokenService<L, I>>,
}

impl<L: RevocationLedger, I: IdentityStore> AuthService<L, I> {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `identities` - Identity store, shared with the token service
    /// * `tokens` - Token service for JWT management
    pub fn new(identities: Arc<I>, tokens: Arc<TokenService<L, I>>) -> Self {
        Self { identities, tokens }
    }

    pub fn token_service(&self) -> Arc<TokenService<L, I>> {
        self.tokens.clone()
    }

    /// Create a new identity
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - The created identity
    /// * `Err(DomainError::Auth(AuthError::UsernameTaken))` - Duplicate username
    /// * `Err(DomainError::Auth(AuthError::IdentityStoreUnavailable))` - Store failure
    pub async fn register(&self, new_identity: NewIdentity) -> DomainResult<Identity> {
        let username = new_identity.username.clone();

        match self.identities.register(new_identity).await {
            Ok(identity) => {
                info!(subject = identity.id, "Registered identity");
                Ok(identity)
            }
            Err(e @ DomainError::Auth(AuthError::UsernameTaken { .. }))
            | Err(e @ DomainError::Validation { .. }) => {
                warn!(username = %username, error_kind = e.kind(), "Registration rejected");
                Err(e)
            }
            Err(e) => Err(AuthError::IdentityStoreUnavailable {
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Exchange username and password for a token pair
    ///
    /// Unknown usernames and wrong passwords are both reported as
    /// `InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<TokenPair> {
        let identity = self
            .identities
            .verify_credentials(username, password)
            .await
            .map_err(|e| AuthError::IdentityStoreUnavailable {
                message: e.to_string(),
            })?;

        let Some(identity) = identity else {
            warn!(error_kind = "invalid_credentials", "Login rejected");
            return Err(AuthError::InvalidCredentials.into());
        };

        let pair = self.tokens.issue(&identity).await?;
        info!(subject = identity.id, "Login succeeded");
        Ok(pair)
    }

    /// Rotate a refresh token into a new pair
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        self.tokens.rotate(refresh_token).await.map_err(|e| {
            warn!(error_kind = e.kind(), "Refresh rejected");
            DomainError::from(e)
        })
    }

    /// Revoke a refresh token
    ///
    /// An already absent entry is not an error: logout is idempotent.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        match self.tokens.revoke(refresh_token).await {
            Ok(()) | Err(TokenError::NotFound) => Ok(()),
            Err(e) => {
                warn!(error_kind = e.kind(), "Logout rejected");
                Err(e.into())
            }
        }
    }
}
