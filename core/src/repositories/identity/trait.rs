//! Identity store trait: the credential authority the token service trusts.
//!
//! The core never sees password material beyond handing it through to
//! `verify_credentials`; hashing and constant-time comparison belong to the
//! implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::identity::{Identity, IdentityId, NewIdentity};
use crate::errors::DomainError;

/// Lookup and credential verification for identities
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use ks_core::repositories::IdentityStore;
/// use ks_core::domain::entities::identity::{Identity, IdentityId, NewIdentity};
/// use ks_core::errors::DomainError;
///
/// struct LdapIdentityStore;
///
/// #[async_trait]
/// impl IdentityStore for LdapIdentityStore {
///     async fn verify_credentials(
///         &self,
///         username: &str,
///         password: &str,
///     ) -> Result<Option<Identity>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, DomainError> {
///         Ok(None)
///     }
///
///     async fn register(&self, new: NewIdentity) -> Result<Identity, DomainError> {
///         Err(DomainError::internal("read-only directory"))
///     }
/// }
/// ```
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Check a username/password pair
    ///
    /// # Returns
    /// * `Ok(Some(Identity))` - Credentials are valid
    /// * `Ok(None)` - Unknown username or wrong password, indistinguishably
    /// * `Err(DomainError)` - Store unavailable
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, DomainError>;

    /// Resolve an identity by its identifier
    ///
    /// # Returns
    /// * `Ok(Some(Identity))` - Identity exists
    /// * `Ok(None)` - No such identity
    /// * `Err(DomainError)` - Store unavailable
    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, DomainError>;

    /// Create a new identity
    ///
    /// # Returns
    /// * `Ok(Identity)` - Identity created
    /// * `Err(DomainError::Auth(AuthError::UsernameTaken))` - Username in use
    /// * `Err(DomainError)` - Store unavailable
    async fn register(&self, new_identity: NewIdentity) -> Result<Identity, DomainError>;
}

#[async_trait]
impl<S: IdentityStore + ?Sized> IdentityStore for Arc<S> {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, DomainError> {
        (**self).verify_credentials(username, password).await
    }

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, DomainError> {
        (**self).find_by_id(id).await
    }

    async fn register(&self, new_identity: NewIdentity) -> Result<Identity, DomainError> {
        (**self).register(new_identity).await
    }
}
