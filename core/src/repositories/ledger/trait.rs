//! Revocation ledger trait: the durable record of live refresh tokens.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RevocationEntry;
use crate::errors::DomainError;

/// Storage contract for refresh-token liveness
///
/// One entry exists per issued, unredeemed refresh token. The ledger is the
/// only source of truth for refresh-token liveness: a correctly signed refresh
/// token whose entry is absent is not valid.
///
/// # Atomicity
/// `delete_by_id` must be an atomic compare-and-delete. When several callers
/// race to delete the same identifier, exactly one of them observes `true`.
/// Rotation relies on this to guarantee one-time use.
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Insert the entry for a newly issued refresh token
    ///
    /// # Returns
    /// * `Ok(())` - Entry stored
    /// * `Err(DomainError)` - Storage failure or identifier already present
    async fn put(&self, entry: RevocationEntry) -> Result<(), DomainError>;

    /// Look up the entry for a refresh-token identifier
    ///
    /// # Returns
    /// * `Ok(Some(RevocationEntry))` - Token is live
    /// * `Ok(None)` - Token was redeemed, revoked, or never issued
    /// * `Err(DomainError)` - Storage failure
    async fn get_by_id(&self, token_id: Uuid) -> Result<Option<RevocationEntry>, DomainError>;

    /// Remove the entry for a refresh-token identifier
    ///
    /// # Returns
    /// * `Ok(true)` - This call removed the entry
    /// * `Ok(false)` - No entry existed (or a concurrent caller removed it first)
    /// * `Err(DomainError)` - Storage failure
    async fn delete_by_id(&self, token_id: Uuid) -> Result<bool, DomainError>;

    /// Remove every entry whose refresh token expired before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    /// * `Err(DomainError)` - Storage failure
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Check whether a refresh-token identifier is live
    async fn contains(&self, token_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.get_by_id(token_id).await?.is_some())
    }
}

#[async_trait]
impl<L: RevocationLedger + ?Sized> RevocationLedger for Arc<L> {
    async fn put(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        (**self).put(entry).await
    }

    async fn get_by_id(&self, token_id: Uuid) -> Result<Option<RevocationEntry>, DomainError> {
        (**self).get_by_id(token_id).await
    }

    async fn delete_by_id(&self, token_id: Uuid) -> Result<bool, DomainError> {
        (**self).delete_by_id(token_id).await
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        (**self).delete_expired(now).await
    }
}
