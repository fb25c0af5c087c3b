//! Redis implementation of the RevocationLedger trait.
//!
//! Each entry is a key `<prefix>:<token_id>` holding the subject, created with
//! `SET NX EXAT` so Redis itself drops it at the refresh token's expiry. The
//! integer reply of `DEL` is the atomic compare-and-delete outcome.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use ks_core::domain::entities::token::RevocationEntry;
use ks_core::errors::DomainError;
use ks_core::repositories::RevocationLedger;

use crate::cache::RedisClient;

/// Redis-backed revocation ledger
pub struct RedisRevocationLedger {
    client: RedisClient,
    key_prefix: String,
}

impl RedisRevocationLedger {
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    fn key(&self, token_id: Uuid) -> String {
        format!("{}:{}", self.key_prefix, token_id)
    }
}

/// Stored value: `<subject>:<expires_at unix seconds>`
fn encode_value(entry: &RevocationEntry) -> String {
    format!("{}:{}", entry.subject, entry.expires_at.timestamp())
}

fn decode_value(token_id: Uuid, value: &str) -> Result<RevocationEntry, DomainError> {
    let malformed = || DomainError::Internal {
        message: format!("Malformed ledger value for {}", token_id),
    };

    let (subject, expires_at) = value.split_once(':').ok_or_else(malformed)?;
    let subject = subject.parse().map_err(|_| malformed())?;
    let expires_at = expires_at
        .parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .ok_or_else(malformed)?;

    Ok(RevocationEntry::new(token_id, subject, expires_at))
}

#[async_trait]
impl RevocationLedger for RedisRevocationLedger {
    async fn put(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        let created = self
            .client
            .set_nx_expire_at(
                &self.key(entry.token_id),
                &encode_value(&entry),
                entry.expires_at.timestamp(),
            )
            .await?;

        if !created {
            return Err(DomainError::Validation {
                message: format!("Ledger entry {} already exists", entry.token_id),
            });
        }
        Ok(())
    }

    async fn get_by_id(&self, token_id: Uuid) -> Result<Option<RevocationEntry>, DomainError> {
        self.client
            .get(&self.key(token_id))
            .await?
            .map(|value| decode_value(token_id, &value))
            .transpose()
    }

    async fn delete_by_id(&self, token_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.client.delete(&self.key(token_id)).await?)
    }

    /// Keys carry their own expiry, so there is never anything to sweep
    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Ok(0)
    }
}
