//! In-memory revocation ledger

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RevocationEntry;
use crate::errors::DomainError;

use super::r#trait::RevocationLedger;

/// Process-local ledger backed by a map behind an async `RwLock`
///
/// Removal happens under the write lock, which makes `delete_by_id` the
/// compare-and-delete the token service needs. Entries do not survive a
/// restart, so every outstanding refresh token is invalidated with the process.
#[derive(Debug, Default)]
pub struct InMemoryRevocationLedger {
    entries: RwLock<HashMap<Uuid, RevocationEntry>>,
}

impl InMemoryRevocationLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationLedger for InMemoryRevocationLedger {
    async fn put(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;

        if entries.contains_key(&entry.token_id) {
            return Err(DomainError::Validation {
                message: format!("Ledger entry {} already exists", entry.token_id),
            });
        }

        entries.insert(entry.token_id, entry);
        Ok(())
    }

    async fn get_by_id(&self, token_id: Uuid) -> Result<Option<RevocationEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.get(&token_id).cloned())
    }

    async fn delete_by_id(&self, token_id: Uuid) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(&token_id).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let initial_count = entries.len();

        entries.retain(|_, entry| !entry.is_expired_at(now));

        Ok(initial_count - entries.len())
    }
}
