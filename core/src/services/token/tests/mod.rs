//! Tests for the token service


use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::RevocationEntry;
use crate::errors::DomainError;
use crate::repositories::{InMemoryRevocationLedger, MockIdentityStore, RevocationLedger};
use crate::services::token::{SigningKeys, TokenService, TokenServiceConfig};

pub(super) const TEST_SECRET: &[u8] = b"token-service-test-secret";

pub(super) type TestTokenService = TokenService<InMemoryRevocationLedger, MockIdentityStore>;

pub(super) struct Fixture {
    pub service: Arc<TestTokenService>,
    pub ledger: Arc<InMemoryRevocationLedger>,
    pub identities: Arc<MockIdentityStore>,
}

pub(super) async fn fixture() -> Fixture {
    fixture_with(TokenServiceConfig::default()).await
}

pub(super) async fn fixture_with(config: TokenServiceConfig) -> Fixture {
    let ledger = Arc::new(InMemoryRevocationLedger::new());
    let identities = Arc::new(MockIdentityStore::new());
    identities.insert(42, "alice", "alice-password").await;
    identities.insert(7, "bob", "bob-password").await;

    let keys = SigningKeys::hs256(TEST_SECRET).unwrap();
    let service = Arc::new(TokenService::new(
        ledger.clone(),
        identities.clone(),
        keys,
        config,
    ));

    Fixture {
        service,
        ledger,
        identities,
    }
}

pub(super) fn alice() -> Identity {
    Identity::new(42, "alice")
}

pub(super) fn bob() -> Identity {
    Identity::new(7, "bob")
}

/// Ledger whose backing store is permanently down
pub(super) struct FailingLedger;

#[async_trait]
impl RevocationLedger for FailingLedger {
    async fn put(&self, _entry: RevocationEntry) -> Result<(), DomainError> {
        Err(DomainError::internal("ledger offline"))
    }

    async fn get_by_id(&self, _token_id: Uuid) -> Result<Option<RevocationEntry>, DomainError> {
        Err(DomainError::internal("ledger offline"))
    }

    async fn delete_by_id(&self, _token_id: Uuid) -> Result<bool, DomainError> {
        Err(DomainError::internal("ledger offline"))
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Err(DomainError::internal("ledger offline"))
    }
}
