//! Unit tests for the in-memory revocation ledger

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RevocationEntry;
use crate::errors::DomainError;
use crate::repositories::ledger::{InMemoryRevocationLedger, RevocationLedger};

fn entry_for(subject: u64, ttl: Duration) -> RevocationEntry {
    RevocationEntry::new(Uuid::new_v4(), subject, Utc::now() + ttl)
}

#[tokio::test]
async fn test_put_and_get_by_id() {
    let ledger = InMemoryRevocationLedger::new();
    let entry = entry_for(42, Duration::days(7));

    ledger.put(entry.clone()).await.unwrap();

    let found = ledger.get_by_id(entry.token_id).await.unwrap();
    assert_eq!(found, Some(entry.clone()));
    assert!(ledger.contains(entry.token_id).await.unwrap());
    assert!(!ledger.contains(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_put_rejected() {
    let ledger = InMemoryRevocationLedger::new();
    let entry = entry_for(1, Duration::days(7));

    ledger.put(entry.clone()).await.unwrap();
    let result = ledger.put(entry).await;

    assert!(matches!(result, Err(DomainError::Validation { .. })));
    assert_eq!(ledger.len().await, 1);
}

#[tokio::test]
async fn test_delete_by_id_reports_whether_it_removed() {
    let ledger = InMemoryRevocationLedger::new();
    let entry = entry_for(7, Duration::days(7));
    ledger.put(entry.clone()).await.unwrap();

    assert!(ledger.delete_by_id(entry.token_id).await.unwrap());
    assert!(!ledger.delete_by_id(entry.token_id).await.unwrap());
    assert!(ledger.get_by_id(entry.token_id).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_delete_has_single_winner() {
    let ledger = Arc::new(InMemoryRevocationLedger::new());
    let entry = entry_for(9, Duration::days(7));
    ledger.put(entry.clone()).await.unwrap();

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let ledger = ledger.clone();
            let token_id = entry.token_id;
            tokio::spawn(async move { ledger.delete_by_id(token_id).await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
    assert!(ledger.is_empty().await);
}

#[tokio::test]
async fn test_delete_expired_keeps_live_entries() {
    let ledger = InMemoryRevocationLedger::new();
    let live = entry_for(1, Duration::days(1));
    let stale_a = entry_for(2, Duration::seconds(-10));
    let stale_b = entry_for(3, Duration::hours(-1));

    ledger.put(live.clone()).await.unwrap();
    ledger.put(stale_a).await.unwrap();
    ledger.put(stale_b).await.unwrap();

    let removed = ledger.delete_expired(Utc::now()).await.unwrap();

    assert_eq!(removed, 2);
    assert_eq!(ledger.len().await, 1);
    assert!(ledger.contains(live.token_id).await.unwrap());
}

#[tokio::test]
async fn test_arc_ledger_delegates() {
    let ledger = Arc::new(InMemoryRevocationLedger::new());
    let entry = entry_for(5, Duration::minutes(5));

    RevocationLedger::put(&ledger, entry.clone()).await.unwrap();

    assert!(RevocationLedger::delete_by_id(&ledger, entry.token_id).await.unwrap());
    assert!(ledger.is_empty().await);
}
