//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use serde_json::{json, Value};

use ks_api::AppState;
use ks_core::repositories::InMemoryRevocationLedger;
use ks_core::services::{AuthService, SigningKeys, TokenService, TokenServiceConfig};
use ks_infra::InMemoryIdentityStore;

pub type TestState = AppState<InMemoryRevocationLedger, InMemoryIdentityStore>;

pub const TEST_SECRET: &[u8] = b"http-test-secret-with-enough-entropy";
pub const JSON_LIMIT: usize = 16 * 1024;

/// Fresh state with empty in-memory stores and the cheapest bcrypt cost
pub fn test_state() -> web::Data<TestState> {
    test_state_with(TokenServiceConfig::default())
}

pub fn test_state_with(config: TokenServiceConfig) -> web::Data<TestState> {
    test_state_with_keys(SigningKeys::hs256(TEST_SECRET).unwrap(), config)
}

pub fn test_state_with_keys(keys: SigningKeys, config: TokenServiceConfig) -> web::Data<TestState> {
    let ledger = Arc::new(InMemoryRevocationLedger::new());
    let identities = Arc::new(InMemoryIdentityStore::new(4).unwrap());
    let tokens = Arc::new(TokenService::new(ledger, identities.clone(), keys, config));

    web::Data::new(AppState::new(Arc::new(AuthService::new(identities, tokens))))
}

pub fn credentials(username: &str, password: &str) -> Value {
    json!({ "username": username, "password": password })
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
