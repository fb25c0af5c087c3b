//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access/refresh pair issuance and stateless verification
//! - One-time-use refresh token rotation against the revocation ledger
//! - Logout revocation
//! - HS256 and RS256 signing keys
//! - Background cleanup of expired ledger entries

mod cleanup;
mod codec;
mod config;
mod keys;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, LedgerCleanupConfig, LedgerCleanupService};
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use keys::SigningKeys;
pub use service::TokenService;
