//! # Keystone Core
//!
//! Domain layer for the Keystone token service. This crate contains the token
//! and identity entities, the error taxonomy, the repository interfaces for the
//! revocation ledger and the identity store, and the services built on them:
//! the Token Service (issue, verify, rotate, revoke), the Auth Gate used by the
//! HTTP layer on every protected request, and the ledger cleanup task.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    Identity, IdentityId, NewIdentity, RevocationEntry, TokenClaims, TokenKind, TokenPair,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, VerificationError};
pub use repositories::{InMemoryRevocationLedger, IdentityStore, RevocationLedger};
pub use services::{
    AuthContext, AuthGate, AuthService, GateRejection, LedgerCleanupConfig, LedgerCleanupService,
    SigningKeys, TokenCodec, TokenService, TokenServiceConfig,
};
