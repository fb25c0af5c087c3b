//! Error types for token verification, token lifecycle and authentication
//!
//! These carry the precise failure kind for operator logs. The HTTP layer
//! collapses them into a generic unauthorized signal so that callers cannot
//! tell an expired token from a revoked or forged one.

use thiserror::Error;

use crate::domain::entities::token::TokenKind;

/// Failures of the stateless signature and claims check
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token signature verification failed")]
    SignatureInvalid,

    #[error("Token expired")]
    Expired,

    #[error("Wrong token kind: expected {expected}, got {actual}")]
    WrongKind { expected: TokenKind, actual: TokenKind },
}

impl VerificationError {
    /// Stable label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::SignatureInvalid => "signature_invalid",
            Self::Expired => "expired",
            Self::WrongKind { .. } => "wrong_kind",
        }
    }
}

/// Failures of issuance, rotation and revocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    Invalid(#[from] VerificationError),

    #[error("Token revoked")]
    Revoked,

    #[error("Identity lookup failed: {message}")]
    IdentityLookupFailed { message: String },

    #[error("Token signing failed: {message}")]
    SigningError { message: String },

    #[error("Revocation ledger unavailable: {message}")]
    LedgerUnavailable { message: String },

    #[error("Token not found")]
    NotFound,
}

impl TokenError {
    /// Stable label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Invalid(inner) => inner.kind(),
            Self::Revoked => "revoked",
            Self::IdentityLookupFailed { .. } => "identity_lookup_failed",
            Self::SigningError { .. } => "signing_error",
            Self::LedgerUnavailable { .. } => "ledger_unavailable",
            Self::NotFound => "not_found",
        }
    }

    /// Whether the caller may reasonably retry the same request later
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::IdentityLookupFailed { .. } | Self::LedgerUnavailable { .. }
        )
    }
}

/// Credential and registration failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username and wrong password are deliberately the same variant
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already taken: {username}")]
    UsernameTaken { username: String },

    #[error("Identity store unavailable: {message}")]
    IdentityStoreUnavailable { message: String },
}

impl AuthError {
    /// Stable label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::UsernameTaken { .. } => "username_taken",
            Self::IdentityStoreUnavailable { .. } => "identity_store_unavailable",
        }
    }
}
