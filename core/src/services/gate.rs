//! Request-time bearer token gate
//!
//! The gate is a pure function of the `Authorization` header and the signing
//! keys. It never touches the revocation ledger, so an access token stays
//! honored until its own expiry even after logout.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::identity::IdentityId;
use crate::domain::entities::token::TokenKind;
use crate::errors::VerificationError;
use crate::services::token::TokenCodec;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity attached to a request that passed the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub subject: IdentityId,
    pub token_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Why the gate turned a request away
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateRejection {
    #[error("Missing or malformed Authorization header")]
    MissingCredentials,

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl GateRejection {
    /// Stable label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing_credentials",
            Self::Verification(e) => e.kind(),
        }
    }
}

/// Accepts or rejects bearer access tokens
#[derive(Debug, Clone)]
pub struct AuthGate {
    codec: Arc<TokenCodec>,
}

impl AuthGate {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Decide on a raw `Authorization` header value
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<AuthContext, GateRejection> {
        let token = authorization
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(GateRejection::MissingCredentials)?;

        self.authenticate_token(token)
    }

    /// Decide on a bare access token
    pub fn authenticate_token(&self, token: &str) -> Result<AuthContext, GateRejection> {
        let claims = self.codec.verify(token, TokenKind::Access)?;
        let subject = claims.subject().map_err(|_| VerificationError::Malformed)?;

        Ok(AuthContext {
            subject,
            token_id: claims.jti,
            expires_at: claims.expires_at(),
        })
    }
}
