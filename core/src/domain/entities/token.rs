//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::IdentityId;

/// Which half of a token pair a signed token is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential presented on every protected call
    Access,
    /// One-time-use credential exchanged for a new pair
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
///
/// Registered claim names are used for the standard fields so the token stays
/// readable by generic JWT tooling; `kind` is the only private claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (identity ID)
    pub sub: String,

    /// Access or refresh
    pub kind: TokenKind,

    /// JWT ID, unique per issued token
    pub jti: Uuid,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl TokenClaims {
    /// Creates claims for a fresh token with a new random identifier
    ///
    /// # Arguments
    ///
    /// * `subject` - The identity the token is issued to
    /// * `kind` - Access or refresh
    /// * `issued_at` - Issuance instant; sub-second precision is dropped
    /// * `ttl` - Lifetime of the token, must be positive
    /// * `issuer` / `audience` - Values for the `iss` and `aud` claims
    pub fn new(
        subject: IdentityId,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let iat = issued_at.timestamp();
        // Saturates at the far future rather than wrapping
        let exp = iat.checked_add(ttl.num_seconds()).unwrap_or(i64::MAX);
        Self {
            sub: subject.to_string(),
            kind,
            jti: Uuid::new_v4(),
            iat,
            exp,
            iss: issuer.to_string(),
            aud: audience.to_string(),
        }
    }

    /// Gets the identity ID from the claims
    pub fn subject(&self) -> Result<IdentityId, std::num::ParseIntError> {
        self.sub.parse()
    }

    /// Issuance instant
    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.iat)
    }

    /// Expiry instant
    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }

    /// A token is still valid at the exact second of `exp`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// `jti` of the access token
    pub access_token_id: Uuid,

    /// `jti` of the refresh token; key of its ledger entry
    pub refresh_token_id: Uuid,

    /// Access token expiry
    pub access_expires_at: DateTime<Utc>,

    /// Refresh token expiry
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Assembles a pair from the two signed tokens and their claims
    pub fn new(
        access_token: String,
        access_claims: &TokenClaims,
        refresh_token: String,
        refresh_claims: &TokenClaims,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_token_id: access_claims.jti,
            refresh_token_id: refresh_claims.jti,
            access_expires_at: access_claims.expires_at(),
            refresh_expires_at: refresh_claims.expires_at(),
        }
    }
}

/// Liveness record for one issued, unredeemed refresh token
///
/// Created at issuance and deleted on redemption or logout; never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    /// `jti` of the refresh token
    pub token_id: Uuid,

    /// Identity the refresh token was issued to
    pub subject: IdentityId,

    /// Refresh token expiry
    pub expires_at: DateTime<Utc>,
}

impl RevocationEntry {
    /// Creates a new ledger entry
    pub fn new(token_id: Uuid, subject: IdentityId, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_id,
            subject,
            expires_at,
        }
    }

    /// Builds the entry for freshly issued refresh claims
    pub fn for_refresh_claims(claims: &TokenClaims, subject: IdentityId) -> Self {
        Self::new(claims.jti, subject, claims.expires_at())
    }

    /// Checks if the entry is past its refresh token's expiry
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

fn timestamp_to_datetime(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
