//! bcrypt helpers run on the blocking thread pool

use ks_core::errors::DomainError;

use crate::InfrastructureError;

/// Hash a password at the given cost
pub async fn hash_password(password: String, cost: u32) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| InfrastructureError::Hashing(e).into())
}

/// Check a password against a stored hash
///
/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: String, hash: String) -> Result<bool, DomainError> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?;

    Ok(verified.unwrap_or(false))
}

/// A throwaway hash verified against when the username is unknown, so that
/// lookups of missing and existing users cost the same
pub fn dummy_hash(cost: u32) -> Result<String, InfrastructureError> {
    Ok(bcrypt::hash("keystone-timing-equalizer", cost)?)
}
