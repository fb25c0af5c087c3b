//! Identity entities owned by the identity store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the identity store
pub type IdentityId = u64;

/// An authenticated principal as seen by the token service
///
/// Password material never appears here; the identity store only reports
/// whether a credential check succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier
    pub id: IdentityId,

    /// Login name
    pub username: String,
}

impl Identity {
    pub fn new(id: IdentityId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// Registration request handed to the identity store
#[derive(Clone, Deserialize)]
pub struct NewIdentity {
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub phone_number: Option<String>,
}

impl NewIdentity {
    /// Registration with only the required fields
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
            birth_date: None,
            phone_number: None,
        }
    }
}

impl std::fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewIdentity")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("birth_date", &self.birth_date)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_identity_debug_redacts_password() {
        let new = NewIdentity::new("alice", "hunter2");
        let rendered = format!("{:?}", new);

        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
