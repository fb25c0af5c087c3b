//! Route handlers

pub mod auth;
pub mod health;
pub mod protected;

use std::sync::Arc;

use ks_core::repositories::{IdentityStore, RevocationLedger};
use ks_core::services::AuthService;

/// Shared state handed to every handler
pub struct AppState<L, I>
where
    L: RevocationLedger,
    I: IdentityStore,
{
    pub auth_service: Arc<AuthService<L, I>>,
}

impl<L: RevocationLedger, I: IdentityStore> AppState<L, I> {
    pub fn new(auth_service: Arc<AuthService<L, I>>) -> Self {
        Self { auth_service }
    }
}
