//! Authentication service module
//!
//! Ties the identity store to the token service:
//! - Registration
//! - Username/password login issuing a token pair
//! - Refresh token rotation
//! - Logout

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
