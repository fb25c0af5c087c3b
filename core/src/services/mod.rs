//! Business services containing domain logic and use cases.

pub mod auth;
pub mod gate;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use gate::{AuthContext, AuthGate, GateRejection};
pub use token::{
    CleanupResult, LedgerCleanupConfig, LedgerCleanupService, SigningKeys, TokenCodec,
    TokenService, TokenServiceConfig,
};
