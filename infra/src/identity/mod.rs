//! Identity store adapters
//!
//! Passwords are hashed with bcrypt on the blocking thread pool. Lookups of
//! unknown usernames still perform a verification against a throwaway hash.

pub mod backend;
mod hashing;
pub mod memory;
pub mod mysql;

pub use backend::IdentityBackend;
pub use memory::InMemoryIdentityStore;
pub use mysql::MySqlIdentityStore;
