//! Revocation ledger adapters
//!
//! The in-memory ledger lives in `ks_core`; this module adds the persistent
//! backends and the dispatcher that picks one from configuration.

pub mod backend;
pub mod mysql;
pub mod redis;

pub use backend::LedgerBackend;
pub use mysql::MySqlRevocationLedger;
pub use redis::RedisRevocationLedger;
