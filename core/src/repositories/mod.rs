pub mod identity;
pub mod ledger;

pub use identity::IdentityStore;
pub use ledger::{InMemoryRevocationLedger, RevocationLedger};

#[cfg(test)]
pub use identity::MockIdentityStore;
