//! Periodic removal of expired revocation ledger entries
//!
//! Expired refresh tokens already fail verification, so these entries are
//! dead weight. Sweeping them keeps durable ledgers from growing without bound.

use std::sync::Arc;

use chrono::Utc;
use ks_shared::config::LedgerConfig;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::RevocationLedger;

/// Configuration for ledger cleanup
#[derive(Debug, Clone)]
pub struct LedgerCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for LedgerCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

impl From<&LedgerConfig> for LedgerCleanupConfig {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            interval_seconds: config.cleanup_interval_seconds,
            enabled: config.cleanup_enabled,
        }
    }
}

/// Background sweeper for a revocation ledger
pub struct LedgerCleanupService<L: RevocationLedger + 'static> {
    ledger: Arc<L>,
    config: LedgerCleanupConfig,
}

impl<L: RevocationLedger> LedgerCleanupService<L> {
    pub fn new(ledger: Arc<L>, config: LedgerCleanupConfig) -> Self {
        Self { ledger, config }
    }

    /// Run a single cleanup cycle
    ///
    /// Ledger failures are recorded in the result rather than returned, so a
    /// flaky backend never stops the background loop.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let mut result = CleanupResult::default();

        match self.ledger.delete_expired(Utc::now()).await {
            Ok(count) => {
                result.expired_entries_deleted = count;
                if count > 0 {
                    info!(deleted = count, "Deleted expired ledger entries");
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to clean up expired ledger entries");
                result.errors.push(format!("Ledger cleanup error: {}", e));
            }
        }

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Spawns a tokio task that runs cleanup at regular intervals. Does
    /// nothing when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Ledger cleanup service is disabled");
            return None;
        }

        let period = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "Ledger cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(period);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!(errors = ?result.errors, "Cleanup completed with errors");
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Ledger cleanup cycle failed");
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired ledger entries deleted
    pub expired_entries_deleted: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
