//! Background sweeper for the revocation registry
//!
//! The registry already drops dead entries whenever something is revoked;
//! this task keeps it small during quiet periods with no logouts.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::services::clock::Clock;

use super::revocation::RevocationRegistry;

/// Configuration for the revocation sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to run the background task at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

/// Periodically removes expired revocation entries
pub struct RevocationSweeper {
    registry: Arc<RevocationRegistry>,
    clock: Arc<dyn Clock>,
    config: SweeperConfig,
}

impl RevocationSweeper {
    pub fn new(registry: Arc<RevocationRegistry>, clock: Arc<dyn Clock>, config: SweeperConfig) -> Self {
        Self {
            registry,
            clock,
            config,
        }
    }

    /// Run a single sweep cycle
    pub async fn run_sweep(&self) -> SweepResult {
        if !self.config.enabled {
            return SweepResult::default();
        }

        let removed = self.registry.sweep(self.clock.now()).await;
        let remaining = self.registry.len().await;

        debug!(removed, remaining, "Revocation sweep completed");

        SweepResult { removed, remaining }
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when the sweeper is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Revocation sweeper is disabled");
            return None;
        }

        // tokio panics on a zero period
        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Revocation sweeper started - will run every {} seconds",
                interval.as_secs()
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                self.run_sweep().await;
            }
        }))
    }
}

/// Result of a sweep cycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepResult {
    /// Entries removed because their token had expired
    pub removed: usize,
    /// Entries still live after the sweep
    pub remaining: usize,
}
