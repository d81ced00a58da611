//! Periodic sweep service reclaiming expired revocation records.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::errors::RevocationResult;
use crate::store::RevocationStore;

use super::revocation_cache::RevocationCache;

/// Configuration for the sweep service.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// How often to run a sweep cycle, in seconds.
    pub interval_seconds: u64,
    /// Whether to run sweeps at all.
    pub enabled: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

/// Schedules [`RevocationCache::sweep_expired`] cycles.
///
/// The cache's sweep remains the sole reclamation primitive; this service
/// only invokes it on an interval. Sweeps run concurrently with normal
/// traffic and never pause it.
pub struct SweepService<S: RevocationStore + 'static> {
    cache: RevocationCache<S>,
    config: SweepConfig,
}

impl<S: RevocationStore> SweepService<S> {
    pub fn new(cache: RevocationCache<S>, config: SweepConfig) -> Self {
        Self { cache, config }
    }

    /// Run a single sweep cycle and return the number of records reclaimed.
    pub async fn run_sweep(&self) -> RevocationResult<usize> {
        if !self.config.enabled {
            return Ok(0);
        }

        let deleted = self.cache.sweep_expired().await?;
        info!(deleted, "sweep cycle completed");
        Ok(deleted)
    }

    /// Spawn a background task running sweep cycles at the configured
    /// interval.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("sweep service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "sweep service started, running every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_sweep().await {
                    error!("sweep cycle failed: {}", e);
                }
            }
        });
    }
}
