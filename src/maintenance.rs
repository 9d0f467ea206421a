//! Background upkeep of the lucky pair supply
//!
//! Two independent loops run for the life of the process: one evicts the top
//! pair when nobody has drawn for a while, the other refills the supply to
//! capacity on a fixed period. They share nothing except the supply's own
//! lock.

use crate::config::MaintenanceConfig;
use crate::errors::ConfigError;
use crate::games::DrawSupply;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Spawns the stale-draw eviction and periodic resupply loops
pub struct MaintenanceScheduler {
    supply: Arc<DrawSupply>,
    config: MaintenanceConfig,
}

/// Handle to the running maintenance loops.
///
/// Dropping the handle detaches the loops; they keep running.
pub struct MaintenanceHandle {
    shutdown_tx: watch::Sender<bool>,
    eviction: JoinHandle<()>,
    resupply: JoinHandle<()>,
}

impl MaintenanceScheduler {
    /// Create a scheduler for `supply`, rejecting timings the loops cannot run with
    pub fn new(supply: Arc<DrawSupply>, config: MaintenanceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { supply, config })
    }

    /// Spawn both loops on the current tokio runtime.
    ///
    /// Consumes the scheduler; loops are started once and not restarted.
    pub fn start(self) -> MaintenanceHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        info!(
            check_interval_ms = self.config.stale_check_interval_ms,
            stale_threshold_ms = self.config.stale_threshold_ms,
            resupply_interval_ms = self.config.resupply_interval_ms,
            "Starting supply maintenance"
        );

        let eviction = tokio::spawn(run_stale_eviction(
            self.supply.clone(),
            self.config.stale_check_interval(),
            self.config.stale_threshold(),
            shutdown_rx.clone(),
        ));
        let resupply = tokio::spawn(run_resupply(
            self.supply,
            self.config.resupply_interval(),
            shutdown_rx,
        ));

        MaintenanceHandle {
            shutdown_tx,
            eviction,
            resupply,
        }
    }
}

impl MaintenanceHandle {
    /// Stop both loops and wait for them to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let (eviction, resupply) = futures::future::join(self.eviction, self.resupply).await;
        if let Err(e) = eviction {
            tracing::warn!("Stale eviction task ended abnormally: {}", e);
        }
        if let Err(e) = resupply {
            tracing::warn!("Resupply task ended abnormally: {}", e);
        }
        info!("Supply maintenance stopped");
    }

    /// True while either loop is still alive
    pub fn is_running(&self) -> bool {
        !self.eviction.is_finished() || !self.resupply.is_finished()
    }
}

/// Pop one pair whenever the supply has gone `threshold` without a draw
async fn run_stale_eviction(
    supply: Arc<DrawSupply>,
    period: Duration,
    threshold: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    // First check happens one full period after start
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let idle = Instant::now().saturating_duration_since(supply.time_of_last_pop());
                if idle >= threshold {
                    match supply.pop() {
                        Ok(pair) => info!(pair = %pair, idle_ms = idle.as_millis() as u64, "Evicted stale pair"),
                        Err(_) => debug!("Stale check found supply empty"),
                    }
                }
            }
            Ok(()) = shutdown.changed() => break,
        }
    }
}

/// Refill the supply to capacity every `period`
async fn run_resupply(supply: Arc<DrawSupply>, period: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let added = supply.fill_up();
                info!(added, len = supply.len(), "Refilled draw supply");
            }
            Ok(()) = shutdown.changed() => break,
        }
    }
}
