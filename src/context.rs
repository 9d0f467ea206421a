//! Process-wide game state
//!
//! `GameContext` is built once at startup and owns the three shared stores.
//! Handlers, the bet processor and the maintenance loops all receive handles
//! from it instead of reaching for global state.

use crate::{
    config::{LuckyPairConfig, MaintenanceConfig},
    errors::{GameError, LuckyPairError, LuckyPairResult},
    games::{BetCommand, BetOutcome, BetProcessor, BonusRegistry, DrawSupply, JackpotAccumulator},
    maintenance::{MaintenanceHandle, MaintenanceScheduler},
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tracing::{info, warn};

/// Owner of the draw supply, jackpot and bonus ledger
pub struct GameContext {
    supply: Arc<DrawSupply>,
    jackpot: Arc<JackpotAccumulator>,
    bonus: Arc<BonusRegistry>,
    processor: BetProcessor,
    maintenance_config: MaintenanceConfig,
    maintenance_started: AtomicBool,
}

impl GameContext {
    /// Build the stores from configuration and fill the supply
    pub fn new(config: &LuckyPairConfig) -> Self {
        let supply = Arc::new(DrawSupply::new(config.game.supply_capacity));
        let filled = supply.fill_up();
        info!(filled, capacity = supply.capacity(), "Draw supply initialized");

        Self::from_parts(
            supply,
            Arc::new(JackpotAccumulator::new()),
            Arc::new(BonusRegistry::new()),
            config.maintenance.clone(),
        )
    }

    /// Assemble a context around existing stores, used as-is
    pub fn from_parts(
        supply: Arc<DrawSupply>,
        jackpot: Arc<JackpotAccumulator>,
        bonus: Arc<BonusRegistry>,
        maintenance_config: MaintenanceConfig,
    ) -> Self {
        let processor = BetProcessor::new(supply.clone(), jackpot.clone(), bonus.clone());
        Self {
            supply,
            jackpot,
            bonus,
            processor,
            maintenance_config,
            maintenance_started: AtomicBool::new(false),
        }
    }

    /// Run one bet. Zero-wager bets must be preceded by `consume_bonus`.
    pub fn process_bet(&self, command: &BetCommand) -> BetOutcome {
        self.processor.process(command)
    }

    /// Spend one of the player's bonus credits
    pub fn consume_bonus(&self, player_id: &str) -> Result<u32, GameError> {
        self.bonus.consume(player_id)
    }

    /// Start the eviction and resupply loops. Only the first successful call
    /// starts them; invalid timings leave maintenance unstarted.
    pub fn start_maintenance(&self) -> LuckyPairResult<MaintenanceHandle> {
        let scheduler = MaintenanceScheduler::new(self.supply.clone(), self.maintenance_config.clone())?;

        if self.maintenance_started.swap(true, Ordering::SeqCst) {
            warn!("Maintenance start requested twice; ignoring");
            return Err(LuckyPairError::MaintenanceAlreadyStarted);
        }

        Ok(scheduler.start())
    }

    /// Shared draw supply

    pub fn supply(&self) -> &Arc<DrawSupply> {
        &self.supply
    }

    /// Shared jackpot
    pub fn jackpot(&self) -> &Arc<JackpotAccumulator> {
        &self.jackpot
    }

    /// Shared bonus ledger
    pub fn bonus(&self) -> &Arc<BonusRegistry> {
        &self.bonus
    }
}
