use crate::games::{
    bonus::BonusRegistry,
    draw_supply::DrawSupply,
    jackpot::JackpotAccumulator,
    types::{BetCommand, BetOutcome, BonusReason},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Runs one bet against the shared stores.
///
/// Charging, drawing and redeeming are three separate critical sections on
/// three separate locks; no store lock is ever held while another is taken.
/// A wager charged before a failed draw stays in the pot.
#[derive(Clone)]
pub struct BetProcessor {
    supply: Arc<DrawSupply>,
    jackpot: Arc<JackpotAccumulator>,
    bonus: Arc<BonusRegistry>,
}

impl BetProcessor {
    /// Create a processor over the shared stores
    pub fn new(
        supply: Arc<DrawSupply>,
        jackpot: Arc<JackpotAccumulator>,
        bonus: Arc<BonusRegistry>,
    ) -> Self {
        Self {
            supply,
            jackpot,
            bonus,
        }
    }

    /// Process a validated bet and return its outcome
    pub fn process(&self, command: &BetCommand) -> BetOutcome {
        let player_id = command.player_id();

        // Pay first, even for a free play
        self.jackpot.add(command.wager());

        let drawn = match self.supply.pop() {
            Ok(pair) => pair,
            Err(_) => {
                let credits = self.bonus.grant(player_id);
                info!(
                    player_id,
                    wager = command.wager(),
                    credits,
                    "Draw supply empty; bonus game granted"
                );
                return BetOutcome::BonusGranted {
                    reason: BonusReason::EmptyDraw,
                };
            }
        };

        debug!(
            player_id,
            guess = %command.guess(),
            drawn = %drawn,
            free_play = command.is_free_play(),
            "Pair drawn"
        );

        if drawn != command.guess() {
            return BetOutcome::NoWin;
        }

        let reward = self.jackpot.redeem();
        if reward == 0.0 {
            // Someone else drained the pot between our charge and redeem
            let credits = self.bonus.grant(player_id);
            info!(player_id, credits, "Winning pair but jackpot empty; bonus game granted");
            return BetOutcome::BonusGranted {
                reason: BonusReason::EmptyJackpot,
            };
        }

        info!(player_id, amount = reward, pair = %drawn, "Jackpot won");
        BetOutcome::Win { amount: reward }
    }
}
