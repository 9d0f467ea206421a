use crate::errors::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A two-byte value drawn from the supply and compared against a guess
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct LuckyPair(pub u16);

impl LuckyPair {
    /// Build a pair from two little-endian bytes, as players submit them
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }
}

impl fmt::Display for LuckyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// A validated bet, ready to run against the game stores.
///
/// A zero wager is only legal once the caller has consumed a bonus credit
/// for `player_id`; the processor itself never checks eligibility.
#[derive(Debug, Clone, PartialEq)]
pub struct BetCommand {
    player_id: String,
    wager: f64,
    guess: LuckyPair,
}

impl BetCommand {
    /// Create a bet, rejecting an empty player id or a negative or non-finite wager
    pub fn new(player_id: impl Into<String>, wager: f64, guess: LuckyPair) -> Result<Self, GameError> {
        let player_id = player_id.into();
        if player_id.trim().is_empty() {
            return Err(GameError::InvalidPlayerId);
        }
        if !wager.is_finite() || wager < 0.0 {
            return Err(GameError::InvalidWager(wager));
        }

        Ok(Self {
            player_id,
            wager,
            guess,
        })
    }

    /// Player placing the bet
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Amount added to the jackpot before the draw
    pub fn wager(&self) -> f64 {
        self.wager
    }

    /// Pair the player expects to be drawn
    pub fn guess(&self) -> LuckyPair {
        self.guess
    }

    /// True when this bet is played on a bonus credit
    pub fn is_free_play(&self) -> bool {
        self.wager == 0.0
    }
}

/// Why a bonus credit was granted instead of a cash result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BonusReason {
    /// The supply had nothing to draw
    EmptyDraw,
    /// The guess matched but another winner drained the pot first
    EmptyJackpot,
}

impl fmt::Display for BonusReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusReason::EmptyDraw => write!(f, "empty-draw"),
            BonusReason::EmptyJackpot => write!(f, "empty-jackpot"),
        }
    }
}

/// Result of processing exactly one bet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BetOutcome {
    /// The guess matched and the whole pot was paid out
    Win { amount: f64 },
    NoWin,
    /// A free replay was owed instead of a cash result
    BonusGranted { reason: BonusReason },
}

impl BetOutcome {
    /// True for a cash payout
    pub fn is_win(&self) -> bool {
        matches!(self, BetOutcome::Win { .. })
    }

    /// True when a bonus credit was granted
    pub fn is_bonus(&self) -> bool {
        matches!(self, BetOutcome::BonusGranted { .. })
    }

    /// Cash paid out by this outcome (zero unless it is a win)
    pub fn payout(&self) -> f64 {
        match self {
            BetOutcome::Win { amount } => *amount,
            _ => 0.0,
        }
    }
}
