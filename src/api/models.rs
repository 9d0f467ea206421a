//! API Data Models
//!
//! Request and response bodies for the bet endpoints.

use crate::{
    errors::GameError,
    games::{BetCommand, BetOutcome, BonusReason, LuckyPair},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/bets`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceBetRequest {
    /// Player identifier
    pub id: String,
    /// Wager; zero or absent means a bonus game
    #[serde(default)]
    pub amount: f64,
    /// The guessed pair as two bytes, little-endian
    pub bet: Vec<u8>,
}

impl PlaceBetRequest {
    /// Check field constraints and extract the guessed pair
    pub fn validate(&self) -> Result<LuckyPair, String> {
        if self.id.trim().is_empty() {
            return Err("id is required".to_string());
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(format!("amount must be a non-negative number, got {}", self.amount));
        }
        match self.bet.as_slice() {
            [lo, hi] => Ok(LuckyPair::from_bytes([*lo, *hi])),
            other => Err(format!("bet must contain exactly 2 bytes, got {}", other.len())),
        }
    }

    /// True when the player wants to spend a bonus credit
    pub fn is_bonus_game(&self) -> bool {
        self.amount <= 0.0
    }

    pub fn into_command(self, guess: LuckyPair) -> Result<BetCommand, GameError> {
        BetCommand::new(self.id, self.amount.max(0.0), guess)
    }
}

/// Rendered result of a processed bet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BetResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jackpot: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
}

impl From<BetOutcome> for BetResponse {
    fn from(outcome: BetOutcome) -> Self {
        match outcome {
            BetOutcome::Win { amount } => Self {
                status: "WIN".to_string(),
                jackpot: Some(amount),
                error: None,
                message: "Well done! Congrats on your win!!!".to_string(),
            },
            BetOutcome::NoWin => Self {
                status: "NO_WIN".to_string(),
                jackpot: None,
                error: None,
                message: "Unlucky. Try again next time".to_string(),
            },
            BetOutcome::BonusGranted {
                reason: BonusReason::EmptyJackpot,
            } => Self {
                status: "BONUS_GAME".to_string(),
                jackpot: None,
                error: None,
                message: "Jackpot empty; bonus game assigned to the player; try again with empty game fee field"
                    .to_string(),
            },
            BetOutcome::BonusGranted {
                reason: BonusReason::EmptyDraw,
            } => Self {
                status: "ERR".to_string(),
                jackpot: None,
                error: Some(GameError::SupplyEmpty.to_string()),
                message: "Bonus game assigned to the player; try again with empty game fee field".to_string(),
            },
        }
    }
}

/// Diagnostic snapshot of the shared stores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStatusResponse {
    pub jackpot: f64,
    pub supply_len: usize,
    pub supply_capacity: usize,
    pub outstanding_bonus_games: u64,
    pub observed_at: DateTime<Utc>,
}

/// Remaining bonus credits of one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusBalanceResponse {
    pub id: String,
    pub bonus_games: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str, amount: f64, bet: Vec<u8>) -> PlaceBetRequest {
        PlaceBetRequest {
            id: id.to_string(),
            amount,
            bet,
        }
    }

    #[test]
    fn test_request_validation() {
        assert_eq!(request("p1", 1.0, vec![0x34, 0x12]).validate(), Ok(LuckyPair(0x1234)));
        assert!(request("", 1.0, vec![1, 2]).validate().is_err());
        assert!(request("p1", -0.5, vec![1, 2]).validate().is_err());
        assert!(request("p1", 1.0, vec![1]).validate().is_err());
        assert!(request("p1", 1.0, vec![1, 2, 3]).validate().is_err());
    }

    #[test]
    fn test_amount_defaults_to_bonus_game() {
        let parsed: PlaceBetRequest = serde_json::from_str(r#"{"id":"p1","bet":[1,2]}"#).unwrap();
        assert_eq!(parsed.amount, 0.0);
        assert!(parsed.is_bonus_game());
    }

    #[test]
    fn test_out_of_range_byte_rejected_by_serde() {
        let parsed = serde_json::from_str::<PlaceBetRequest>(r#"{"id":"p1","amount":1,"bet":[1,256]}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_response_rendering() {
        let win = BetResponse::from(BetOutcome::Win { amount: 12.0 });
        assert_eq!(win.status, "WIN");
        assert_eq!(win.jackpot, Some(12.0));

        let empty = BetResponse::from(BetOutcome::BonusGranted {
            reason: BonusReason::EmptyDraw,
        });
        assert_eq!(empty.status, "ERR");
        assert_eq!(empty.error.as_deref(), Some("draw supply is empty"));

        let json = serde_json::to_value(BetResponse::from(BetOutcome::NoWin)).unwrap();
        assert!(json.get("jackpot").is_none());
        assert_eq!(json["status"], "NO_WIN");
    }
}
