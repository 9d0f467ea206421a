//! Error types for the luckypair game service
//!
//! `GameError` covers the modeled outcomes of the game stores and the input
//! checks done while building a bet. `LuckyPairError` is the root error for
//! startup, configuration and serving.

use thiserror::Error;

/// Errors produced by the game stores and bet construction.
///
/// Empty supply, full supply and missing bonus credits are expected results,
/// not faults; callers are required to handle them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("draw supply is empty")]
    SupplyEmpty,

    #[error("draw supply is full (capacity {capacity})")]
    SupplyFull { capacity: usize },

    /// Carries the player id for logs; the message stays generic
    #[error("No bonus games for this player")]
    NoBonusAvailable(String),

    #[error("Invalid wager: {0} (must be finite and >= 0)")]
    InvalidWager(f64),

    #[error("Player id must not be empty")]
    InvalidPlayerId,
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Root error type for service operations
#[derive(Debug, Error)]
pub enum LuckyPairError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Maintenance tasks already started")]
    MaintenanceAlreadyStarted,

    #[error("Server error: {0}")]
    Server(String),
}

/// Convenience type alias for Results
pub type LuckyPairResult<T> = Result<T, LuckyPairError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LuckyPairError::from(ConfigError::invalid("game.supply_capacity", "must be > 0"));
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("game.supply_capacity"));
    }

    #[test]
    fn test_game_error_details() {
        assert_eq!(GameError::SupplyEmpty.to_string(), "draw supply is empty");
        assert!(GameError::SupplyFull { capacity: 100 }.to_string().contains("100"));
        assert_eq!(
            GameError::NoBonusAvailable("p1".into()).to_string(),
            "No bonus games for this player"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: LuckyPairError = GameError::SupplyEmpty.into();
        match err {
            LuckyPairError::Game(GameError::SupplyEmpty) => {}
            _ => panic!("Expected game error"),
        }
    }
}
