//! Lucky Pair - in-memory jackpot lottery service
//!
//! Players guess a two-byte "lucky pair" against a randomly filled supply.
//! Every wager feeds a shared jackpot that is paid out whole on a match.
//! Players who find the supply empty, or who match after someone else has
//! already drained the pot, are owed a free replay instead.
//!
//! The three shared stores (draw supply, jackpot, bonus ledger) are locked
//! independently. A bet touches them in sequence and never holds two locks
//! at once. There is no atomicity across stores.

pub mod api;
pub mod config;
pub mod context;
pub mod errors;
pub mod games;
pub mod maintenance;

pub use config::{ConfigLoader, LuckyPairConfig};
pub use context::GameContext;
pub use errors::{GameError, LuckyPairError, LuckyPairResult};
pub use games::{BetCommand, BetOutcome, BonusReason, LuckyPair};
pub use maintenance::{MaintenanceHandle, MaintenanceScheduler};
