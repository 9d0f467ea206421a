pub mod types;
pub mod draw_supply;
pub mod jackpot;
pub mod bonus;
pub mod processor;

pub use types::*;
pub use draw_supply::{DrawSupply, DEFAULT_SUPPLY_CAPACITY};
pub use jackpot::JackpotAccumulator;
pub use bonus::BonusRegistry;
pub use processor::BetProcessor;
