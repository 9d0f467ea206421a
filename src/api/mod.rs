//! Lucky Pair HTTP API
//!
//! The request-facing caller of the game core: parses and validates bets,
//! enforces bonus eligibility for zero-wager plays, and renders outcomes.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use server::ApiServer;
