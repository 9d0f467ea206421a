//! Route Definitions

use super::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/bets", post(place_bet_handler))
        .route("/api/v1/jackpot", get(game_status_handler))
        .route("/api/v1/bonus/:player_id", get(bonus_balance_handler))
        .with_state(state)
}
