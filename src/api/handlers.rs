//! Request Handlers
//!
//! Validate incoming bets, settle the bonus precondition, and render outcomes.

use super::{
    errors::ApiError,
    middleware::RequestId,
    models::*,
};
use crate::{
    context::GameContext,
    games::{BetOutcome, BonusReason},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared application state
pub struct AppState {
    pub context: Arc<GameContext>,
    pub version: String,
}

/// Health check handler
/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Running".to_string(),
        version: state.version.clone(),
    })
}

/// Place a bet
/// POST /api/v1/bets
pub async fn place_bet_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PlaceBetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BetResponse>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(request_id = %request_id.0, "Invalid request format: {}", rejection.body_text());
        ApiError::bad_request(request_id.0.clone(), rejection.body_text())
    })?;

    let guess = request.validate().map_err(|reason| {
        warn!(request_id = %request_id.0, "Request validation failed: {}", reason);
        ApiError::bad_request(request_id.0.clone(), reason)
    })?;

    if request.is_bonus_game() {
        state
            .context
            .consume_bonus(&request.id)
            .map_err(|e| ApiError::forbidden(request_id.0.clone(), e.to_string()))?;
        debug!(player_id = %request.id, "Bonus credit consumed");
    }

    let command = request
        .into_command(guess)
        .map_err(|e| ApiError::bad_request(request_id.0.clone(), e.to_string()))?;

    info!(
        request_id = %request_id.0,
        player_id = command.player_id(),
        wager = command.wager(),
        guess = %command.guess(),
        "Processing bet"
    );

    let outcome = state.context.process_bet(&command);
    let status = match outcome {
        BetOutcome::BonusGranted {
            reason: BonusReason::EmptyDraw,
        } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };

    Ok((status, Json(BetResponse::from(outcome))))
}

/// Diagnostic view of the shared stores
/// GET /api/v1/jackpot
pub async fn game_status_handler(State(state): State<Arc<AppState>>) -> Json<GameStatusResponse> {
    let context = &state.context;
    Json(GameStatusResponse {
        jackpot: context.jackpot().current(),
        supply_len: context.supply().len(),
        supply_capacity: context.supply().capacity(),
        outstanding_bonus_games: context.bonus().total_outstanding(),
        observed_at: Utc::now(),
    })
}

/// Remaining bonus games for a player
/// GET /api/v1/bonus/:player_id
pub async fn bonus_balance_handler(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Json<BonusBalanceResponse> {
    let bonus_games = state.context.bonus().available(&player_id);
    Json(BonusBalanceResponse {
        id: player_id,
        bonus_games,
    })
}
