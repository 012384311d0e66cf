//! REST API over the game registry.

mod dto;
mod error;
mod handlers;

pub use dto::{
    ErrorResponse, GameListResponse, HealthResponse, MoveRequest, NewGameResponse, StateResponse,
    TIE,
};
pub use error::ApiError;

use axum::Router;
use axum::routing::{delete, get, post};
use derive_new::new;
use std::sync::Arc;
use tictactoe_core::GameRegistry;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::instrument;

/// Shared handler state.
#[derive(Debug, Clone, new)]
pub struct AppState {
    registry: Arc<GameRegistry>,
}

/// Builds the application router.
///
/// Every route answers with permissive CORS headers and is traced.
#[instrument(skip(registry))]
pub fn router(registry: Arc<GameRegistry>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/games", get(handlers::list_games))
        .route("/api/game/new", post(handlers::new_game))
        .route("/api/game/{id}", delete(handlers::remove_game))
        .route("/api/game/{id}/state", get(handlers::get_state))
        .route("/api/game/{id}/move", post(handlers::make_move))
        .route("/api/game/{id}/reset", post(handlers::reset_game))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(registry))
}
