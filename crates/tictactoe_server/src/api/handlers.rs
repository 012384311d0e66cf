//! Route handlers.

use super::AppState;
use super::dto::{GameListResponse, HealthResponse, MoveRequest, NewGameResponse, StateResponse};
use super::error::ApiError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Number;
use tictactoe_core::GameId;
use tracing::{debug, info, instrument};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Resolves the `{id}` segment; anything that is not a game id is "not found".
fn game_id(path: Result<Path<u64>, PathRejection>) -> Result<GameId, ApiError> {
    match path {
        Ok(Path(id)) => Ok(GameId::from(id)),
        Err(rejection) => {
            debug!(error = %rejection, "Unparseable game id");
            Err(ApiError::NotFound)
        }
    }
}

/// Converts a wire coordinate. Negatives, fractions and values past `usize`
/// are invalid positions; the board bound is checked by the game.
fn coordinate(value: &Number) -> Result<usize, ApiError> {
    value
        .as_u64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or(ApiError::InvalidPosition)
}

#[instrument]
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

#[instrument(skip(state))]
pub(super) async fn list_games(State(state): State<AppState>) -> Json<GameListResponse> {
    Json(GameListResponse {
        game_ids: state.registry.game_ids(),
    })
}

#[instrument(skip(state))]
pub(super) async fn new_game(State(state): State<AppState>) -> Json<NewGameResponse> {
    let (game_id, view) = state.registry.create_game();
    info!(game_id = %game_id, "Game created via API");
    Json(NewGameResponse {
        game_id,
        state: StateResponse::from(view),
    })
}

#[instrument(skip_all)]
pub(super) async fn get_state(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<StateResponse> {
    let id = game_id(path)?;
    let view = state.registry.get_game(id)?;
    Ok(Json(StateResponse::from(view)))
}

#[instrument(skip_all)]
pub(super) async fn make_move(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> ApiResult<StateResponse> {
    let id = game_id(path)?;
    // Unknown games are reported before body problems.
    state.registry.get_game(id)?;

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(game_id = %id, error = %rejection, "Unreadable move body");
            return Err(ApiError::MissingFields);
        }
    };
    let (Some(row), Some(col)) = (request.row, request.col) else {
        return Err(ApiError::MissingFields);
    };

    let view = state
        .registry
        .apply_move(id, coordinate(&row)?, coordinate(&col)?)?;
    info!(game_id = %id, %row, %col, status = ?view.status(), "Move accepted via API");
    Ok(Json(StateResponse::from(view)))
}

#[instrument(skip_all)]
pub(super) async fn reset_game(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<StateResponse> {
    let id = game_id(path)?;
    let view = state.registry.reset_game(id)?;
    info!(game_id = %id, "Game reset via API");
    Ok(Json(StateResponse::from(view)))
}

#[instrument(skip_all)]
pub(super) async fn remove_game(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = game_id(path)?;
    state.registry.remove_game(id)?;
    Ok(StatusCode::NO_CONTENT)
}
