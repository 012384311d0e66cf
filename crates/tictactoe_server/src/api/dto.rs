//! Wire shapes for the JSON API.
//!
//! Core types stay enum-based; strings only appear here.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use tictactoe_core::{BOARD_SIZE, GameId, GameStateView, GameStatus};

/// Winner value for a tied game.
pub const TIE: &str = "tie";

/// Game state as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateResponse {
    /// Rows of `""`, `"X"` or `"O"`.
    pub board: [[String; BOARD_SIZE]; BOARD_SIZE],
    /// `"X"` or `"O"`.
    pub current_player: String,
    /// True once won or tied.
    pub game_over: bool,
    /// `null`, `"X"`, `"O"` or `"tie"`.
    pub winner: Option<String>,
    /// Number of filled cells.
    pub moves_count: u8,
}

impl From<&GameStateView> for StateResponse {
    fn from(view: &GameStateView) -> Self {
        let winner = match view.status() {
            GameStatus::InProgress => None,
            GameStatus::Won(mark) => Some(mark.symbol().to_string()),
            GameStatus::Tied => Some(TIE.to_string()),
        };

        let cells = *view.board().cells();

        Self {
            board: cells.map(|row| row.map(|cell| cell.symbol().to_string())),
            current_player: view.current_player().symbol().to_string(),
            game_over: view.is_over(),
            winner,
            moves_count: *view.move_count(),
        }
    }
}

impl From<GameStateView> for StateResponse {
    fn from(view: GameStateView) -> Self {
        Self::from(&view)
    }
}

/// Response to creating a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResponse {
    /// Identifier of the new game.
    pub game_id: GameId,
    /// Its initial state.
    pub state: StateResponse,
}

/// Body of a move request.
///
/// Both fields are optional so a missing one is reported as such rather
/// than as a parse failure. Any JSON number is accepted here; range and
/// integrality are checked by the handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Row, `0..=2`.
    pub row: Option<Number>,
    /// Column, `0..=2`.
    pub col: Option<Number>,
}

/// Registered game ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameListResponse {
    /// Ids in ascending order.
    pub game_ids: Vec<GameId>,
}

/// Liveness probe body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: String,
}

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}
