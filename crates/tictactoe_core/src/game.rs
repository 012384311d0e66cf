//! Game state machine for a single tic-tac-toe game.

use crate::rules;
use crate::types::{BOARD_SIZE, Board, CELL_COUNT, GameStatus, Mark};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Error that can occur when applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Row or column is outside `0..=2`.
    #[display("Position ({row}, {col}) is off the board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already holds a mark.
    #[display("Cell ({row}, {col}) is already occupied")]
    CellOccupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The game has been won or tied.
    #[display("Game is already over")]
    GameAlreadyOver,
}

/// Read-only snapshot of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Getters)]
pub struct GameStateView {
    /// The board.
    board: Board,
    /// Mark that moves next (or made the final move, once the game is over).
    current_player: Mark,
    /// Game status.
    status: GameStatus,
    /// Number of filled cells.
    move_count: u8,
}

impl GameStateView {
    /// True once the game is won or tied.
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }
}

/// Complete state of one game.
///
/// Mutated only through [`GameState::apply_move`] and [`GameState::reset`].
/// A rejected move never changes the state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    current_player: Mark,
    status: GameStatus,
    move_count: u8,
}

impl GameState {
    /// Creates a new game: empty board, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Mark::X,
            status: GameStatus::InProgress,
            move_count: 0,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark that moves next.
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the number of filled cells.
    pub fn move_count(&self) -> u8 {
        self.move_count
    }

    /// Places the current player's mark at `(row, col)`.
    ///
    /// Checks run in order: bounds, game over, occupied cell. After the
    /// mark is placed, a completed line wins before a full board ties. The
    /// turn only passes when the game continues.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] without touching the state if the move is illegal.
    #[instrument(skip(self), fields(player = %self.current_player, moves = self.move_count))]
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<GameStateView, MoveError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            warn!("Move rejected: off the board");
            return Err(MoveError::OutOfBounds { row, col });
        }

        if self.status.is_over() {
            warn!(status = ?self.status, "Move rejected: game already over");
            return Err(MoveError::GameAlreadyOver);
        }

        if !self.board.is_empty(row, col) {
            warn!("Move rejected: cell occupied");
            return Err(MoveError::CellOccupied { row, col });
        }

        let player = self.current_player;
        self.board.place(row, col, player);
        self.move_count += 1;

        if let Some(winner) = rules::check_winner(&self.board) {
            debug_assert_eq!(winner, player, "only the mover can complete a line");
            self.status = GameStatus::Won(winner);
            info!(winner = %winner, moves = self.move_count, "Game won");
        } else if usize::from(self.move_count) == CELL_COUNT {
            self.status = GameStatus::Tied;
            info!(moves = self.move_count, "Game tied");
        } else {
            self.current_player = player.opponent();
            debug!(next = %self.current_player, "Move applied");
        }

        Ok(self.snapshot())
    }

    /// Re-initialises this game in place and returns the fresh snapshot.
    #[instrument(skip(self), fields(status = ?self.status, moves = self.move_count))]
    pub fn reset(&mut self) -> GameStateView {
        *self = Self::new();
        info!("Game reset");
        self.snapshot()
    }

    /// Read-only projection of the current state.
    pub fn snapshot(&self) -> GameStateView {
        GameStateView {
            board: self.board,
            current_player: self.current_player,
            status: self.status,
            move_count: self.move_count,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
