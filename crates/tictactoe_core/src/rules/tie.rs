//! Tie detection logic for tic-tac-toe.

use crate::types::{Board, CELL_COUNT};
use tracing::instrument;

/// Checks if every cell holds a mark.
///
/// A full board with no winner is a tie.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.occupied() == CELL_COUNT
}
