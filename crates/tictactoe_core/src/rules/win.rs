//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Mark};
use tracing::instrument;

/// All eight winning lines as `(row, col)` triples.
pub const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if some line holds three of that mark,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|[a, b, c]| {
        let first = board.get(a.0, a.1)?;
        match first {
            Cell::Marked(mark)
                if board.get(b.0, b.1) == Some(first) && board.get(c.0, c.1) == Some(first) =>
            {
                Some(mark)
            }
            _ => None,
        }
    })
}
