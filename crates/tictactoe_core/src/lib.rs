//! Tic-tac-toe core - game rules and an in-memory game registry
//!
//! Transport-free building blocks for a tic-tac-toe server.
//!
//! # Architecture
//!
//! - **GameState**: one game's board, turn, status and move count
//! - **Rules**: win and tie detection over a board
//! - **GameRegistry**: owns games keyed by [`GameId`]
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{GameRegistry, GameStatus, Mark};
//!
//! let registry = GameRegistry::new();
//! let (id, _) = registry.create_game();
//! for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
//!     registry.apply_move(id, row, col)?;
//! }
//! assert_eq!(*registry.get_game(id)?.status(), GameStatus::Won(Mark::X));
//! # Ok::<(), tictactoe_core::RegistryError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod registry;
pub mod rules;
mod types;

// Crate-level exports - Domain types
pub use types::{BOARD_SIZE, Board, CELL_COUNT, Cell, GameStatus, Mark};

// Crate-level exports - State machine
pub use game::{GameState, GameStateView, MoveError};

// Crate-level exports - Registry
pub use registry::{GameId, GameRegistry, RegistryError};
