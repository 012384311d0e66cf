//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! the state machine so they can be checked on arbitrary boards.

pub mod tie;
pub mod win;

pub use tie::is_full;
pub use win::{LINES, check_winner};
