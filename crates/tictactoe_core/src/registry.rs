//! In-memory registry of independent games.

use crate::game::{GameState, GameStateView, MoveError};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, instrument, warn};

/// Identifier of a game in the registry.
///
/// Assigned from a monotonic counter starting at 1; never reused.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct GameId(u64);

impl GameId {
    /// Returns the raw identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Error returned by registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RegistryError {
    /// No game is registered under this id.
    #[display("Game {id} not found")]
    NotFound {
        /// Requested id.
        id: GameId,
    },

    /// The game rejected the move.
    #[display("{_0}")]
    Move(MoveError),
}

impl From<MoveError> for RegistryError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

/// Owns every game for the lifetime of the process.
///
/// The id map sits behind a read-write lock and each game behind its own
/// mutex: operations on one game are serialised, different games proceed
/// in parallel. Share it with `Arc`.
#[derive(Debug)]
pub struct GameRegistry {
    games: RwLock<HashMap<GameId, Mutex<GameState>>>,
    next_id: AtomicU64,
}

impl GameRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game registry");
        Self {
            games: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Registers a fresh game and returns its id and initial snapshot.
    #[instrument(skip(self))]
    pub fn create_game(&self) -> (GameId, GameStateView) {
        let id = GameId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let game = GameState::new();
        let view = game.snapshot();

        self.write().insert(id, Mutex::new(game));

        info!(game_id = %id, "Created new game");
        (id, view)
    }

    /// Returns a snapshot of the game.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if `id` is unknown.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: GameId) -> Result<GameStateView, RegistryError> {
        self.with_game(id, |game| game.snapshot())
    }

    /// Applies a move to the game.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if `id` is unknown, otherwise
    /// [`RegistryError::Move`] wrapping the game's rejection.
    #[instrument(skip(self))]
    pub fn apply_move(
        &self,
        id: GameId,
        row: usize,
        col: usize,
    ) -> Result<GameStateView, RegistryError> {
        let view = self.with_game(id, |game| game.apply_move(row, col))??;
        debug!(game_id = %id, status = ?view.status(), "Move recorded");
        Ok(view)
    }

    /// Resets the game in place, keeping its id.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if `id` is unknown.
    #[instrument(skip(self))]
    pub fn reset_game(&self, id: GameId) -> Result<GameStateView, RegistryError> {
        self.with_game(id, GameState::reset)
    }

    /// Removes the game. Its id is never handed out again.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if `id` is unknown.
    #[instrument(skip(self))]
    pub fn remove_game(&self, id: GameId) -> Result<(), RegistryError> {
        match self.write().remove(&id) {
            Some(_) => {
                info!(game_id = %id, "Removed game");
                Ok(())
            }
            None => {
                warn!(game_id = %id, "Cannot remove unknown game");
                Err(RegistryError::NotFound { id })
            }
        }
    }

    /// Lists registered ids in ascending order.
    #[instrument(skip(self))]
    pub fn game_ids(&self) -> Vec<GameId> {
        let mut ids: Vec<_> = self.read().keys().copied().collect();
        ids.sort_unstable();
        debug!(count = ids.len(), "Listed games");
        ids
    }

    /// Number of registered games.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True if no games are registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Runs `f` on the game while holding its lock.
    fn with_game<T>(
        &self,
        id: GameId,
        f: impl FnOnce(&mut GameState) -> T,
    ) -> Result<T, RegistryError> {
        let games = self.read();
        let Some(entry) = games.get(&id) else {
            debug!(game_id = %id, "Game not found");
            return Err(RegistryError::NotFound { id });
        };
        let mut game = lock(entry);
        Ok(f(&mut *game))
    }

    // A panic while holding a lock cannot leave a game half-updated:
    // `GameState` validates before it mutates. Poisoned locks are reused.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<GameId, Mutex<GameState>>> {
        self.games.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<GameId, Mutex<GameState>>> {
        self.games.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn lock(entry: &Mutex<GameState>) -> MutexGuard<'_, GameState> {
    entry.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
