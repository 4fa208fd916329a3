//! Thread-safe handle to a single game.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chess_core::{Color, FenError, Piece, Square};

use crate::{ChessEngine, GameStatus, MoveError, MoveRecord};

/// A cloneable handle sharing one [`ChessEngine`] between threads.
///
/// Every call takes the lock for its own duration only. A panic while the
/// lock was held does not wedge the game: the poisoned guard is recovered,
/// since engine mutations either complete or leave the state untouched.
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<ChessEngine>>,
}

impl SharedEngine {
    pub fn new(engine: ChessEngine) -> Self {
        SharedEngine {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::new(ChessEngine::from_fen(fen)?))
    }

    fn lock(&self) -> MutexGuard<'_, ChessEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut ChessEngine) -> R) -> R {
        f(&mut *self.lock())
    }

    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        self.lock().legal_moves(square)
    }

    pub fn attempt_move(&self, from: Square, to: Square) -> bool {
        self.lock().attempt_move(from, to)
    }

    pub fn try_move(&self, from: Square, to: Square) -> Result<MoveRecord, MoveError> {
        self.lock().try_move(from, to)
    }

    pub fn current_turn(&self) -> Color {
        self.lock().current_turn()
    }

    pub fn status(&self) -> GameStatus {
        self.lock().status()
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.lock().is_in_check(color)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.lock().piece_at(square)
    }

    pub fn to_fen(&self) -> String {
        self.lock().to_fen()
    }

    pub fn reset(&self) {
        self.lock().reset()
    }

    /// Returns a copy of the current game state.
    pub fn snapshot(&self) -> ChessEngine {
        self.lock().clone()
    }
}
