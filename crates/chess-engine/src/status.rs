//! Game status and check bookkeeping.

use crate::Position;
use chess_core::Color;
use std::fmt;

/// Outcome state of a game.
///
/// Once a game leaves `Active` it stays there until the engine is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    #[default]
    Active,
    /// The side to move is in check with no legal moves.
    Checkmate { winner: Color },
    /// The side to move is not in check but has no legal moves.
    Stalemate,
}

impl GameStatus {
    /// Evaluates the terminal state for the side to move.
    pub fn evaluate(position: &Position) -> Self {
        if position.has_legal_moves() {
            return GameStatus::Active;
        }
        let to_move = position.side_to_move();
        if position.is_in_check(to_move) {
            GameStatus::Checkmate {
                winner: to_move.opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, GameStatus::Active)
    }

    #[inline]
    pub const fn is_over(self) -> bool {
        !self.is_active()
    }

    /// Returns the winner after a checkmate.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    /// Returns the lowercase status name ("active", "checkmate", "stalemate").
    pub const fn name(self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Checkmate { .. } => "checkmate",
            GameStatus::Stalemate => "stalemate",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "active"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Whether each color's king is currently attacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CheckStatus([bool; 2]);

impl CheckStatus {
    /// Computes check status for both colors.
    pub fn compute(position: &Position) -> Self {
        CheckStatus(Color::ALL.map(|color| position.is_in_check(color)))
    }

    #[inline]
    pub const fn get(self, color: Color) -> bool {
        self.0[color.index()]
    }
}
