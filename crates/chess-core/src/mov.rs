//! Move representation.

use crate::Square;
use std::fmt;

/// A move request: a piece travels from one square to another.
///
/// Promotion is implied (pawns always become queens), so a move carries
/// no extra flags.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Parses a coordinate move such as `"e2e4"`, `"e2 e4"` or `"e2-e4"`.
    pub fn parse(s: &str) -> Option<Self> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if compact.len() != 4 || !compact.is_ascii() {
            return None;
        }
        let from = Square::from_algebraic(&compact[0..2])?;
        let to = Square::from_algebraic(&compact[2..4])?;
        Some(Move::new(from, to))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{})", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
