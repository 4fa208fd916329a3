//! Move generation.
//!
//! Pseudo-legal generation follows each piece's movement pattern and
//! ignores whether the mover's own king is left in check. Legality
//! filtering lives in [`Position`](crate::Position), which tests every
//! pseudo-legal target on a board snapshot.

mod attacks;
pub mod perft;

use crate::Board;
use chess_core::{Color, Piece, PieceKind, Square};

pub use attacks::{
    is_square_attacked, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS,
};

/// Destination squares for one piece, with a fixed maximum capacity.
///
/// A queen in the middle of an open board reaches 27 squares, the most
/// any single piece can, so a fixed-size array avoids heap allocations.
#[derive(Clone)]
pub struct Targets {
    squares: [Square; Self::MAX_TARGETS],
    len: usize,
}

impl Targets {
    /// Capacity of the list.
    pub const MAX_TARGETS: usize = 32;

    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Targets {
            squares: [Square::A8; Self::MAX_TARGETS],
            len: 0,
        }
    }

    /// Adds a target square.
    #[inline]
    pub fn push(&mut self, sq: Square) {
        debug_assert!(self.len < Self::MAX_TARGETS);
        self.squares[self.len] = sq;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.as_slice().contains(&sq)
    }

    /// Retains only targets for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(Square) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(self.squares[read]) {
                self.squares[write] = self.squares[read];
                write += 1;
            }
        }
        self.len = write;
    }

    pub fn to_vec(&self) -> Vec<Square> {
        self.as_slice().to_vec()
    }
}

impl Default for Targets {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Targets {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for Targets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the pseudo-legal destinations of `piece` standing on `from`.
pub fn pseudo_legal_moves(piece: Piece, from: Square, board: &Board) -> Targets {
    let mut targets = Targets::new();
    let us = piece.color;

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, from, us, &mut targets),
        PieceKind::Knight => generate_steps(board, from, us, &KNIGHT_OFFSETS, &mut targets),
        PieceKind::Bishop => generate_slides(board, from, us, &BISHOP_DIRECTIONS, &mut targets),
        PieceKind::Rook => generate_slides(board, from, us, &ROOK_DIRECTIONS, &mut targets),
        PieceKind::Queen => {
            generate_slides(board, from, us, &ROOK_DIRECTIONS, &mut targets);
            generate_slides(board, from, us, &BISHOP_DIRECTIONS, &mut targets);
        }
        PieceKind::King => generate_steps(board, from, us, &KING_OFFSETS, &mut targets),
    }

    targets
}

/// Pushes, the double push from the starting row, and diagonal captures.
fn generate_pawn_moves(board: &Board, from: Square, us: Color, targets: &mut Targets) {
    let dir = us.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if board.piece_at(one).is_none() {
            targets.push(one);

            if from.row() == us.pawn_row() {
                if let Some(two) = one.offset(dir, 0) {
                    if board.piece_at(two).is_none() {
                        targets.push(two);
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(to) = from.offset(dir, d_col) {
            if matches!(board.piece_at(to), Some(target) if target.color != us) {
                targets.push(to);
            }
        }
    }
}

/// Single steps (knight, king): empty or enemy-occupied destinations.
fn generate_steps(
    board: &Board,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    targets: &mut Targets,
) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            match board.piece_at(to) {
                Some(target) if target.color == us => {}
                _ => targets.push(to),
            }
        }
    }
}

/// Rays that stop before an own piece or on an enemy piece.
fn generate_slides(
    board: &Board,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    targets: &mut Targets,
) {
    for &(d_row, d_col) in directions {
        let mut cursor = from;
        while let Some(to) = cursor.offset(d_row, d_col) {
            match board.piece_at(to) {
                None => targets.push(to),
                Some(target) => {
                    if target.color != us {
                        targets.push(to);
                    }
                    break;
                }
            }
            cursor = to;
        }
    }
}
