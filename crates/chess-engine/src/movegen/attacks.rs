//! Movement offsets and attack detection.

use super::pseudo_legal_moves;
use crate::Board;
use chess_core::{Color, Square};

/// Knight jumps as (row delta, column delta).
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King steps as (row delta, column delta).
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Orthogonal ray directions.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal ray directions.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Returns true if any piece of `by_color` has `target` among its
/// pseudo-legal destinations.
///
/// `target` is expected to hold a piece of the other color (in practice
/// a king). Pawn pushes only reach empty squares, so on an occupied
/// target only pawn captures count, as they should.
pub fn is_square_attacked(board: &Board, target: Square, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .any(|(from, piece)| pseudo_legal_moves(piece, from, board).contains(target))
}
