//! Chess position: placement, side to move and king locations.

use chess_core::{Color, FenError, FenParser, Move, Piece, PieceKind, Square};

use crate::movegen::{is_square_attacked, pseudo_legal_moves, Targets};
use crate::Board;

/// Cached king square for each color.
///
/// Updated whenever a king moves, so check detection never scans the
/// board for the king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KingLocations([Square; 2]);

impl KingLocations {
    /// King squares of the starting position (e1 and e8).
    pub const INITIAL: KingLocations = KingLocations([Square::E1, Square::E8]);

    #[inline]
    pub const fn get(self, color: Color) -> Square {
        self.0[color.index()]
    }

    #[inline]
    fn set(&mut self, color: Color, sq: Square) {
        self.0[color.index()] = sq;
    }
}

/// A completed move as recorded in the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The piece as it stood on `from`, before any promotion.
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// True if a pawn reached the far row and became a queen.
    pub promoted: bool,
}

impl MoveRecord {
    /// Returns the move as a plain from/to pair.
    pub const fn as_move(&self) -> Move {
        Move::new(self.from, self.to)
    }
}

/// Complete rules state of a position.
///
/// Fields are private: the only mutation is [`Position::play`], which is
/// crate-internal and trusts the caller to have checked legality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    kings: KingLocations,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Position {
            board: Board::startpos(),
            side_to_move: Color::White,
            kings: KingLocations::INITIAL,
        }
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let board = Board::from_fen(&parsed);

        let mut kings = KingLocations::INITIAL;
        for color in Color::ALL {
            let sq = board
                .find_king(color)
                .ok_or(FenError::KingCount { color, count: 0 })?;
            kings.set(color, sq);
        }

        let position = Position {
            board,
            side_to_move: parsed.side_to_move(),
            kings,
        };

        // The side to move could otherwise capture the opposing king.
        let waiting = position.side_to_move.opposite();
        if position.is_in_check(waiting) {
            return Err(FenError::OpponentInCheck(waiting));
        }
        Ok(position)
    }

    /// Returns the position as a two-field FEN string (placement and color).
    pub fn to_fen(&self) -> String {
        let color = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{} {}", self.board.placement(), color)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn kings(&self) -> KingLocations {
        self.kings
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings.get(color)
    }

    /// Returns true if the king of the given color is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        is_square_attacked(&self.board, self.king_square(color), color.opposite())
    }

    /// Returns the legal destinations of the piece on `from`.
    ///
    /// Empty when the square is empty or holds a piece of the side not to
    /// move.
    pub fn legal_moves(&self, from: Square) -> Targets {
        let piece = match self.board.piece_at(from) {
            Some(piece) if piece.color == self.side_to_move => piece,
            _ => return Targets::new(),
        };

        let mut targets = pseudo_legal_moves(piece, from, &self.board);
        targets.retain(|to| !self.exposes_king(piece, from, to));
        targets
    }

    /// Returns true if `to` is a legal destination for the piece on `from`.
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        self.legal_moves(from).contains(to)
    }

    /// Returns every legal move for the side to move.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        self.board
            .pieces_of(self.side_to_move)
            .flat_map(|(from, _)| {
                self.legal_moves(from)
                    .to_vec()
                    .into_iter()
                    .map(move |to| Move::new(from, to))
            })
            .collect()
    }

    /// Returns true if the side to move has at least one legal move.
    pub fn has_legal_moves(&self) -> bool {
        self.board
            .pieces_of(self.side_to_move)
            .any(|(from, _)| !self.legal_moves(from).is_empty())
    }

    /// Tests a pseudo-legal move on a board snapshot.
    fn exposes_king(&self, piece: Piece, from: Square, to: Square) -> bool {
        let mut snapshot = self.board;
        snapshot.set(from, None);
        snapshot.set(to, Some(piece));

        let king = if piece.kind == PieceKind::King {
            to
        } else {
            self.king_square(piece.color)
        };
        is_square_attacked(&snapshot, king, piece.color.opposite())
    }

    /// Applies a move that the caller has already checked for legality.
    ///
    /// Handles capture, king tracking, promotion to queen and the turn
    /// switch.
    pub(crate) fn play(&mut self, from: Square, to: Square) -> Option<MoveRecord> {
        let piece = self.board.take(from)?;
        let captured = self.board.take(to);

        let promoted = piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row();
        let landed = if promoted {
            Piece::new(PieceKind::Queen, piece.color)
        } else {
            piece
        };
        self.board.set(to, Some(landed));

        if piece.kind == PieceKind::King {
            self.kings.set(piece.color, to);
        }

        self.side_to_move = self.side_to_move.opposite();

        Some(MoveRecord {
            from,
            to,
            piece,
            captured,
            promoted,
        })
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
