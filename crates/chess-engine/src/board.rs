//! Mailbox board: an 8x8 grid of optional pieces.

use chess_core::{Color, FenParser, Piece, PieceKind, Square};
use std::fmt;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement, indexed `squares[row][col]`.
///
/// The board is `Copy` so legality checks can work on a snapshot instead
/// of applying and reverting moves in place.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting placement.
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let back = color.back_rank() as usize;
            let pawns = color.pawn_row() as usize;
            board.squares[back] = BACK_RANK.map(|kind| Some(Piece::new(kind, color)));
            board.squares[pawns] = [Some(Piece::new(PieceKind::Pawn, color)); 8];
        }
        board
    }

    /// Builds a board from validated FEN placement.
    pub fn from_fen(parsed: &FenParser) -> Self {
        let mut board = Board::empty();
        for (row, col, piece) in parsed.pieces() {
            if let Some(sq) = Square::new(row, col) {
                board.set(sq, Some(piece));
            }
        }
        board
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row() as usize][sq.col() as usize]
    }

    #[inline]
    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.row() as usize][sq.col() as usize] = piece;
    }

    /// Removes and returns the piece on the given square.
    #[inline]
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.row() as usize][sq.col() as usize].take()
    }

    /// Iterates over every occupied square.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the squares occupied by one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Scans the board for the king of the given color.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Returns the FEN piece placement field.
    pub fn placement(&self) -> String {
        let mut fen = String::new();
        for (row, rank) in self.squares.iter().enumerate() {
            let mut empty_count = 0;
            for cell in rank {
                match cell {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }
        fen
    }

    /// Returns a configurable text rendering of the board.
    pub fn display(&self) -> BoardDisplay<'_> {
        BoardDisplay {
            board: self,
            glyphs: Glyphs::Unicode,
            coordinates: true,
            highlights: &[],
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.placement())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display().fmt(f)
    }
}

/// How pieces are drawn in a [`BoardDisplay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Glyphs {
    /// Unicode chess symbols (♔ ♚ ...).
    #[default]
    Unicode,
    /// FEN letters (K k ...).
    Ascii,
}

/// Text rendering of a board, White at the bottom.
#[derive(Clone, Copy)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    glyphs: Glyphs,
    coordinates: bool,
    highlights: &'a [Square],
}

impl<'a> BoardDisplay<'a> {
    pub fn glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Toggles the rank and file labels.
    pub fn coordinates(mut self, coordinates: bool) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Marks the given empty squares with `*` and occupied ones with brackets.
    pub fn highlight(mut self, squares: &'a [Square]) -> Self {
        self.highlights = squares;
        self
    }
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            if self.coordinates {
                write!(f, "{} ", 8 - row)?;
            }
            for col in 0..8u8 {
                let Some(sq) = Square::new(row, col) else {
                    continue;
                };
                let marked = self.highlights.contains(&sq);
                let cell = match self.board.piece_at(sq) {
                    Some(piece) => match self.glyphs {
                        Glyphs::Unicode => piece.symbol(),
                        Glyphs::Ascii => piece.to_fen_char(),
                    },
                    None if marked => '*',
                    None => '.',
                };
                if marked && self.board.piece_at(sq).is_some() {
                    write!(f, "[{}]", cell)?;
                } else {
                    write!(f, " {} ", cell)?;
                }
            }
            writeln!(f)?;
        }
        if self.coordinates {
            write!(f, "  ")?;
            for file in 'a'..='h' {
                write!(f, " {} ", file)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
