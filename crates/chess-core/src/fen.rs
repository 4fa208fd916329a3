//! FEN (Forsyth-Edwards Notation) placement parsing.
//!
//! Only the first two FEN fields carry meaning for this rule set: the
//! piece placement and the active color. Castling, en passant and the
//! move clocks are accepted when present and otherwise ignored.

use crate::{Color, Piece, PieceKind};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 1 to 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),
}

/// Parsed FEN data.
///
/// This struct holds the validated raw components. The engine converts
/// it into its own board representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Piece placement string (e.g., "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
    pub piece_placement: String,
    /// Active color ('w' or 'b'); defaults to 'w' when the field is absent.
    pub active_color: char,
}

impl FenParser {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.is_empty() || parts.len() > 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let piece_placement = parts[0];
        Self::validate_piece_placement(piece_placement)?;

        let active_color = match parts.get(1).copied() {
            None | Some("w") => 'w',
            Some("b") => 'b',
            Some(other) => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        Ok(FenParser {
            piece_placement: piece_placement.to_string(),
            active_color,
        })
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        match self.active_color {
            'b' => Color::Black,
            _ => Color::White,
        }
    }

    /// Iterates over the placement as `(row, col, piece)`, row 0 being rank 8.
    pub fn pieces(&self) -> impl Iterator<Item = (u8, u8, Piece)> + '_ {
        self.piece_placement
            .split('/')
            .enumerate()
            .flat_map(|(row, rank)| {
                let mut col = 0u8;
                rank.chars().filter_map(move |c| {
                    if let Some(skip) = c.to_digit(10) {
                        col += skip as u8;
                        None
                    } else {
                        let piece = Piece::from_fen_char(c)?;
                        let at = (row as u8, col, piece);
                        col += 1;
                        Some(at)
                    }
                })
            })
    }

    fn validate_piece_placement(placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut kings = [0usize; 2];
        for (i, rank) in ranks.iter().enumerate() {
            let mut squares = 0;
            for c in rank.chars() {
                if let Some(skip @ 1..=8) = c.to_digit(10) {
                    squares += skip;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if piece.kind == PieceKind::King {
                        kings[piece.color.index()] += 1;
                    }
                    squares += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - i
                    )));
                }
            }
            if squares != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - i,
                    squares
                )));
            }
        }

        for color in Color::ALL {
            let count = kings[color.index()];
            if count != 1 {
                return Err(FenError::KingCount { color, count });
            }
        }

        Ok(())
    }

    /// Converts the parsed FEN back to a two-field FEN string.
    pub fn to_fen(&self) -> String {
        format!("{} {}", self.piece_placement, self.active_color)
    }
}

impl Default for FenParser {
    fn default() -> Self {
        FenParser {
            piece_placement: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".to_string(),
            active_color: 'w',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = FenParser::parse(FenParser::STARTPOS).unwrap();
        assert_eq!(fen.active_color, 'w');
        assert_eq!(fen.side_to_move(), Color::White);
        assert_eq!(fen.pieces().count(), 32);
        assert_eq!(fen, FenParser::default());
    }

    #[test]
    fn parse_full_fen_ignores_trailing_fields() {
        let fen = FenParser::parse("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(fen.side_to_move(), Color::Black);
        assert_eq!(fen.to_fen(), "7k/5Q2/6K1/8/8/8/8/8 b");
    }

    #[test]
    fn placement_only_defaults_to_white() {
        let fen = FenParser::parse("4k3/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(fen.side_to_move(), Color::White);
    }

    #[test]
    fn pieces_are_located_by_row_and_column() {
        let fen = FenParser::parse("4k3/8/8/8/8/8/8/R3K3 w").unwrap();
        let pieces: Vec<_> = fen.pieces().collect();
        assert_eq!(
            pieces,
            vec![
                (0, 4, Piece::new(PieceKind::King, Color::Black)),
                (7, 0, Piece::new(PieceKind::Rook, Color::White)),
                (7, 4, Piece::new(PieceKind::King, Color::White)),
            ]
        );
    }

    #[test]
    fn invalid_part_count() {
        assert!(matches!(
            FenParser::parse(""),
            Err(FenError::InvalidPartCount(0))
        ));
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra"),
            Err(FenError::InvalidPartCount(7))
        ));
    }

    #[test]
    fn invalid_active_color() {
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 x"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_rank_count() {
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/4K3 w"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_invalid_char() {
        assert!(matches!(
            FenParser::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/0K7/8 w"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_wrong_squares() {
        assert!(matches!(
            FenParser::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn king_count_enforced() {
        assert_eq!(
            FenParser::parse("8/8/8/8/8/8/8/4K3 w"),
            Err(FenError::KingCount {
                color: Color::Black,
                count: 0
            })
        );
        assert_eq!(
            FenParser::parse("4k3/8/8/8/8/8/8/3KK3 w"),
            Err(FenError::KingCount {
                color: Color::White,
                count: 2
            })
        );
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidPartCount(9);
        assert!(err.to_string().contains('9'));

        let err = FenError::KingCount {
            color: Color::Black,
            count: 0,
        };
        assert_eq!(err.to_string(), "expected exactly one Black king, found 0");
    }
}
