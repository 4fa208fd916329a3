//! Game management: the engine a board UI talks to.
//!
//! [`ChessEngine`] owns the position and everything derived from it:
//! - legality-filtered move lists for move hints
//! - turn alternation and promotion on committed moves
//! - check status and checkmate/stalemate detection
//! - an append-only move history
//! - the click-to-select protocol of a board UI

use crate::movegen::Targets;
use crate::status::{CheckStatus, GameStatus};
use crate::{Board, MoveRecord, Position};
use chess_core::{Color, FenError, Move, Piece, Square};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Reasons a move attempt is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("game is over ({0})")]
    GameOver(GameStatus),

    #[error("no piece on {0}")]
    NoPiece(Square),

    #[error("{square} holds a {color} piece but {turn} is to move")]
    NotYourTurn {
        square: Square,
        color: Color,
        turn: Color,
    },

    #[error("illegal move: {0}")]
    IllegalMove(Move),
}

/// Result of clicking a square, see [`ChessEngine::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The game is over; clicks do nothing.
    Ignored,
    /// A piece of the side to move was picked up.
    Selected { square: Square, targets: Vec<Square> },
    /// The selected piece moved to the clicked square.
    Moved(MoveRecord),
    /// The click did not complete a move; the selection was dropped.
    Cleared,
}

/// A chess game with history tracking.
///
/// All mutation goes through [`try_move`](Self::try_move) (or its boolean
/// form [`attempt_move`](Self::attempt_move)) and [`reset`](Self::reset).
/// Rejected moves leave every part of the state untouched.
#[derive(Debug, Clone)]
pub struct ChessEngine {
    position: Position,
    checks: CheckStatus,
    status: GameStatus,
    history: Vec<MoveRecord>,
    selected: Option<Square>,
}

impl Default for ChessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessEngine {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        ChessEngine {
            position: Position::startpos(),
            checks: CheckStatus::default(),
            status: GameStatus::Active,
            history: Vec::new(),
            selected: None,
        }
    }

    /// Creates a game from a custom position.
    ///
    /// Check and terminal state are evaluated immediately, so a position
    /// that is already mate or stalemate starts out finished.
    pub fn from_position(position: Position) -> Self {
        let mut engine = ChessEngine {
            position,
            checks: CheckStatus::default(),
            status: GameStatus::Active,
            history: Vec::new(),
            selected: None,
        };
        engine.refresh();
        engine
    }

    /// Creates a game from a FEN string (placement and optional color).
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let position = Position::from_fen(fen)?;
        Ok(Self::from_position(position))
    }

    /// Restores the standard starting position and clears all history.
    pub fn reset(&mut self) {
        *self = Self::new();
        info!("game reset");
    }

    /// Returns the legal destinations of the piece on `square`.
    ///
    /// Empty if the square is empty or the piece does not belong to the
    /// side to move. Nothing is returned once the game is over.
    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        self.legal_targets(square).to_vec()
    }

    fn legal_targets(&self, square: Square) -> Targets {
        if self.status.is_over() {
            return Targets::new();
        }
        self.position.legal_moves(square)
    }

    /// Returns every legal move for the side to move.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        if self.status.is_over() {
            return Vec::new();
        }
        self.position.all_legal_moves()
    }

    /// Attempts a move, returning whether it was played.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> bool {
        match self.try_move(from, to) {
            Ok(_) => true,
            Err(err) => {
                trace!(%from, %to, %err, "move rejected");
                false
            }
        }
    }

    /// Attempts a move, reporting why it was rejected.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver(self.status));
        }

        let turn = self.position.side_to_move();
        let piece = self
            .position
            .board()
            .piece_at(from)
            .ok_or(MoveError::NoPiece(from))?;
        if piece.color != turn {
            return Err(MoveError::NotYourTurn {
                square: from,
                color: piece.color,
                turn,
            });
        }
        if !self.position.is_legal(from, to) {
            return Err(MoveError::IllegalMove(Move::new(from, to)));
        }

        let record = self
            .position
            .play(from, to)
            .ok_or(MoveError::NoPiece(from))?;
        self.history.push(record);
        self.selected = None;
        self.refresh();

        debug!(
            mv = %record.as_move(),
            piece = %record.piece,
            captured = ?record.captured,
            promoted = record.promoted,
            "move played"
        );
        if self.status.is_over() {
            info!(status = %self.status, plies = self.history.len(), "game over");
        }

        Ok(record)
    }

    /// Recomputes check status for both colors, then the terminal state.
    fn refresh(&mut self) {
        self.checks = CheckStatus::compute(&self.position);
        self.status = GameStatus::evaluate(&self.position);
    }

    /// Handles a click on `square`, as a board UI would.
    ///
    /// With nothing selected, clicking a piece of the side to move selects
    /// it. With a selection, the click is taken as the destination: the
    /// move is tried and the selection is dropped either way.
    pub fn select(&mut self, square: Square) -> Selection {
        if self.status.is_over() {
            return Selection::Ignored;
        }

        if let Some(from) = self.selected.take() {
            return match self.try_move(from, square) {
                Ok(record) => Selection::Moved(record),
                Err(err) => {
                    trace!(%from, to = %square, %err, "selection dropped");
                    Selection::Cleared
                }
            };
        }

        match self.position.board().piece_at(square) {
            Some(piece) if piece.color == self.current_turn() => {
                self.selected = Some(square);
                Selection::Selected {
                    square,
                    targets: self.legal_moves(square),
                }
            }
            _ => Selection::Cleared,
        }
    }

    /// Returns the currently selected square, if any.
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Drops the current selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Returns the color to move.
    pub fn current_turn(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true if the king of `color` is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.checks.get(color)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.board().piece_at(square)
    }

    /// Returns the current board for rendering.
    pub fn board(&self) -> &Board {
        self.position.board()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the moves played so far, oldest first.
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the current position as a two-field FEN string.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    /// Returns the one-line status shown under the board.
    pub fn status_message(&self) -> String {
        let turn = self.current_turn();
        match self.status {
            GameStatus::Checkmate { winner } => format!("Checkmate! {} wins!", winner),
            GameStatus::Stalemate => "Stalemate! Game is a draw.".to_string(),
            GameStatus::Active if self.is_in_check(turn) => format!("{} is in check", turn),
            GameStatus::Active => format!("{} to move", turn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::PieceKind;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(engine: &mut ChessEngine, from: &str, to: &str) -> bool {
        engine.attempt_move(sq(from), sq(to))
    }

    #[test]
    fn new_game() {
        let engine = ChessEngine::new();
        assert_eq!(engine.ply_count(), 0);
        assert_eq!(engine.current_turn(), Color::White);
        assert_eq!(engine.status(), GameStatus::Active);
        assert!(!engine.is_in_check(Color::White));
        assert!(!engine.is_in_check(Color::Black));
        assert_eq!(engine.selected(), None);
    }

    #[test]
    fn legal_moves_for_side_to_move_only() {
        let engine = ChessEngine::new();
        assert_eq!(engine.legal_moves(sq("g1")), vec![sq("f3"), sq("h3")]);
        assert!(engine.legal_moves(sq("g8")).is_empty());
        assert!(engine.legal_moves(sq("e4")).is_empty());
    }

    #[test]
    fn move_toggles_turn_and_records_history() {
        let mut engine = ChessEngine::new();
        assert!(play(&mut engine, "e2", "e4"));
        assert_eq!(engine.current_turn(), Color::Black);
        assert!(play(&mut engine, "e7", "e5"));
        assert_eq!(engine.current_turn(), Color::White);

        let history = engine.move_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].as_move().to_string(), "e2e4");
        assert_eq!(history[1].piece, Piece::new(PieceKind::Pawn, Color::Black));
    }

    #[test]
    fn illegal_move_changes_nothing() {
        let mut engine = ChessEngine::new();
        let before = engine.to_fen();
        assert!(!play(&mut engine, "e2", "e5"));
        assert!(!play(&mut engine, "e7", "e5"));
        assert!(!play(&mut engine, "e4", "e5"));
        assert_eq!(engine.to_fen(), before);
        assert_eq!(engine.ply_count(), 0);
        assert_eq!(engine.current_turn(), Color::White);
    }

    #[test]
    fn try_move_reports_reason() {
        let mut engine = ChessEngine::new();
        assert_eq!(
            engine.try_move(sq("e4"), sq("e5")),
            Err(MoveError::NoPiece(sq("e4")))
        );
        assert_eq!(
            engine.try_move(sq("e7"), sq("e5")),
            Err(MoveError::NotYourTurn {
                square: sq("e7"),
                color: Color::Black,
                turn: Color::White,
            })
        );
        assert_eq!(
            engine.try_move(sq("e2"), sq("e5")),
            Err(MoveError::IllegalMove(Move::new(sq("e2"), sq("e5"))))
        );
    }

    #[test]
    fn capture_is_recorded() {
        let mut engine = ChessEngine::new();
        assert!(play(&mut engine, "e2", "e4"));
        assert!(play(&mut engine, "d7", "d5"));
        let record = engine.try_move(sq("e4"), sq("d5")).unwrap();
        assert_eq!(
            record.captured,
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert_eq!(engine.board().pieces_of(Color::Black).count(), 15);
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut engine = ChessEngine::new();
        assert!(play(&mut engine, "f2", "f3"));
        assert!(play(&mut engine, "e7", "e5"));
        assert!(play(&mut engine, "g2", "g4"));
        assert!(play(&mut engine, "d8", "h4"));

        assert_eq!(
            engine.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert!(engine.is_in_check(Color::White));
        assert_eq!(engine.status_message(), "Checkmate! Black wins!");
    }

    #[test]
    fn cannot_move_after_game_over() {
        let mut engine = ChessEngine::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            assert!(play(&mut engine, from, to));
        }
        assert!(matches!(
            engine.try_move(sq("a2"), sq("a3")),
            Err(MoveError::GameOver(GameStatus::Checkmate { .. }))
        ));
        assert!(!play(&mut engine, "e1", "f2"));
        assert!(engine.legal_moves(sq("a2")).is_empty());
        assert!(engine.all_legal_moves().is_empty());
        assert_eq!(engine.select(sq("a2")), Selection::Ignored);
        assert_eq!(engine.ply_count(), 4);
    }

    #[test]
    fn stalemate_from_fen() {
        let engine = ChessEngine::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(engine.status(), GameStatus::Stalemate);
        assert!(!engine.is_in_check(Color::Black));
        assert_eq!(engine.status_message(), "Stalemate! Game is a draw.");
    }

    #[test]
    fn stalemate_after_move() {
        // Qf5-f7 leaves the h8 king without moves and not in check.
        let mut engine = ChessEngine::from_fen("7k/8/6K1/5Q2/8/8/8/8 w").unwrap();
        assert!(play(&mut engine, "f5", "f7"));
        assert_eq!(engine.status(), GameStatus::Stalemate);
        assert_eq!(engine.status().winner(), None);
    }

    #[test]
    fn rook_on_open_rank_gives_check() {
        let mut engine = ChessEngine::from_fen("4k3/8/8/8/8/8/8/R3K3 w").unwrap();
        assert!(!engine.is_in_check(Color::Black));
        assert!(play(&mut engine, "a1", "a8"));
        assert!(engine.is_in_check(Color::Black));
        assert!(!engine.is_in_check(Color::White));
        assert_eq!(engine.status(), GameStatus::Active);
        assert_eq!(engine.status_message(), "Black is in check");
    }

    #[test]
    fn promotion_to_queen() {
        let mut engine = ChessEngine::from_fen("4k3/P7/8/8/8/8/8/4K3 w").unwrap();
        let record = engine.try_move(sq("a7"), sq("a8")).unwrap();
        assert!(record.promoted);
        assert_eq!(record.piece.kind, PieceKind::Pawn);
        assert_eq!(
            engine.piece_at(sq("a8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert!(engine.is_in_check(Color::Black));
    }

    #[test]
    fn black_promotion_to_queen() {
        let mut engine = ChessEngine::from_fen("4k3/8/8/8/8/8/7p/K7 b").unwrap();
        assert!(play(&mut engine, "h2", "h1"));
        assert_eq!(
            engine.piece_at(Square::H1),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
    }

    #[test]
    fn reset_restores_start() {
        let mut engine = ChessEngine::new();
        assert!(play(&mut engine, "e2", "e4"));
        assert!(play(&mut engine, "e7", "e5"));
        engine.select(sq("g1"));
        engine.reset();

        assert_eq!(engine.to_fen(), ChessEngine::new().to_fen());
        assert_eq!(engine.board(), &Board::startpos());
        assert_eq!(engine.current_turn(), Color::White);
        assert_eq!(engine.status(), GameStatus::Active);
        assert!(engine.move_history().is_empty());
        assert_eq!(engine.selected(), None);
        assert_eq!(engine.position().king_square(Color::White), Square::E1);
        assert_eq!(engine.position().king_square(Color::Black), Square::E8);
    }

    #[test]
    fn selection_protocol() {
        let mut engine = ChessEngine::new();

        // Clicking an empty square or an opponent piece selects nothing.
        assert_eq!(engine.select(sq("e4")), Selection::Cleared);
        assert_eq!(engine.select(sq("e7")), Selection::Cleared);
        assert_eq!(engine.selected(), None);

        let picked = engine.select(sq("e2"));
        assert_eq!(
            picked,
            Selection::Selected {
                square: sq("e2"),
                targets: vec![sq("e3"), sq("e4")],
            }
        );
        assert_eq!(engine.selected(), Some(sq("e2")));

        match engine.select(sq("e4")) {
            Selection::Moved(record) => assert_eq!(record.as_move().to_string(), "e2e4"),
            other => panic!("expected a move, got {:?}", other),
        }
        assert_eq!(engine.selected(), None);
        assert_eq!(engine.current_turn(), Color::Black);
    }

    #[test]
    fn selection_dropped_on_bad_destination() {
        let mut engine = ChessEngine::new();
        engine.select(sq("b1"));
        assert_eq!(engine.select(sq("b4")), Selection::Cleared);
        assert_eq!(engine.selected(), None);
        assert_eq!(engine.ply_count(), 0);
    }

    #[test]
    fn status_messages() {
        let mut engine = ChessEngine::new();
        assert_eq!(engine.status_message(), "White to move");
        assert!(play(&mut engine, "e2", "e4"));
        assert_eq!(engine.status_message(), "Black to move");
    }
}
