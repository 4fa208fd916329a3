//! WebAssembly bindings for the chess engine.
//!
//! This crate provides the JavaScript-facing game object a browser board
//! component drives: move hints, move attempts, check and game status.
//! Squares are addressed by `(row, col)` with row 0 at black's back rank.
//!
//! # Usage
//!
//! ```javascript
//! import init, { ChessGame } from 'chess-wasm';
//!
//! await init();
//!
//! const game = new ChessGame();
//! const hints = game.legalMoves(6, 4); // [{row: 5, col: 4}, {row: 4, col: 4}]
//!
//! if (game.attemptMove(6, 4, 4, 4)) {
//!   console.log(game.statusText()); // "Black to move"
//! }
//! ```

use chess_core::{Color, Piece, PieceKind, Square};
use chess_engine::{ChessEngine, GameStatus, Selection};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A board coordinate as handed to JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl From<Square> for Coord {
    fn from(sq: Square) -> Self {
        Coord {
            row: sq.row(),
            col: sq.col(),
        }
    }
}

/// A piece as handed to JavaScript: `{kind: "queen", color: "white", symbol: "♕"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub kind: PieceKind,
    pub color: Color,
    pub symbol: String,
}

impl From<Piece> for PieceView {
    fn from(piece: Piece) -> Self {
        PieceView {
            kind: piece.kind,
            color: piece.color,
            symbol: piece.symbol().to_string(),
        }
    }
}

/// Outcome of a square click, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SelectionView {
    Ignored,
    Selected {
        square: Coord,
        targets: Vec<Coord>,
    },
    Moved {
        from: Coord,
        to: Coord,
        promoted: bool,
    },
    Cleared,
}

impl From<Selection> for SelectionView {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Ignored => SelectionView::Ignored,
            Selection::Selected { square, targets } => SelectionView::Selected {
                square: square.into(),
                targets: targets.into_iter().map(Coord::from).collect(),
            },
            Selection::Moved(record) => SelectionView::Moved {
                from: record.from.into(),
                to: record.to.into(),
                promoted: record.promoted,
            },
            Selection::Cleared => SelectionView::Cleared,
        }
    }
}

/// Converts JavaScript coordinates, rejecting anything off the board.
fn square(row: u32, col: u32) -> Option<Square> {
    let row = u8::try_from(row).ok()?;
    let col = u8::try_from(col).ok()?;
    Square::new(row, col)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// A chess game that can be manipulated from JavaScript.
#[wasm_bindgen]
pub struct ChessGame {
    engine: ChessEngine,
}

#[wasm_bindgen]
impl ChessGame {
    /// Creates a new game with the standard starting position.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        ChessGame {
            engine: ChessEngine::new(),
        }
    }

    /// Creates a game from a FEN string (piece placement and optional side to move).
    ///
    /// Returns an error if the FEN is invalid.
    #[wasm_bindgen(js_name = fromFen)]
    pub fn from_fen(fen: &str) -> Result<ChessGame, JsError> {
        let engine = ChessEngine::from_fen(fen).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(ChessGame { engine })
    }

    /// Returns the current position as a FEN string.
    #[wasm_bindgen(js_name = toFen)]
    pub fn to_fen(&self) -> String {
        self.engine.to_fen()
    }

    /// Returns the legal destinations of the piece at `(row, col)` as
    /// an array of `{row, col}` objects.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self, row: u32, col: u32) -> Result<JsValue, JsError> {
        to_js(&self.legal_coords(row, col))
    }

    /// Attempts a move; returns true if it was played.
    #[wasm_bindgen(js_name = attemptMove)]
    pub fn attempt_move(&mut self, from_row: u32, from_col: u32, to_row: u32, to_col: u32) -> bool {
        match (square(from_row, from_col), square(to_row, to_col)) {
            (Some(from), Some(to)) => self.engine.attempt_move(from, to),
            _ => false,
        }
    }

    /// Returns the side to move ("white" or "black").
    #[wasm_bindgen(js_name = currentTurn)]
    pub fn current_turn(&self) -> String {
        self.engine.current_turn().name().to_string()
    }

    /// Returns one of "active", "checkmate" or "stalemate".
    pub fn status(&self) -> String {
        self.engine.status().name().to_string()
    }

    /// Returns "white" or "black" after a checkmate, null otherwise.
    pub fn winner(&self) -> Option<String> {
        self.engine.status().winner().map(|c| c.name().to_string())
    }

    /// Returns true if the named color ("white"/"black") is in check.
    #[wasm_bindgen(js_name = isInCheck)]
    pub fn is_in_check(&self, color: &str) -> bool {
        Color::from_name(color).is_some_and(|c| self.engine.is_in_check(c))
    }

    /// Returns the piece at `(row, col)` as `{kind, color, symbol}`, or null.
    #[wasm_bindgen(js_name = pieceAt)]
    pub fn piece_at(&self, row: u32, col: u32) -> Result<JsValue, JsError> {
        match self.piece_view(row, col) {
            Some(view) => to_js(&view),
            None => Ok(JsValue::NULL),
        }
    }

    /// Handles a click on `(row, col)` and describes what happened.
    #[wasm_bindgen(js_name = selectSquare)]
    pub fn select_square(&mut self, row: u32, col: u32) -> Result<JsValue, JsError> {
        to_js(&self.select_view(row, col))
    }

    /// Returns the one-line status shown under the board.
    #[wasm_bindgen(js_name = statusText)]
    pub fn status_text(&self) -> String {
        self.engine.status_message()
    }

    /// Returns the number of half-moves played.
    #[wasm_bindgen(js_name = plyCount)]
    pub fn ply_count(&self) -> usize {
        self.engine.ply_count()
    }

    /// Resets the game to the starting position.
    pub fn reset(&mut self) {
        self.engine.reset();
    }
}

impl ChessGame {
    fn legal_coords(&self, row: u32, col: u32) -> Vec<Coord> {
        square(row, col)
            .map(|sq| {
                self.engine
                    .legal_moves(sq)
                    .into_iter()
                    .map(Coord::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn piece_view(&self, row: u32, col: u32) -> Option<PieceView> {
        let sq = square(row, col)?;
        self.engine.piece_at(sq).map(PieceView::from)
    }

    fn select_view(&mut self, row: u32, col: u32) -> SelectionView {
        match square(row, col) {
            Some(sq) => self.engine.select(sq).into(),
            None => {
                self.engine.clear_selection();
                SelectionView::Cleared
            }
        }
    }

    /// Returns the wrapped engine.
    pub fn engine(&self) -> &ChessEngine {
        &self.engine
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}
