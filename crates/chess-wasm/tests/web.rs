//! Browser tests for the JavaScript-facing API.
//!
//! Run with: `wasm-pack test --headless --firefox crates/chess-wasm`

#![cfg(target_arch = "wasm32")]

use chess_wasm::ChessGame;
use serde::Deserialize;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Debug, Deserialize, PartialEq)]
struct Coord {
    row: u8,
    col: u8,
}

#[derive(Debug, Deserialize)]
struct PieceInfo {
    kind: String,
    color: String,
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct Click {
    kind: String,
    #[serde(default)]
    targets: Vec<Coord>,
    #[serde(default)]
    promoted: bool,
}

#[wasm_bindgen_test]
fn legal_moves_are_row_col_objects() {
    let game = ChessGame::new();
    let moves: Vec<Coord> = serde_wasm_bindgen::from_value(game.legal_moves(6, 4).unwrap()).unwrap();
    assert_eq!(moves, vec![Coord { row: 5, col: 4 }, Coord { row: 4, col: 4 }]);

    let off_board: Vec<Coord> =
        serde_wasm_bindgen::from_value(game.legal_moves(8, 0).unwrap()).unwrap();
    assert!(off_board.is_empty());
}

#[wasm_bindgen_test]
fn piece_at_returns_object_or_null() {
    let game = ChessGame::new();
    let king: PieceInfo = serde_wasm_bindgen::from_value(game.piece_at(0, 4).unwrap()).unwrap();
    assert_eq!(king.kind, "king");
    assert_eq!(king.color, "black");
    assert_eq!(king.symbol, "♚");

    assert!(game.piece_at(4, 4).unwrap().is_null());
    assert!(game.piece_at(9, 9).unwrap().is_null());
}

#[wasm_bindgen_test]
fn select_square_reports_each_step() {
    let mut game = ChessGame::new();

    let picked: Click = serde_wasm_bindgen::from_value(game.select_square(7, 6).unwrap()).unwrap();
    assert_eq!(picked.kind, "selected");
    assert_eq!(
        picked.targets,
        vec![Coord { row: 5, col: 5 }, Coord { row: 5, col: 7 }]
    );

    let moved: Click = serde_wasm_bindgen::from_value(game.select_square(5, 5).unwrap()).unwrap();
    assert_eq!(moved.kind, "moved");
    assert!(!moved.promoted);
    assert_eq!(game.current_turn(), "black");

    let empty: Click = serde_wasm_bindgen::from_value(game.select_square(4, 4).unwrap()).unwrap();
    assert_eq!(empty.kind, "cleared");
}

#[wasm_bindgen_test]
fn invalid_fen_is_a_js_error() {
    assert!(ChessGame::from_fen("not a position").is_err());
    assert!(ChessGame::from_fen("4k3/8/8/8/8/8/8/4R1K1 w").is_err());
}
