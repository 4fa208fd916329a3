//! Chess rules engine for a two-player board UI.
//!
//! This crate provides:
//! - [`Board`] - 8x8 mailbox of optional pieces, cheap to copy
//! - [`Position`] - board, side to move and king locations
//! - [`ChessEngine`] - game management with history, status and selection
//! - [`SharedEngine`] - the same engine behind a shared lock
//! - Move generation, legality filtering and perft
//!
//! # Architecture
//!
//! Moves are generated per piece as pseudo-legal targets. A target is legal
//! when playing it on a copy of the board leaves the mover's king
//! unattacked, so the live board is never mutated speculatively.
//!
//! # Example
//!
//! ```
//! use chess_engine::{ChessEngine, GameStatus};
//! use chess_core::Square;
//!
//! let mut engine = ChessEngine::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//!
//! assert_eq!(engine.legal_moves(e2).len(), 2);
//! assert!(engine.attempt_move(e2, e4));
//! assert_eq!(engine.status(), GameStatus::Active);
//! println!("Position after 1.e4: {}", engine.to_fen());
//! ```

mod board;
mod engine;
pub mod movegen;
mod position;
mod shared;
mod status;

pub use board::{Board, BoardDisplay, Glyphs};
pub use engine::{ChessEngine, MoveError, Selection};
pub use movegen::{is_square_attacked, pseudo_legal_moves, Targets};
pub use position::{KingLocations, MoveRecord, Position};
pub use shared::SharedEngine;
pub use status::{CheckStatus, GameStatus};
