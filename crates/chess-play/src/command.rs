//! Command line parsing for the interactive session.

use chess_core::{Move, Square};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),
    #[error("'{0}' is not a square (expected something like e4)")]
    InvalidSquare(String),
    #[error("'{0}' needs a square argument")]
    MissingSquare(&'static str),
}

/// Commands typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a move, `e2e4` or `e2 e4`.
    Move(Move),
    /// List legal destinations of a piece.
    Moves(Square),
    /// Click a square.
    Select(Square),
    History,
    Board,
    Fen,
    Reset,
    Help,
    Quit,
    /// Blank line.
    Empty,
}

impl Command {
    /// Parse one input line.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let cmd = parts.next().unwrap_or("");

        match cmd.to_ascii_lowercase().as_str() {
            "" => Ok(Command::Empty),
            "moves" => Self::square_arg("moves", parts.next()).map(Command::Moves),
            "select" => Self::square_arg("select", parts.next()).map(Command::Select),
            "history" => Ok(Command::History),
            "board" => Ok(Command::Board),
            "fen" => Ok(Command::Fen),
            "reset" | "new" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Move::parse(input)
                .map(Command::Move)
                .ok_or_else(|| CommandError::Unknown(input.to_string())),
        }
    }

    fn square_arg(name: &'static str, arg: Option<&str>) -> Result<Square, CommandError> {
        let arg = arg.ok_or(CommandError::MissingSquare(name))?;
        Square::from_algebraic(arg).ok_or_else(|| CommandError::InvalidSquare(arg.to_string()))
    }
}

pub const HELP: &str = "\
Commands:
  e2e4, e2 e4     play a move
  moves <sq>      list legal destinations of the piece on <sq>
  select <sq>     click a square (pick up a piece, or drop the selected one)
  history         show the moves played so far
  board           redraw the board
  fen             print the position as FEN
  reset           start a new game
  help            show this text
  quit            leave";
