//! The interactive loop: reads commands, drives the engine, prints results.

use std::io::{self, BufRead, Write};

use chess_core::Square;
use chess_engine::{ChessEngine, Glyphs, MoveRecord, Selection};

use crate::command::{Command, HELP};
use crate::config::DisplayConfig;

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One game at the terminal.
pub struct Session {
    engine: ChessEngine,
    display: DisplayConfig,
}

impl Session {
    pub fn new(engine: ChessEngine, display: DisplayConfig) -> Self {
        Session { engine, display }
    }

    pub fn engine(&self) -> &ChessEngine {
        &self.engine
    }

    /// Reads commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        self.print_board(out, &[])?;
        writeln!(out, "{}", self.engine.status_message())?;

        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }

            let flow = match Command::parse(&line) {
                Ok(cmd) => self.handle(cmd, out)?,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Executes one command.
    pub fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<Flow> {
        match cmd {
            Command::Move(mv) => match self.engine.try_move(mv.from, mv.to) {
                Ok(record) => self.report_move(record, out)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Moves(sq) => {
                let targets = self.engine.legal_moves(sq);
                if targets.is_empty() {
                    writeln!(out, "no legal moves from {}", sq)?;
                } else {
                    writeln!(out, "{}: {}", sq, join(&targets))?;
                    if self.display.hints {
                        self.print_board(out, &targets)?;
                    }
                }
            }
            Command::Select(sq) => match self.engine.select(sq) {
                Selection::Ignored => writeln!(out, "the game is over; type 'reset' to play again")?,
                Selection::Selected { square, targets } => {
                    if targets.is_empty() {
                        writeln!(out, "selected {} (no legal moves)", square)?;
                    } else {
                        writeln!(out, "selected {}: {}", square, join(&targets))?;
                    }
                    if self.display.hints {
                        self.print_board(out, &targets)?;
                    }
                }
                Selection::Moved(record) => self.report_move(record, out)?,
                Selection::Cleared => writeln!(out, "selection cleared")?,
            },
            Command::History => self.print_history(out)?,
            Command::Board => {
                self.print_board(out, &[])?;
                writeln!(out, "{}", self.engine.status_message())?;
            }
            Command::Fen => writeln!(out, "{}", self.engine.to_fen())?,
            Command::Reset => {
                self.engine.reset();
                writeln!(out, "new game")?;
                self.print_board(out, &[])?;
                writeln!(out, "{}", self.engine.status_message())?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
        }
        Ok(Flow::Continue)
    }

    fn report_move<W: Write>(&self, record: MoveRecord, out: &mut W) -> io::Result<()> {
        write!(out, "{} {}", record.piece, record.as_move())?;
        if let Some(captured) = record.captured {
            write!(out, " takes {}", captured)?;
        }
        if record.promoted {
            write!(out, ", promotes to queen")?;
        }
        writeln!(out)?;
        self.print_board(out, &[])?;
        writeln!(out, "{}", self.engine.status_message())
    }

    fn print_board<W: Write>(&self, out: &mut W, highlights: &[Square]) -> io::Result<()> {
        let glyphs = if self.display.unicode {
            Glyphs::Unicode
        } else {
            Glyphs::Ascii
        };
        let view = self
            .engine
            .board()
            .display()
            .glyphs(glyphs)
            .coordinates(self.display.show_coordinates)
            .highlight(highlights);
        write!(out, "{}", view)
    }

    fn print_history<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let history = self.engine.move_history();
        if history.is_empty() {
            return writeln!(out, "no moves yet");
        }
        for (number, pair) in history.chunks(2).enumerate() {
            write!(out, "{}. {}", number + 1, pair[0].as_move())?;
            if let Some(reply) = pair.get(1) {
                write!(out, " {}", reply.as_move())?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

fn join(squares: &[Square]) -> String {
    squares
        .iter()
        .map(|sq| sq.to_algebraic())
        .collect::<Vec<_>>()
        .join(" ")
}
