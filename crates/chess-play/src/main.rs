//! chess-play - two players sharing one terminal.
//!
//! Reads moves from stdin, prints the board after each one and stops
//! accepting moves at checkmate or stalemate until the game is reset.

mod command;
mod config;
mod session;

use anyhow::Context;
use chess_engine::ChessEngine;
use clap::Parser;
use config::PlayConfig;
use session::Session;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Two-player chess in the terminal.
#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Two-player chess in the terminal")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value_os_t = PlayConfig::default_path())]
    config: PathBuf,

    /// Start from this position (piece placement and optional side to move)
    #[arg(long)]
    fen: Option<String>,

    /// Draw pieces as letters instead of Unicode symbols
    #[arg(long)]
    ascii: bool,

    /// Log filter, e.g. "debug" or "chess_engine=trace" (RUST_LOG wins if set)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = PlayConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    let level = args.log_level.as_deref().unwrap_or(&config.log.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.ascii {
        config.display.unicode = false;
    }

    let engine = match args.fen.as_deref().or(config.start_fen.as_deref()) {
        Some(fen) => ChessEngine::from_fen(fen)
            .with_context(|| format!("invalid position '{}'", fen))?,
        None => ChessEngine::new(),
    };
    tracing::info!(fen = %engine.to_fen(), "starting game");

    let mut session = Session::new(engine, config.display);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session.run(stdin.lock(), &mut stdout)?;
    Ok(())
}
