//! Interactive text chess board.
//!
//! Run with:
//! `cargo run --release`
//! `RUST_LOG=chess_session=debug cargo run` to trace session transitions on stderr.

use chess_session::config::SessionConfig;
use chess_session::front::board_loop::run_stdio_loop;
use chess_session::session::game_session::GameSession;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SessionConfig::from_env().map_err(|e| e.to_string())?;
    let session = GameSession::from_config(config).map_err(|e| e.to_string())?;

    run_stdio_loop(session).map_err(|e| e.to_string())
}
