//! Crate root module declarations for the chess session project.
//!
//! A client-local chess game session: the move/undo/redo ledger, capture
//! tracking and draw negotiation (`session`) layered over a pluggable rules
//! engine (`rules`), with a text board front-end (`front`) and PGN/board
//! rendering helpers (`utils`).

pub mod config;
pub mod errors;

pub mod rules {
    pub mod chess_types;
    pub mod rules_engine;
    pub mod shakmaty_rules;
}

pub mod session {
    pub mod captured_pieces;
    pub mod draw_negotiation;
    pub mod game_session;
    pub mod game_status;
    pub mod random_mover;
    pub mod session_view;
}

pub mod utils {
    pub mod pgn;
    pub mod render_board;
}

pub mod front {
    pub mod board_loop;
}
