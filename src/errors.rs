//! Errors used throughout the session crate.
//!
//! Domain rejections (an illegal move, undo on an empty history, a draw offer
//! the rules do not allow) are ordinary return values and never show up here.
//! `SessionErrors` only covers input that could not be understood at all:
//! unparsable squares, piece letters and snapshots, and bad configuration.

use thiserror::Error;

/// Unified error type for the session crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionErrors {
    /// A square name such as `e4` could not be parsed.
    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    /// File or rank index outside `0..=7`.
    ///
    /// Payload: (file_index, rank_index) zero-based.
    #[error("invalid file or rank ({0}, {1})")]
    InvalidFileOrRank(u8, u8),

    /// A piece letter other than `p n b r q k` (either case).
    #[error("invalid piece letter '{0}'")]
    InvalidPieceChar(char),

    /// Move text that is not `<from><to>[piece]` long algebraic.
    #[error("invalid move text '{0}'")]
    InvalidMoveText(String),

    /// A position snapshot the rules engine rejected.
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// A configuration value that does not parse for its option.
    #[error("invalid value '{value}' for option {name}")]
    InvalidConfigValue { name: String, value: String },

    /// An option name the front-end does not know.
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// The session view could not be serialized.
    #[error("failed to serialize session view: {0}")]
    ViewSerialization(String),
}
