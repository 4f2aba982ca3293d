//! Session configuration.
//!
//! Defaults reproduce the standard game: normal starting position, automatic
//! queen promotion, and an accepted draw restarting the game. Each knob can be
//! overridden from the environment or, at runtime, through the front-end's
//! `set` command.

use std::fmt;
use std::str::FromStr;

use crate::errors::SessionErrors;
use crate::rules::chess_types::PieceKind;

pub const ENV_START_FEN: &str = "CHESS_SESSION_START_FEN";
pub const ENV_PROMOTION: &str = "CHESS_SESSION_PROMOTION";
pub const ENV_DRAW_ACCEPT: &str = "CHESS_SESSION_DRAW_ACCEPT";

/// What an accepted draw offer does to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawAcceptance {
    /// Start a fresh game.
    #[default]
    Reset,
    /// Keep the history and end the game as drawn by agreement.
    Record,
}

impl FromStr for DrawAcceptance {
    type Err = SessionErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("reset") {
            Ok(DrawAcceptance::Reset)
        } else if value.eq_ignore_ascii_case("record") {
            Ok(DrawAcceptance::Record)
        } else {
            Err(SessionErrors::InvalidConfigValue {
                name: "draw acceptance".to_owned(),
                value: s.to_owned(),
            })
        }
    }
}

impl fmt::Display for DrawAcceptance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawAcceptance::Reset => f.write_str("reset"),
            DrawAcceptance::Record => f.write_str("record"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Custom start position; `None` means the standard one.
    pub start_fen: Option<String>,
    /// Piece a pawn becomes when the move intent does not name one.
    pub default_promotion: PieceKind,
    pub on_draw_accepted: DrawAcceptance,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_fen: None,
            default_promotion: PieceKind::Queen,
            on_draw_accepted: DrawAcceptance::Reset,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, SessionErrors> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any name-to-value source. Unset or blank values
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SessionErrors> {
        let mut config = Self::default();
        let value_of = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(fen) = value_of(ENV_START_FEN) {
            config.start_fen = Some(fen.trim().to_owned());
        }
        if let Some(piece) = value_of(ENV_PROMOTION) {
            config.set_option("promotion", &piece)?;
        }
        if let Some(policy) = value_of(ENV_DRAW_ACCEPT) {
            config.set_option("drawaccept", &policy)?;
        }

        Ok(config)
    }

    /// Apply one named option, as the front-end's `set <name> <value>` does.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), SessionErrors> {
        if name.eq_ignore_ascii_case("promotion") {
            let piece = value
                .parse::<PieceKind>()
                .map_err(|_| invalid_value(name, value))?;
            if matches!(piece, PieceKind::Pawn | PieceKind::King) {
                return Err(invalid_value(name, value));
            }
            self.default_promotion = piece;
        } else if name.eq_ignore_ascii_case("drawaccept") {
            self.on_draw_accepted = value.parse()?;
        } else {
            return Err(SessionErrors::UnknownOption(name.to_owned()));
        }
        Ok(())
    }
}

fn invalid_value(name: &str, value: &str) -> SessionErrors {
    SessionErrors::InvalidConfigValue {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}
