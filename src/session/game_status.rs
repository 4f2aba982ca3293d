//! Status text and phase derivation.
//!
//! Status is recomputed from the current position after every transition;
//! nothing here is stored independently of the position it describes.

use std::fmt;

use serde::Serialize;

use crate::rules::chess_types::{DrawReason, Side};
use crate::rules::rules_engine::RulesEngine;

/// Number of occurrences of one position that draws the game.
pub const REPETITION_DRAW_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check.
    Check(Side),
    Checkmate { winner: Side },
    Draw(DrawReason),
    DrawAgreed,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate { .. } | GameStatus::Draw(_) | GameStatus::DrawAgreed
        )
    }

    /// Result token for PGN export.
    pub fn pgn_result(&self) -> &'static str {
        match self {
            GameStatus::Checkmate {
                winner: Side::White,
            } => "1-0",
            GameStatus::Checkmate {
                winner: Side::Black,
            } => "0-1",
            GameStatus::Draw(_) | GameStatus::DrawAgreed => "1/2-1/2",
            GameStatus::Ongoing | GameStatus::Check(_) => "*",
        }
    }
}

/// The status line shown under the board. Empty while play is ordinary.
impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => Ok(()),
            GameStatus::Check(side) => write!(f, "Check! {side} to move."),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate! {winner} wins."),
            GameStatus::Draw(_) => f.write_str("Draw!"),
            GameStatus::DrawAgreed => f.write_str("Draw agreed."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Idle,
    InProgress,
    Terminal,
}

/// Status of `position`, where `occurrences` counts how often its repetition
/// key has appeared in the game including this time.
pub fn derive_status<R: RulesEngine>(
    rules: &R,
    position: &R::Position,
    occurrences: usize,
) -> GameStatus {
    if rules.is_checkmate(position) {
        GameStatus::Checkmate {
            winner: rules.side_to_move(position).opposite(),
        }
    } else if let Some(reason) = rules.draw_reason(position) {
        GameStatus::Draw(reason)
    } else if occurrences >= REPETITION_DRAW_COUNT {
        GameStatus::Draw(DrawReason::ThreefoldRepetition)
    } else if rules.is_check(position) {
        GameStatus::Check(rules.side_to_move(position))
    } else {
        GameStatus::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::shakmaty_rules::ShakmatyRules;

    #[test]
    fn status_text_matches_the_board_caption() {
        assert_eq!(GameStatus::Ongoing.to_string(), "");
        assert_eq!(
            GameStatus::Check(Side::Black).to_string(),
            "Check! Black to move."
        );
        assert_eq!(
            GameStatus::Checkmate {
                winner: Side::White
            }
            .to_string(),
            "Checkmate! White wins."
        );
        assert_eq!(GameStatus::Draw(DrawReason::Stalemate).to_string(), "Draw!");
    }

    #[test]
    fn checkmate_names_the_side_not_to_move() {
        let rules = ShakmatyRules;
        let mated = rules
            .from_snapshot("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("FEN should parse");
        assert_eq!(
            derive_status(&rules, &mated, 1),
            GameStatus::Checkmate {
                winner: Side::Black
            }
        );
    }

    #[test]
    fn repetition_only_counts_from_three() {
        let rules = ShakmatyRules;
        let start = rules.new_game();
        assert_eq!(derive_status(&rules, &start, 2), GameStatus::Ongoing);
        assert_eq!(
            derive_status(&rules, &start, 3),
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        );
        assert!(derive_status(&rules, &start, 3).is_terminal());
    }

    #[test]
    fn pgn_results() {
        assert_eq!(GameStatus::Ongoing.pgn_result(), "*");
        assert_eq!(
            GameStatus::Checkmate {
                winner: Side::Black
            }
            .pgn_result(),
            "0-1"
        );
        assert_eq!(GameStatus::DrawAgreed.pgn_result(), "1/2-1/2");
    }
}
