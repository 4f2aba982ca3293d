//! Read-only projection of a session for presentation layers.
//!
//! Front-ends render from a `SessionView` and never reach into the session's
//! internals, so the session stays the single owner of game state.

use serde::Serialize;

use crate::errors::SessionErrors;
use crate::rules::chess_types::Side;
use crate::rules::rules_engine::RulesEngine;
use crate::session::captured_pieces::CapturedPieces;
use crate::session::draw_negotiation::TranscriptEntry;
use crate::session::game_session::GameSession;
use crate::session::game_status::GamePhase;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub snapshot: String,
    pub side_to_move: Side,
    pub status: String,
    pub phase: GamePhase,
    pub white_moves: Vec<String>,
    pub black_moves: Vec<String>,
    pub captured: CapturedPieces,
    pub material_balance: i64,
    pub can_undo: bool,
    pub can_redo: bool,
    pub draw_offered_by: Option<Side>,
    pub draw_transcript: Vec<TranscriptEntry>,
}

impl SessionView {
    pub fn to_json(&self) -> Result<String, SessionErrors> {
        serde_json::to_string_pretty(self).map_err(|e| SessionErrors::ViewSerialization(e.to_string()))
    }
}

impl<R: RulesEngine> GameSession<R> {
    pub fn view(&self) -> SessionView {
        let moves_by = |side: Side| {
            self.move_history()
                .iter()
                .filter(|record| record.mover == side)
                .map(|record| record.notation.clone())
                .collect::<Vec<_>>()
        };

        SessionView {
            snapshot: self.snapshot(),
            side_to_move: self.side_to_move(),
            status: self.status_text(),
            phase: self.phase(),
            white_moves: moves_by(Side::White),
            black_moves: moves_by(Side::Black),
            captured: self.captured().clone(),
            material_balance: self.captured().material_balance(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            draw_offered_by: self.draw().outstanding(),
            draw_transcript: self.draw().transcript().to_vec(),
        }
    }

    /// Move list as numbered pairs: `(move number, white, black)`.
    ///
    /// A game starting with Black to move gets an empty White slot in its
    /// first pair.
    pub fn move_pairs(&self) -> Vec<(usize, Option<String>, Option<String>)> {
        let first = self.start_move_number();
        let mut pairs: Vec<(usize, Option<String>, Option<String>)> = Vec::new();

        for record in self.move_history() {
            match record.mover {
                Side::White => {
                    pairs.push((first + pairs.len(), Some(record.notation.clone()), None));
                }
                Side::Black => match pairs.last_mut() {
                    Some((_, _, black @ None)) => *black = Some(record.notation.clone()),
                    _ => pairs.push((first + pairs.len(), None, Some(record.notation.clone()))),
                },
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SessionConfig;
    use crate::rules::chess_types::{MoveRequest, Side};
    use crate::session::game_session::GameSession;
    use crate::session::game_status::GamePhase;

    fn play_all(session: &mut GameSession, moves: &[&str]) {
        for lan in moves {
            let request = lan.parse::<MoveRequest>().expect("LAN should parse");
            assert!(session.attempt(request), "{lan} should be legal");
        }
    }

    #[test]
    fn view_splits_moves_by_side() {
        let mut session = GameSession::new();
        play_all(&mut session, &["e2e4", "d7d5", "e4d5"]);
        let view = session.view();

        assert_eq!(view.white_moves, vec!["e4", "exd5"]);
        assert_eq!(view.black_moves, vec!["d5"]);
        assert_eq!(view.side_to_move, Side::Black);
        assert_eq!(view.phase, GamePhase::InProgress);
        assert_eq!(view.material_balance, 1);
        assert!(view.can_undo);
        assert!(!view.can_redo);
    }

    #[test]
    fn move_pairs_handle_black_to_move_starts() {
        let mut session = GameSession::from_config(SessionConfig {
            start_fen: Some("4k3/4p3/8/8/8/8/4P3/4K3 b - - 0 1".to_owned()),
            ..SessionConfig::default()
        })
        .expect("FEN should parse");
        play_all(&mut session, &["e7e5", "e2e4", "e8d7"]);

        let pairs = session.move_pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], (1, None, Some("e5".to_owned())));
        assert_eq!(pairs[1], (2, Some("e4".to_owned()), Some("Kd7".to_owned())));
    }

    #[test]
    fn move_pairs_number_from_the_start_position() {
        let mut session = GameSession::from_config(SessionConfig {
            start_fen: Some("4k3/4p3/8/8/8/8/4P3/4K3 b - - 0 40".to_owned()),
            ..SessionConfig::default()
        })
        .expect("FEN should parse");
        play_all(&mut session, &["e7e5", "e2e4"]);

        assert_eq!(session.start_move_number(), 40);
        let pairs = session.move_pairs();
        assert_eq!(pairs[0], (40, None, Some("e5".to_owned())));
        assert_eq!(pairs[1], (41, Some("e4".to_owned()), None));
    }

    #[test]
    fn view_serializes_to_json() {
        let mut session = GameSession::new();
        play_all(&mut session, &["e2e4"]);
        session.request_draw();

        let json = session.view().to_json().expect("view should serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("JSON should parse");
        assert_eq!(value["side_to_move"], "black");
        assert_eq!(value["draw_offered_by"], "black");
        assert_eq!(value["white_moves"][0], "e4");
        assert_eq!(value["phase"], "in_progress");
    }
}
