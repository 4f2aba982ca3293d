//! Uniform random move selection.
//!
//! Used by the front-end's `random` command for solo play and by tests that
//! drive the session through long arbitrary games.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::rules::chess_types::MoveRequest;
use crate::rules::rules_engine::RulesEngine;
use crate::session::game_session::GameSession;

/// Pick one legal move uniformly, or `None` when the game is over.
pub fn choose_random_move<R, G>(session: &GameSession<R>, rng: &mut G) -> Option<MoveRequest>
where
    R: RulesEngine,
    G: Rng + ?Sized,
{
    session.legal_moves().as_slice().choose(rng).copied()
}

/// Play a random legal move and return its notation.
pub fn play_random_move<R, G>(session: &mut GameSession<R>, rng: &mut G) -> Option<String>
where
    R: RulesEngine,
    G: Rng + ?Sized,
{
    let request = choose_random_move(session, rng)?;
    if !session.attempt(request) {
        return None;
    }
    session
        .move_history()
        .last()
        .map(|record| record.notation.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::session::game_status::GamePhase;

    const PLIES: usize = 60;

    #[test]
    fn random_moves_are_always_accepted() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut session = GameSession::new();

        for _ in 0..PLIES {
            if session.phase() == GamePhase::Terminal {
                assert!(play_random_move(&mut session, &mut rng).is_none());
                break;
            }
            let before = session.move_history().len();
            let notation = play_random_move(&mut session, &mut rng).expect("legal move should play");
            assert_eq!(session.move_history().len(), before + 1);
            assert_eq!(session.move_history()[before].notation, notation);
        }
    }

    #[test]
    fn undo_then_redo_restores_every_random_game_state() {
        for seed in [7_u64, 42, 2024] {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session = GameSession::new();

            for _ in 0..PLIES {
                if play_random_move(&mut session, &mut rng).is_none() {
                    break;
                }

                let snapshot = session.snapshot();
                let history = session.move_history().to_vec();
                let captured_total = session.captured().total();

                assert!(session.undo());
                assert!(session.captured().total() >= captured_total);
                assert!(session.redo());

                assert_eq!(session.snapshot(), snapshot, "seed {seed}");
                assert_eq!(session.move_history(), history.as_slice(), "seed {seed}");
                assert_eq!(session.captured().total(), captured_total, "seed {seed}");
                assert!(!session.can_redo());
            }
        }
    }

    #[test]
    fn full_unwind_returns_to_the_start() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut session = GameSession::new();
        let start = session.snapshot();
        let mut snapshots = vec![start.clone()];

        for _ in 0..PLIES {
            if play_random_move(&mut session, &mut rng).is_none() {
                break;
            }
            snapshots.push(session.snapshot());
        }

        while session.undo() {
            snapshots.pop();
            assert_eq!(Some(&session.snapshot()), snapshots.last());
        }
        assert_eq!(session.snapshot(), start);
        assert_eq!(snapshots.len(), 1);
        assert!(session.position_history().is_empty());
        assert!(session.move_history().is_empty());
        assert!(session.can_redo());
    }
}
