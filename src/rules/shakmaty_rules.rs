//! `RulesEngine` implementation backed by the `shakmaty` crate.
//!
//! Squares, sides and piece kinds are converted at this boundary; nothing
//! shakmaty-specific leaks into the session.

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position, Role, Square};

use crate::errors::SessionErrors;
use crate::rules::chess_types::{
    AppliedMove, BoardSquare, DrawReason, MoveRequest, Occupant, PieceKind, Side,
};
use crate::rules::rules_engine::RulesEngine;

/// Halfmove clock value at which the fifty-move rule applies.
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Stateless standard-chess rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShakmatyRules;

impl RulesEngine for ShakmatyRules {
    type Position = Chess;

    fn new_game(&self) -> Chess {
        Chess::default()
    }

    fn from_snapshot(&self, snapshot: &str) -> Result<Chess, SessionErrors> {
        let invalid = |reason: String| SessionErrors::InvalidFen {
            fen: snapshot.to_owned(),
            reason,
        };

        let fen: Fen = snapshot.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;
        Ok(position)
    }

    fn apply_move(&self, position: &Chess, request: &MoveRequest) -> Option<AppliedMove<Chess>> {
        let uci = UciMove::Normal {
            from: to_shakmaty_square(request.from),
            to: to_shakmaty_square(request.to),
            promotion: request.promotion.map(to_role),
        };

        let m = uci.to_move(position).ok()?;
        let san = San::from_move(position, &m);
        let next = position.clone().play(&m).ok()?;

        let suffix = if next.is_checkmate() {
            "#"
        } else if next.is_check() {
            "+"
        } else {
            ""
        };

        Some(AppliedMove {
            position: next,
            notation: format!("{san}{suffix}"),
        })
    }

    fn occupant_at(&self, position: &Chess, square: BoardSquare) -> Option<Occupant> {
        position
            .board()
            .piece_at(to_shakmaty_square(square))
            .map(|piece| Occupant {
                side: from_color(piece.color),
                kind: from_role(piece.role),
            })
    }

    fn side_to_move(&self, position: &Chess) -> Side {
        from_color(position.turn())
    }

    fn is_check(&self, position: &Chess) -> bool {
        position.is_check()
    }

    fn is_checkmate(&self, position: &Chess) -> bool {
        position.is_checkmate()
    }

    fn draw_reason(&self, position: &Chess) -> Option<DrawReason> {
        if position.is_stalemate() {
            Some(DrawReason::Stalemate)
        } else if position.is_insufficient_material() {
            Some(DrawReason::InsufficientMaterial)
        } else if position.halfmoves() >= FIFTY_MOVE_HALFMOVES {
            Some(DrawReason::FiftyMoveRule)
        } else {
            None
        }
    }

    fn snapshot(&self, position: &Chess) -> String {
        Fen::from_position(position.clone(), EnPassantMode::Legal).to_string()
    }

    fn fullmove_number(&self, position: &Chess) -> u32 {
        position.fullmoves().get()
    }

    fn legal_moves(&self, position: &Chess) -> Vec<MoveRequest> {
        position
            .legal_moves()
            .iter()
            .filter_map(|m| match UciMove::from_move(m, CastlingMode::Standard) {
                UciMove::Normal {
                    from,
                    to,
                    promotion,
                } => Some(MoveRequest {
                    from: from_shakmaty_square(from)?,
                    to: from_shakmaty_square(to)?,
                    promotion: promotion.map(from_role),
                }),
                _ => None,
            })
            .collect()
    }

    /// Placement, side to move, castling rights and en passant square; the
    /// two move counters are dropped.
    fn repetition_key(&self, position: &Chess) -> String {
        self.snapshot(position)
            .split_whitespace()
            .take(4)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn to_shakmaty_square(square: BoardSquare) -> Square {
    Square::new(u32::from(square.index()))
}

fn from_shakmaty_square(square: Square) -> Option<BoardSquare> {
    square.to_string().parse().ok()
}

fn from_color(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

fn to_role(kind: PieceKind) -> Role {
    match kind {
        PieceKind::Pawn => Role::Pawn,
        PieceKind::Knight => Role::Knight,
        PieceKind::Bishop => Role::Bishop,
        PieceKind::Rook => Role::Rook,
        PieceKind::Queen => Role::Queen,
        PieceKind::King => Role::King,
    }
}

fn from_role(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::chess_types::STARTING_POSITION_FEN;

    fn square(name: &str) -> BoardSquare {
        name.parse().expect("test square should parse")
    }

    fn play(rules: &ShakmatyRules, position: &Chess, lan: &str) -> AppliedMove<Chess> {
        let request = lan.parse::<MoveRequest>().expect("LAN should parse");
        rules
            .apply_move(position, &request)
            .expect("move should be legal")
    }

    #[test]
    fn starting_position_round_trips_through_snapshot() {
        let rules = ShakmatyRules;
        let start = rules.new_game();
        assert_eq!(rules.snapshot(&start), STARTING_POSITION_FEN);

        let restored = rules
            .from_snapshot(STARTING_POSITION_FEN)
            .expect("start FEN should parse");
        assert_eq!(rules.snapshot(&restored), STARTING_POSITION_FEN);
        assert_eq!(rules.legal_moves(&start).len(), 20);
    }

    #[test]
    fn invalid_snapshot_is_an_error() {
        let rules = ShakmatyRules;
        assert!(matches!(
            rules.from_snapshot("not a fen"),
            Err(SessionErrors::InvalidFen { .. })
        ));
    }

    #[test]
    fn apply_move_returns_san_and_leaves_input_untouched() {
        let rules = ShakmatyRules;
        let start = rules.new_game();
        let applied = play(&rules, &start, "e2e4");

        assert_eq!(applied.notation, "e4");
        assert_eq!(rules.side_to_move(&applied.position), Side::Black);
        assert_eq!(rules.snapshot(&start), STARTING_POSITION_FEN);
    }

    #[test]
    fn illegal_moves_are_rejected() {
        let rules = ShakmatyRules;
        let start = rules.new_game();
        for lan in ["e2e5", "e7e5", "e1e2", "a1a3"] {
            let request = lan.parse::<MoveRequest>().expect("LAN should parse");
            assert!(rules.apply_move(&start, &request).is_none(), "{lan}");
        }
    }

    #[test]
    fn castling_is_requested_as_a_king_move() {
        let rules = ShakmatyRules;
        let position = rules
            .from_snapshot("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let applied = play(&rules, &position, "e1g1");
        assert_eq!(applied.notation, "O-O");

        let castles = rules
            .legal_moves(&position)
            .into_iter()
            .filter(|m| m.from == square("e1") && (m.to == square("g1") || m.to == square("c1")))
            .count();
        assert_eq!(castles, 2);
    }

    #[test]
    fn occupants_and_check_markers() {
        let rules = ShakmatyRules;
        let start = rules.new_game();
        assert_eq!(
            rules.occupant_at(&start, square("d8")),
            Some(Occupant {
                side: Side::Black,
                kind: PieceKind::Queen
            })
        );
        assert_eq!(rules.occupant_at(&start, square("e4")), None);

        let mut position = start;
        for lan in ["f2f3", "e7e5", "g2g4"] {
            position = play(&rules, &position, lan).position;
        }
        let mate = play(&rules, &position, "d8h4");
        assert_eq!(mate.notation, "Qh4#");
        assert!(rules.is_checkmate(&mate.position));
        assert!(rules.is_check(&mate.position));
        assert!(!rules.is_draw(&mate.position));
    }

    #[test]
    fn draw_reasons_from_position() {
        let rules = ShakmatyRules;
        let stalemate = rules
            .from_snapshot("8/8/8/8/8/6q1/5k2/7K w - - 0 1")
            .expect("FEN should parse");
        assert_eq!(rules.draw_reason(&stalemate), Some(DrawReason::Stalemate));

        let bare_kings = rules
            .from_snapshot("8/8/8/4k3/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        assert_eq!(
            rules.draw_reason(&bare_kings),
            Some(DrawReason::InsufficientMaterial)
        );

        let fifty = rules
            .from_snapshot("4k3/8/8/8/8/8/8/R3K3 w - - 100 80")
            .expect("FEN should parse");
        assert_eq!(rules.draw_reason(&fifty), Some(DrawReason::FiftyMoveRule));
    }

    #[test]
    fn repetition_key_ignores_move_counters() {
        let rules = ShakmatyRules;
        let a = rules
            .from_snapshot("4k3/8/8/8/8/8/8/R3K3 w - - 3 10")
            .expect("FEN should parse");
        let b = rules
            .from_snapshot("4k3/8/8/8/8/8/8/R3K3 w - - 7 14")
            .expect("FEN should parse");
        assert_ne!(rules.snapshot(&a), rules.snapshot(&b));
        assert_eq!(rules.repetition_key(&a), rules.repetition_key(&b));
    }
}
