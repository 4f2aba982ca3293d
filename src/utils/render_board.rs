//! Terminal-oriented Unicode board renderer.
//!
//! Draws any rules engine's position by asking only `occupant_at`, so the
//! front-end needs no knowledge of the engine's internal representation.

use crate::rules::chess_types::{BoardSquare, Occupant, PieceKind, Side};
use crate::rules::rules_engine::RulesEngine;

/// Render the board to a Unicode string, White at the bottom.
pub fn render_board<R: RulesEngine>(rules: &R, position: &R::Position) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            let occupant = BoardSquare::new(file, rank)
                .ok()
                .and_then(|square| rules.occupant_at(position, square));
            match occupant {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

/// Captured pieces as glyphs, e.g. `♟♟♞`.
pub fn render_pieces(side: Side, kinds: &[PieceKind]) -> String {
    kinds
        .iter()
        .map(|&kind| piece_to_unicode(Occupant { side, kind }))
        .collect()
}

pub fn piece_to_unicode(piece: Occupant) -> char {
    match (piece.side, piece.kind) {
        (Side::White, PieceKind::Pawn) => '♙',
        (Side::White, PieceKind::Knight) => '♘',
        (Side::White, PieceKind::Bishop) => '♗',
        (Side::White, PieceKind::Rook) => '♖',
        (Side::White, PieceKind::Queen) => '♕',
        (Side::White, PieceKind::King) => '♔',
        (Side::Black, PieceKind::Pawn) => '♟',
        (Side::Black, PieceKind::Knight) => '♞',
        (Side::Black, PieceKind::Bishop) => '♝',
        (Side::Black, PieceKind::Rook) => '♜',
        (Side::Black, PieceKind::Queen) => '♛',
        (Side::Black, PieceKind::King) => '♚',
    }
}
