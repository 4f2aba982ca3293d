//! Per-side capture tallies.

use serde::Serialize;

use crate::rules::chess_types::{PieceKind, Side};

/// Pieces each side has lost, in the order they were taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapturedPieces {
    white: Vec<PieceKind>,
    black: Vec<PieceKind>,
}

impl CapturedPieces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `side` lost a piece of `kind`.
    pub fn record(&mut self, side: Side, kind: PieceKind) {
        match side {
            Side::White => self.white.push(kind),
            Side::Black => self.black.push(kind),
        }
    }

    pub fn lost_by(&self, side: Side) -> &[PieceKind] {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }

    pub fn total(&self) -> usize {
        self.white.len() + self.black.len()
    }

    pub fn material_lost(&self, side: Side) -> u32 {
        self.lost_by(side)
            .iter()
            .map(|kind| kind.material_value())
            .sum()
    }

    /// Material difference from White's point of view.
    pub fn material_balance(&self) -> i64 {
        i64::from(self.material_lost(Side::Black)) - i64::from(self.material_lost(Side::White))
    }
}
