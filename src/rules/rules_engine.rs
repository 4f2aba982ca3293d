//! Rules-engine abstraction consumed by the game session.
//!
//! The session never decides legality itself. Every question about a position
//! goes through this trait as a value-in/value-out call, so implementations
//! hold no state between calls and positions are never mutated in place.

use std::fmt;

use crate::errors::SessionErrors;
use crate::rules::chess_types::{AppliedMove, BoardSquare, DrawReason, MoveRequest, Occupant, Side};

pub trait RulesEngine: Clone + fmt::Debug {
    /// Immutable position value produced by this engine.
    type Position: Clone + fmt::Debug;

    /// The canonical starting position.
    fn new_game(&self) -> Self::Position;

    /// Rebuild a position from a snapshot produced by [`RulesEngine::snapshot`].
    #[allow(clippy::wrong_self_convention)]
    fn from_snapshot(&self, snapshot: &str) -> Result<Self::Position, SessionErrors>;

    /// Validate `request` against `position` and return the resulting
    /// position with the move's notation. `None` means the move is illegal.
    fn apply_move(
        &self,
        position: &Self::Position,
        request: &MoveRequest,
    ) -> Option<AppliedMove<Self::Position>>;

    fn occupant_at(&self, position: &Self::Position, square: BoardSquare) -> Option<Occupant>;

    fn side_to_move(&self, position: &Self::Position) -> Side;

    fn is_check(&self, position: &Self::Position) -> bool;

    fn is_checkmate(&self, position: &Self::Position) -> bool;

    /// Draw conditions visible from the position alone. Repetition needs the
    /// game's history and is detected by the session.
    fn draw_reason(&self, position: &Self::Position) -> Option<DrawReason>;

    fn is_draw(&self, position: &Self::Position) -> bool {
        self.draw_reason(position).is_some()
    }

    /// Serializable snapshot of the position, usable for restoration and
    /// comparison.
    fn snapshot(&self, position: &Self::Position) -> String;

    fn legal_moves(&self, position: &Self::Position) -> Vec<MoveRequest>;

    /// Number of the full move about to be played, starting at 1.
    fn fullmove_number(&self, position: &Self::Position) -> u32;

    /// Key under which two positions count as the same for repetition. The
    /// default is the full snapshot; engines whose snapshots carry move
    /// counters should strip them.
    fn repetition_key(&self, position: &Self::Position) -> String {
        self.snapshot(position)
    }
}
