//! Game session aggregate: the move/undo/redo ledger, capture tallies and
//! draw negotiation layered over a rules engine.
//!
//! Every transition builds the complete next state on a copy of the session
//! and commits it with one assignment, so callers never observe a
//! half-applied update (history moved on but captures not, and so on).
//! Positions are immutable values; undo restores a stored position instead of
//! asking the engine to reverse a move.

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::{DrawAcceptance, SessionConfig};
use crate::errors::SessionErrors;
use crate::rules::chess_types::{BoardSquare, MoveRequest, Occupant, PieceKind, Side};
use crate::rules::rules_engine::RulesEngine;
use crate::rules::shakmaty_rules::ShakmatyRules;
use crate::session::captured_pieces::CapturedPieces;
use crate::session::draw_negotiation::{DrawNegotiation, DrawRejection, DrawReply};
use crate::session::game_status::{derive_status, GamePhase, GameStatus};

/// One played move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// Standard algebraic notation, relative to the position it was played in.
    pub notation: String,
    pub mover: Side,
    /// The normalized request, kept so redo can replay it through the engine.
    pub request: MoveRequest,
    pub captured: Option<PieceKind>,
}

#[derive(Debug, Clone)]
pub struct GameSession<R: RulesEngine = ShakmatyRules> {
    rules: R,
    config: SessionConfig,
    start: R::Position,
    current: R::Position,
    move_history: Vec<MoveRecord>,
    // Position before each entry of `move_history`, same index.
    position_history: Vec<R::Position>,
    // Top is the most recent undo.
    redo_stack: Vec<MoveRecord>,
    captured: CapturedPieces,
    draw: DrawNegotiation,
    status: GameStatus,
}

impl GameSession<ShakmatyRules> {
    /// Standard game with default configuration.
    pub fn new() -> Self {
        let rules = ShakmatyRules;
        let start = rules.new_game();
        Self::fresh(rules, SessionConfig::default(), start)
    }

    pub fn from_config(config: SessionConfig) -> Result<Self, SessionErrors> {
        Self::with_rules(ShakmatyRules, config)
    }
}

impl Default for GameSession<ShakmatyRules> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RulesEngine> GameSession<R> {
    pub fn with_rules(rules: R, config: SessionConfig) -> Result<Self, SessionErrors> {
        let start = match config.start_fen.as_deref() {
            Some(fen) => rules.from_snapshot(fen)?,
            None => rules.new_game(),
        };
        Ok(Self::fresh(rules, config, start))
    }

    fn fresh(rules: R, config: SessionConfig, start: R::Position) -> Self {
        let status = derive_status(&rules, &start, 1);
        Self {
            current: start.clone(),
            start,
            rules,
            config,
            move_history: Vec::new(),
            position_history: Vec::new(),
            redo_stack: Vec::new(),
            captured: CapturedPieces::new(),
            draw: DrawNegotiation::new(),
            status,
        }
    }

    // --- Read-only view of the aggregate ---

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn current_position(&self) -> &R::Position {
        &self.current
    }

    pub fn snapshot(&self) -> String {
        self.rules.snapshot(&self.current)
    }

    pub fn start_snapshot(&self) -> String {
        self.rules.snapshot(&self.start)
    }

    /// Move number of the first move in the history, taken from the start
    /// position.
    pub fn start_move_number(&self) -> usize {
        self.rules.fullmove_number(&self.start) as usize
    }

    pub fn side_to_move(&self) -> Side {
        self.rules.side_to_move(&self.current)
    }

    pub fn occupant_at(&self, square: BoardSquare) -> Option<Occupant> {
        self.rules.occupant_at(&self.current, square)
    }

    pub fn legal_moves(&self) -> Vec<MoveRequest> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        self.rules.legal_moves(&self.current)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Caption shown under the board; empty while nothing is notable.
    pub fn status_text(&self) -> String {
        self.status.to_string()
    }

    pub fn phase(&self) -> GamePhase {
        if self.status.is_terminal() {
            GamePhase::Terminal
        } else if self.move_history.is_empty() {
            GamePhase::Idle
        } else {
            GamePhase::InProgress
        }
    }

    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    pub fn position_history(&self) -> &[R::Position] {
        &self.position_history
    }

    pub fn redo_stack(&self) -> &[MoveRecord] {
        &self.redo_stack
    }

    pub fn can_undo(&self) -> bool {
        !self.move_history.is_empty() && self.status != GameStatus::DrawAgreed
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty() && self.status != GameStatus::DrawAgreed
    }

    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    pub fn draw(&self) -> &DrawNegotiation {
        &self.draw
    }

    /// Change one configuration option. Takes effect from the next move, draw
    /// acceptance or reset.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), SessionErrors> {
        let mut config = self.config.clone();
        config.set_option(name, value)?;
        self.config = config;
        Ok(())
    }

    // --- Move ledger ---

    /// Try to play `from -> to`. Returns `false`, leaving the session
    /// untouched, when the move is illegal or the game is over.
    ///
    /// A pawn reaching its last rank promotes to `promotion`, or to the
    /// configured default piece when none is given; `promotion` is ignored
    /// for every other move.
    #[instrument(skip(self))]
    pub fn attempt_move(
        &mut self,
        from: BoardSquare,
        to: BoardSquare,
        promotion: Option<PieceKind>,
    ) -> bool {
        match self.after_move(from, to, promotion) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    pub fn attempt(&mut self, request: MoveRequest) -> bool {
        self.attempt_move(request.from, request.to, request.promotion)
    }

    /// Take back the last move. No-op on an empty history.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        match self.after_undo() {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    /// Replay the most recently undone move. No-op on an empty redo stack.
    #[instrument(skip(self))]
    pub fn redo(&mut self) -> bool {
        match self.after_redo() {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    /// Back to the start position with every history, tally and negotiation
    /// cleared. Configuration is kept.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        *self = Self::fresh(self.rules.clone(), self.config.clone(), self.start.clone());
        info!("game reset");
    }

    fn after_move(
        &self,
        from: BoardSquare,
        to: BoardSquare,
        promotion: Option<PieceKind>,
    ) -> Option<Self> {
        if self.status.is_terminal() {
            debug!(status = ?self.status, "move refused: game is over");
            return None;
        }

        let mover = self.side_to_move();
        let request = self.normalized_request(from, to, promotion, mover);
        let Some(applied) = self.rules.apply_move(&self.current, &request) else {
            debug!(%request, "illegal move");
            return None;
        };
        let captured = self.captured_by(&request, mover);

        let mut next = self.clone();
        let previous = std::mem::replace(&mut next.current, applied.position);
        next.position_history.push(previous);
        debug!(notation = %applied.notation, ?captured, "move played");
        next.move_history.push(MoveRecord {
            notation: applied.notation,
            mover,
            request,
            captured,
        });
        next.redo_stack.clear();
        if let Some(kind) = captured {
            next.captured.record(mover.opposite(), kind);
        }
        next.draw.lapse("a move was played");
        next.refresh_status();
        Some(next)
    }

    fn after_undo(&self) -> Option<Self> {
        if !self.can_undo() {
            return None;
        }

        let mut next = self.clone();
        let record = next.move_history.pop()?;
        next.current = next.position_history.pop()?;
        debug!(notation = %record.notation, "move taken back");
        next.redo_stack.push(record);
        next.draw.lapse("a move was taken back");
        next.refresh_status();
        Some(next)
    }

    fn after_redo(&self) -> Option<Self> {
        if !self.can_redo() {
            return None;
        }

        let record = self.redo_stack.last()?;
        let Some(applied) = self.rules.apply_move(&self.current, &record.request) else {
            warn!(notation = %record.notation, "redo refused: move is no longer legal");
            return None;
        };

        let mut next = self.clone();
        let record = next.redo_stack.pop()?;
        let previous = std::mem::replace(&mut next.current, applied.position);
        next.position_history.push(previous);
        debug!(notation = %record.notation, "move replayed");
        next.move_history.push(record);
        next.draw.lapse("a move was replayed");
        next.refresh_status();
        Some(next)
    }

    fn normalized_request(
        &self,
        from: BoardSquare,
        to: BoardSquare,
        promotion: Option<PieceKind>,
        mover: Side,
    ) -> MoveRequest {
        let promotes = to.rank() == mover.promotion_rank()
            && self
                .occupant_at(from)
                .is_some_and(|piece| piece.side == mover && piece.kind == PieceKind::Pawn);

        let promotion = if promotes {
            Some(promotion.unwrap_or(self.config.default_promotion))
        } else {
            None
        };
        MoveRequest::new(from, to, promotion)
    }

    /// Piece taken by `request`, read from the position before the move.
    ///
    /// En passant lands on an empty square; the taken pawn stands on the
    /// destination file, on the rank the capturing pawn started from.
    fn captured_by(&self, request: &MoveRequest, mover: Side) -> Option<PieceKind> {
        if let Some(target) = self.occupant_at(request.to) {
            return (target.side != mover).then_some(target.kind);
        }

        let moving = self.occupant_at(request.from)?;
        if moving.kind != PieceKind::Pawn || request.from.file() == request.to.file() {
            return None;
        }

        let passed = BoardSquare::new(request.to.file(), request.from.rank()).ok()?;
        self.occupant_at(passed)
            .filter(|piece| piece.side != mover && piece.kind == PieceKind::Pawn)
            .map(|piece| piece.kind)
    }

    fn refresh_status(&mut self) {
        let key = self.rules.repetition_key(&self.current);
        let earlier = self
            .position_history
            .iter()
            .filter(|position| self.rules.repetition_key(position) == key)
            .count();
        self.status = derive_status(&self.rules, &self.current, earlier + 1);
    }

    // --- Draw negotiation ---

    /// Offer a draw on behalf of the side to move.
    pub fn request_draw(&mut self) -> DrawReply {
        self.request_draw_as(self.side_to_move())
    }

    #[instrument(skip(self))]
    pub fn request_draw_as(&mut self, side: Side) -> DrawReply {
        if self.status.is_terminal() {
            return self.draw.reject(DrawRejection::GameOver);
        }
        self.draw.request(side)
    }

    /// Accept the open offer. The acceptor is the side not to move: an offer
    /// is made on the offering side's turn and lapses as soon as the
    /// position changes.
    pub fn accept_draw(&mut self) -> DrawReply {
        self.accept_draw_as(self.side_to_move().opposite())
    }

    #[instrument(skip(self))]
    pub fn accept_draw_as(&mut self, side: Side) -> DrawReply {
        if self.status.is_terminal() {
            return self.draw.reject(DrawRejection::GameOver);
        }

        let mut draw = self.draw.clone();
        let reply = draw.accept(side);
        let DrawReply::Accepted(by) = reply else {
            self.draw = draw;
            return reply;
        };

        let next = match self.config.on_draw_accepted {
            DrawAcceptance::Reset => {
                let mut next =
                    Self::fresh(self.rules.clone(), self.config.clone(), self.start.clone());
                next.draw
                    .note(format!("Draw agreed by {by}; a new game has started."));
                next
            }
            DrawAcceptance::Record => {
                let mut next = self.clone();
                next.draw = draw;
                next.status = GameStatus::DrawAgreed;
                next
            }
        };

        info!(accepted_by = %by, policy = %self.config.on_draw_accepted, "draw agreed");
        *self = next;
        reply
    }

    /// Decline the open offer on behalf of the side not to move.
    pub fn decline_draw(&mut self) -> DrawReply {
        self.decline_draw_as(self.side_to_move().opposite())
    }

    #[instrument(skip(self))]
    pub fn decline_draw_as(&mut self, side: Side) -> DrawReply {
        self.draw.decline(side)
    }
}
