//! Two-party draw-offer negotiation.
//!
//! Each side may offer a draw at most once per game. An offer can be answered
//! only by the other side, and every action (including rejected ones) leaves
//! a timestamped line in the negotiation transcript.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::rules::chess_types::Side;

/// Why a draw action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawRejection {
    AlreadyRequested(Side),
    NoOutstandingRequest,
    OwnOffer(Side),
    AlreadyAccepted,
    GameOver,
}

impl fmt::Display for DrawRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawRejection::AlreadyRequested(side) => {
                write!(f, "{side} has already offered a draw this game")
            }
            DrawRejection::NoOutstandingRequest => f.write_str("there is no draw offer to answer"),
            DrawRejection::OwnOffer(side) => {
                write!(f, "{side} cannot answer their own draw offer")
            }
            DrawRejection::AlreadyAccepted => f.write_str("a draw has already been agreed"),
            DrawRejection::GameOver => f.write_str("the game is already over"),
        }
    }
}

/// Outcome of a draw action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReply {
    Requested(Side),
    Accepted(Side),
    Declined(Side),
    Rejected(DrawRejection),
}

impl DrawReply {
    pub fn is_success(&self) -> bool {
        !matches!(self, DrawReply::Rejected(_))
    }
}

/// One informational line of the negotiation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub at: DateTime<Utc>,
    pub text: String,
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.at.format("%H:%M:%S"), self.text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawNegotiation {
    requested_by: Option<Side>,
    accepted_by: Option<Side>,
    has_requested: [bool; 2],
    transcript: Vec<TranscriptEntry>,
}

impl DrawNegotiation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The side whose offer is waiting for an answer.
    pub fn outstanding(&self) -> Option<Side> {
        if self.accepted_by.is_some() {
            None
        } else {
            self.requested_by
        }
    }

    pub fn requested_by(&self) -> Option<Side> {
        self.requested_by
    }

    pub fn accepted_by(&self) -> Option<Side> {
        self.accepted_by
    }

    pub fn has_requested(&self, side: Side) -> bool {
        self.has_requested[side.index()]
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn request(&mut self, side: Side) -> DrawReply {
        if self.accepted_by.is_some() {
            return self.reject(DrawRejection::AlreadyAccepted);
        }
        if self.has_requested[side.index()] {
            return self.reject(DrawRejection::AlreadyRequested(side));
        }

        self.has_requested[side.index()] = true;
        match self.requested_by.replace(side) {
            Some(previous) => self.note(format!(
                "{side} offers a draw, replacing {previous}'s open offer."
            )),
            None => self.note(format!("{side} offers a draw.")),
        }
        DrawReply::Requested(side)
    }

    pub fn accept(&mut self, side: Side) -> DrawReply {
        if self.accepted_by.is_some() {
            return self.reject(DrawRejection::AlreadyAccepted);
        }
        let Some(requester) = self.requested_by else {
            return self.reject(DrawRejection::NoOutstandingRequest);
        };
        if requester == side {
            return self.reject(DrawRejection::OwnOffer(side));
        }

        self.accepted_by = Some(side);
        self.note(format!("{side} accepts {requester}'s draw offer."));
        DrawReply::Accepted(side)
    }

    /// Refuse the outstanding offer. The offering side's one-offer-per-game
    /// flag stays set.
    pub fn decline(&mut self, side: Side) -> DrawReply {
        if self.accepted_by.is_some() {
            return self.reject(DrawRejection::AlreadyAccepted);
        }
        let Some(requester) = self.requested_by else {
            return self.reject(DrawRejection::NoOutstandingRequest);
        };
        if requester == side {
            return self.reject(DrawRejection::OwnOffer(side));
        }

        self.requested_by = None;
        self.note(format!("{side} declines {requester}'s draw offer."));
        DrawReply::Declined(side)
    }

    /// Withdraw an unanswered offer after the position changed underneath it.
    pub fn lapse(&mut self, cause: &str) {
        if self.accepted_by.is_some() {
            return;
        }
        if let Some(requester) = self.requested_by.take() {
            self.note(format!("{requester}'s draw offer lapsed: {cause}."));
        }
    }

    pub fn reject(&mut self, reason: DrawRejection) -> DrawReply {
        self.note(format!("Draw action refused: {reason}."));
        DrawReply::Rejected(reason)
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.transcript.push(TranscriptEntry {
            at: Utc::now(),
            text: text.into(),
        });
    }
}
