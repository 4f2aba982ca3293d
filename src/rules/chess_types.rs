//! Engine-neutral chess vocabulary.
//!
//! The session and its front-ends speak only these types; each
//! `RulesEngine` implementation converts to and from its own representation.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::SessionErrors;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Zero-based rank a pawn of this side promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Piece kind (side is carried separately).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase letter as used in FEN and long algebraic promotions.
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Result<Self, SessionErrors> {
        match c.to_ascii_lowercase() {
            'p' => Ok(PieceKind::Pawn),
            'n' => Ok(PieceKind::Knight),
            'b' => Ok(PieceKind::Bishop),
            'r' => Ok(PieceKind::Rook),
            'q' => Ok(PieceKind::Queen),
            'k' => Ok(PieceKind::King),
            _ => Err(SessionErrors::InvalidPieceChar(c)),
        }
    }

    /// Conventional material value in pawns. Kings count as zero.
    pub const fn material_value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

impl FromStr for PieceKind {
    type Err = SessionErrors;

    /// Accepts a single letter (`q`) or the full name (`queen`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(kind) = PieceKind::ALL
            .iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
        {
            return Ok(*kind);
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_char(c),
            _ => Err(SessionErrors::InvalidConfigValue {
                name: "piece".to_owned(),
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A board square. `file` and `rank` are zero-based, so `a1 == (0, 0)` and
/// `h8 == (7, 7)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSquare {
    file: u8,
    rank: u8,
}

impl BoardSquare {
    pub fn new(file: u8, rank: u8) -> Result<Self, SessionErrors> {
        if file > 7 || rank > 7 {
            return Err(SessionErrors::InvalidFileOrRank(file, rank));
        }
        Ok(Self { file, rank })
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Square index with `0 == a1`, `7 == h1` and `63 == h8`.
    #[inline]
    pub const fn index(self) -> u8 {
        self.rank * 8 + self.file
    }
}

impl FromStr for BoardSquare {
    type Err = SessionErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(SessionErrors::InvalidSquare(s.to_owned()));
        }

        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(SessionErrors::InvalidSquare(s.to_owned()));
        }

        BoardSquare::new(file - b'a', rank - b'1')
    }
}

impl fmt::Display for BoardSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file),
            char::from(b'1' + self.rank)
        )
    }
}

impl Serialize for BoardSquare {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A piece standing on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Occupant {
    pub side: Side,
    pub kind: PieceKind,
}

/// A move intent as reported by a board front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MoveRequest {
    pub from: BoardSquare,
    pub to: BoardSquare,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub fn new(from: BoardSquare, to: BoardSquare, promotion: Option<PieceKind>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }
}

impl FromStr for MoveRequest {
    type Err = SessionErrors;

    /// Parses long algebraic text: `e2e4`, `e7e8q`. Castling is written as the
    /// king's two-square move (`e1g1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(SessionErrors::InvalidMoveText(s.to_owned()));
        }

        let from = text[0..2]
            .parse::<BoardSquare>()
            .map_err(|_| SessionErrors::InvalidMoveText(s.to_owned()))?;
        let to = text[2..4]
            .parse::<BoardSquare>()
            .map_err(|_| SessionErrors::InvalidMoveText(s.to_owned()))?;
        let promotion = text[4..]
            .chars()
            .next()
            .map(PieceKind::from_char)
            .transpose()?;

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

/// Result of a successful move application.
#[derive(Debug, Clone)]
pub struct AppliedMove<P> {
    pub position: P,
    /// Standard algebraic notation relative to the position the move was
    /// played in, with `+`/`#` suffixes.
    pub notation: String,
}

/// Why a position is drawn by rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
        };
        f.write_str(text)
    }
}
