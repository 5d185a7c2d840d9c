//! Core vocabulary shared between the rules boundary and the UI.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A board coordinate. File 0-7 maps to a-h, rank 0-7 maps to 1-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Both coordinates must be in 0..8.
    pub fn new(file: u8, rank: u8) -> Square {
        assert!(file < 8 && rank < 8, "square coordinates out of range");
        Square { file, rank }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank) as char
    }

    /// All 64 squares in board draw order: rank 8 down to rank 1,
    /// files a through h within each rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8)
            .rev()
            .flat_map(|rank| (0..8u8).map(move |file| Square::new(file, rank)))
    }
}

// Ordering follows draw order, so a `BTreeMap<Square, _>` iterates
// exactly as the board is rendered.
impl Ord for Square {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .rank
            .cmp(&self.rank)
            .then_with(|| self.file.cmp(&other.file))
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected algebraic square like \"e4\", got {0:?}")]
pub struct ParseSquareError(pub char, pub char);

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(f @ 'a'..='h'), Some(r @ '1'..='8'), None) => {
                Ok(Square::new(f as u8 - b'a', r as u8 - b'1'))
            }
            (f, r, _) => Err(ParseSquareError(f.unwrap_or(' '), r.unwrap_or(' '))),
        }
    }
}

/// The two players. `Light` is always the human, `Dark` the automated side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Light,
    Dark,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Light => "Light",
            Side::Dark => "Dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl Kind {
    /// Kinds a pawn may promote to, in the order the choice panel shows them.
    pub const PROMOTABLE: [Kind; 4] = [Kind::Queen, Kind::Rook, Kind::Bishop, Kind::Knight];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: Kind,
    pub side: Side,
}

/// A legal move as presented to the UI. Castling carries the king's
/// destination square (g or c file) as `to`, which is what a user clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Kind>,
    pub capture: Option<Kind>,
}

impl Move {
    pub fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    pub fn is_capture(self) -> bool {
        self.capture.is_some()
    }
}

/// The result of a successfully executed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub side: Side,
    pub captured: Option<Kind>,
}
