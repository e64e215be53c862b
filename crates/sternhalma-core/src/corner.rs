//! Star points and seating.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six points of the star.
///
/// A player's pieces start in its own corner and must reach the
/// [`opposite`](Corner::opposite) one. The corner index doubles as the
/// occupant id stored on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Corner {
    /// Top point.
    North = 0,
    /// Upper-left point.
    NorthWest = 1,
    /// Upper-right point.
    NorthEast = 2,
    /// Bottom point.
    South = 3,
    /// Lower-left point.
    SouthWest = 4,
    /// Lower-right point.
    SouthEast = 5,
}

impl Corner {
    /// All corners in index order.
    pub const ALL: [Corner; 6] = [
        Corner::North,
        Corner::NorthWest,
        Corner::NorthEast,
        Corner::South,
        Corner::SouthWest,
        Corner::SouthEast,
    ];

    /// Creates a corner from its index (0-5).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Corner::North),
            1 => Some(Corner::NorthWest),
            2 => Some(Corner::NorthEast),
            3 => Some(Corner::South),
            4 => Some(Corner::SouthWest),
            5 => Some(Corner::SouthEast),
            _ => None,
        }
    }

    /// Returns the index (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the corner across the board (0↔3, 1↔5, 2↔4).
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Corner::North => Corner::South,
            Corner::South => Corner::North,
            Corner::NorthWest => Corner::SouthEast,
            Corner::SouthEast => Corner::NorthWest,
            Corner::NorthEast => Corner::SouthWest,
            Corner::SouthWest => Corner::NorthEast,
        }
    }

    /// Returns the digit used for this corner in board notation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'0' + self as u8) as char
    }

    /// Parses a notation digit ('0'-'5').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='5' => Self::from_index(c as u8 - b'0'),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Corner {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Corner::from_index(value).ok_or_else(|| format!("corner out of range: {}", value))
    }
}

impl From<Corner> for u8 {
    fn from(corner: Corner) -> Self {
        corner as u8
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Corner::North => "North",
            Corner::NorthWest => "NorthWest",
            Corner::NorthEast => "NorthEast",
            Corner::South => "South",
            Corner::SouthWest => "SouthWest",
            Corner::SouthEast => "SouthEast",
        };
        write!(f, "{}", name)
    }
}

/// A supported number of players: 2, 3, 4 or 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerCount(u8);

impl PlayerCount {
    pub const TWO: PlayerCount = PlayerCount(2);
    pub const THREE: PlayerCount = PlayerCount(3);
    pub const FOUR: PlayerCount = PlayerCount(4);
    pub const SIX: PlayerCount = PlayerCount(6);

    /// Validates a raw player count.
    #[inline]
    pub const fn new(count: u8) -> Option<Self> {
        match count {
            2 | 3 | 4 | 6 => Some(PlayerCount(count)),
            _ => None,
        }
    }

    /// Returns the raw count.
    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Returns the active corners in seating order.
    pub const fn corners(self) -> &'static [Corner] {
        match self.0 {
            2 => &[Corner::North, Corner::South],
            3 => &[Corner::North, Corner::SouthWest, Corner::SouthEast],
            4 => &[
                Corner::NorthWest,
                Corner::NorthEast,
                Corner::SouthWest,
                Corner::SouthEast,
            ],
            _ => &Corner::ALL,
        }
    }

    /// Returns true if the corner takes part in a game of this size.
    pub fn is_active(self, corner: Corner) -> bool {
        self.corners().contains(&corner)
    }
}

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
