//! Board cell representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of cells on the star board.
pub const CELL_COUNT: usize = 121;

/// Number of cells in each row of the star, top to bottom.
pub const ROW_LENGTHS: [u8; 17] = [1, 2, 3, 4, 13, 12, 11, 10, 9, 10, 11, 12, 13, 4, 3, 2, 1];

/// Index of the first cell of each row.
const ROW_STARTS: [u8; 18] = {
    let mut starts = [0u8; 18];
    let mut row = 0;
    while row < 17 {
        starts[row + 1] = starts[row] + ROW_LENGTHS[row];
        row += 1;
    }
    starts
};

/// Errors that can occur when parsing a cell key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellKeyParseError {
    #[error("invalid cell key '{0}': expected \"col-row\"")]
    Malformed(String),

    #[error("cell {col}-{row} is not on the board")]
    OffBoard { col: u16, row: u16 },
}

/// A cell on the star board, indexed 0-120.
///
/// Cells are indexed row-major from the top point: the single cell of row 0
/// is 0, the two cells of row 1 are 1 and 2, and so on. The grid position
/// `(col, row)` counts columns from the left end of each row. The textual
/// form `"{col}-{row}"` is the only one parsed or printed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellKey(u8);

impl CellKey {
    /// Creates a cell from its grid position.
    #[inline]
    pub const fn new(col: u8, row: u8) -> Option<Self> {
        if row as usize >= ROW_LENGTHS.len() || col >= ROW_LENGTHS[row as usize] {
            return None;
        }
        Some(CellKey(ROW_STARTS[row as usize] + col))
    }

    /// Creates a cell from its index (0-120).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < CELL_COUNT {
            Some(CellKey(index))
        } else {
            None
        }
    }

    /// Returns the index (0-120).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the row, counted from the top point.
    pub const fn row(self) -> u8 {
        let mut row = 0;
        while ROW_STARTS[row + 1] <= self.0 {
            row += 1;
        }
        row as u8
    }

    /// Returns the column within the row.
    pub const fn col(self) -> u8 {
        self.0 - ROW_STARTS[self.row() as usize]
    }

    /// Iterates over every cell in index order.
    pub fn all() -> impl Iterator<Item = CellKey> {
        (0..CELL_COUNT as u8).map(CellKey)
    }
}

impl fmt::Debug for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellKey({})", self)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.col(), self.row())
    }
}

impl FromStr for CellKey {
    type Err = CellKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CellKeyParseError::Malformed(s.to_string());
        let (col, row) = s.split_once('-').ok_or_else(malformed)?;
        let col: u16 = col.parse().map_err(|_| malformed())?;
        let row: u16 = row.parse().map_err(|_| malformed())?;
        u8::try_from(col)
            .ok()
            .zip(u8::try_from(row).ok())
            .and_then(|(c, r)| CellKey::new(c, r))
            .ok_or(CellKeyParseError::OffBoard { col, row })
    }
}

impl TryFrom<String> for CellKey {
    type Error = CellKeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellKey> for String {
    fn from(cell: CellKey) -> Self {
        cell.to_string()
    }
}

/// Axial hex coordinates.
///
/// `r` grows downward one row at a time; `q` grows to the right along a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxialCoord {
    pub q: i8,
    pub r: i8,
}

impl AxialCoord {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Returns the coordinate `steps` hops away along `direction`.
    #[inline]
    pub const fn offset(self, direction: Direction, steps: i8) -> Self {
        let (dq, dr) = direction.delta();
        Self::new(self.q + dq * steps, self.r + dr * steps)
    }

    /// Hex distance between two coordinates.
    pub fn distance_to(self, other: AxialCoord) -> u8 {
        let dq = (self.q - other.q) as i16;
        let dr = (self.r - other.r) as i16;
        let ds = dq + dr;
        dq.abs().max(dr.abs()).max(ds.abs()) as u8
    }
}

impl fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// One of the six axial directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    West,
    SouthEast,
    NorthWest,
    NorthEast,
    SouthWest,
}

impl Direction {
    /// All directions, in generation order.
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::West,
        Direction::SouthEast,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
    ];

    /// Returns the `(dq, dr)` step for this direction.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::SouthEast => (0, 1),
            Direction::NorthWest => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// Returns the reverse direction.
    #[inline]
    pub const fn reverse(self) -> Self {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::SouthEast => Direction::NorthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_lengths_total() {
        let total: usize = ROW_LENGTHS.iter().map(|&n| n as usize).sum();
        assert_eq!(total, CELL_COUNT);
        assert_eq!(ROW_STARTS[17] as usize, CELL_COUNT);
    }

    #[test]
    fn cell_new() {
        let top = CellKey::new(0, 0).unwrap();
        assert_eq!(top.index(), 0);
        let wide = CellKey::new(12, 4).unwrap();
        assert_eq!(wide.index(), 1 + 2 + 3 + 4 + 12);
        assert_eq!(wide.col(), 12);
        assert_eq!(wide.row(), 4);
        let bottom = CellKey::new(0, 16).unwrap();
        assert_eq!(bottom.index(), CELL_COUNT - 1);

        assert_eq!(CellKey::new(1, 0), None);
        assert_eq!(CellKey::new(13, 4), None);
        assert_eq!(CellKey::new(0, 17), None);
    }

    #[test]
    fn grid_roundtrip_every_cell() {
        for cell in CellKey::all() {
            assert_eq!(CellKey::new(cell.col(), cell.row()), Some(cell));
        }
        assert_eq!(CellKey::all().count(), CELL_COUNT);
    }

    #[test]
    fn parse_and_display() {
        let cell: CellKey = "9-7".parse().unwrap();
        assert_eq!(cell.col(), 9);
        assert_eq!(cell.row(), 7);
        assert_eq!(cell.to_string(), "9-7");

        assert_eq!(
            "10-7".parse::<CellKey>(),
            Err(CellKeyParseError::OffBoard { col: 10, row: 7 })
        );
        assert!(matches!(
            "7".parse::<CellKey>(),
            Err(CellKeyParseError::Malformed(_))
        ));
        assert!(matches!(
            "a-b".parse::<CellKey>(),
            Err(CellKeyParseError::Malformed(_))
        ));
        assert!(matches!(
            "300-1".parse::<CellKey>(),
            Err(CellKeyParseError::OffBoard { .. })
        ));
    }

    #[test]
    fn serde_uses_text_form() {
        let cell = CellKey::new(3, 12).unwrap();
        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, "\"3-12\"");
        let back: CellKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);
        assert!(serde_json::from_str::<CellKey>("\"4-3\"").is_err());
    }

    #[test]
    fn axial_distance() {
        let a = AxialCoord::new(0, 0);
        assert_eq!(a.distance_to(a), 0);
        assert_eq!(a.distance_to(AxialCoord::new(-8, 16)), 16);
        assert_eq!(a.distance_to(AxialCoord::new(-1, 1)), 1);
        assert_eq!(a.distance_to(AxialCoord::new(1, 1)), 2);
    }

    #[test]
    fn direction_reverse_cancels() {
        let origin = AxialCoord::new(-4, 8);
        for dir in Direction::ALL {
            let (dq, dr) = dir.delta();
            let (rq, rr) = dir.reverse().delta();
            assert_eq!((dq + rq, dr + rr), (0, 0));
            assert_eq!(origin.offset(dir, 2).offset(dir.reverse(), 2), origin);
        }
    }
}
