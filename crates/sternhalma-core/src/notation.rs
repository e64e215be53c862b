//! Board notation parsing and serialization.
//!
//! A board is written as its 17 rows from the top point down, separated by
//! `/`. Each character is one cell: `.` for an empty cell, or the digit of
//! the corner whose piece stands there. In the two-player start the first
//! four rows are all `0`, the last four all `3`, and the rest `.`.

use crate::cell::{CELL_COUNT, ROW_LENGTHS};
use crate::{CellKey, Corner};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing board notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid board notation: expected 17 rows, got {0}")]
    InvalidRowCount(usize),

    #[error("row {row} has {got} cells, expected {expected}")]
    InvalidRowLength { row: usize, expected: u8, got: usize },

    #[error("invalid character '{ch}' in row {row}")]
    InvalidCharacter { row: usize, ch: char },
}

/// Parsed board notation: the occupant of every cell in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardNotation {
    cells: [Option<Corner>; CELL_COUNT],
}

impl BoardNotation {
    /// Notation of a board with no pieces.
    pub const EMPTY: &'static str = "./../.../..../............./............/.........../........../........./........../.........../............/............./..../.../../.";

    /// Parses a notation string.
    pub fn parse(notation: &str) -> Result<Self, NotationError> {
        let rows: Vec<&str> = notation.trim().split('/').collect();
        if rows.len() != ROW_LENGTHS.len() {
            return Err(NotationError::InvalidRowCount(rows.len()));
        }

        let mut cells = [None; CELL_COUNT];
        let mut index = 0;
        for (row, text) in rows.iter().enumerate() {
            let len = text.chars().count();
            if len != ROW_LENGTHS[row] as usize {
                return Err(NotationError::InvalidRowLength {
                    row,
                    expected: ROW_LENGTHS[row],
                    got: len,
                });
            }
            for ch in text.chars() {
                cells[index] = match ch {
                    '.' => None,
                    other => Some(
                        Corner::from_char(other)
                            .ok_or(NotationError::InvalidCharacter { row, ch: other })?,
                    ),
                };
                index += 1;
            }
        }

        Ok(BoardNotation { cells })
    }

    /// Builds notation from occupants in cell index order.
    pub fn from_cells(cells: [Option<Corner>; CELL_COUNT]) -> Self {
        BoardNotation { cells }
    }

    /// Returns the occupant of a cell.
    #[inline]
    pub fn occupant(&self, cell: CellKey) -> Option<Corner> {
        self.cells[cell.index()]
    }

    /// Returns all occupants in cell index order.
    #[inline]
    pub fn cells(&self) -> &[Option<Corner>; CELL_COUNT] {
        &self.cells
    }
}

impl fmt::Display for BoardNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut index = 0;
        for (row, &len) in ROW_LENGTHS.iter().enumerate() {
            if row > 0 {
                write!(f, "/")?;
            }
            for _ in 0..len {
                let ch = self.cells[index].map_or('.', Corner::to_char);
                write!(f, "{}", ch)?;
                index += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let parsed = BoardNotation::parse(BoardNotation::EMPTY).unwrap();
        assert!(parsed.cells().iter().all(Option::is_none));
        assert_eq!(parsed.to_string(), BoardNotation::EMPTY);
    }

    #[test]
    fn occupants_land_on_their_cells() {
        let text = "0/0./.../..../............./............/.........../........../........./........../.........../............/............./..../.../../3";
        let parsed = BoardNotation::parse(text).unwrap();
        assert_eq!(parsed.occupant(CellKey::new(0, 0).unwrap()), Some(Corner::North));
        assert_eq!(parsed.occupant(CellKey::new(0, 1).unwrap()), Some(Corner::North));
        assert_eq!(parsed.occupant(CellKey::new(1, 1).unwrap()), None);
        assert_eq!(parsed.occupant(CellKey::new(0, 16).unwrap()), Some(Corner::South));
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn rejects_wrong_row_count() {
        assert_eq!(
            BoardNotation::parse("./.."),
            Err(NotationError::InvalidRowCount(2))
        );
    }

    #[test]
    fn rejects_wrong_row_length() {
        let text = BoardNotation::EMPTY.replacen("./../", "./.../", 1);
        assert_eq!(
            BoardNotation::parse(&text),
            Err(NotationError::InvalidRowLength {
                row: 1,
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn rejects_unknown_character() {
        let text = BoardNotation::EMPTY.replacen('.', "7", 1);
        assert_eq!(
            BoardNotation::parse(&text),
            Err(NotationError::InvalidCharacter { row: 0, ch: '7' })
        );
    }
}
