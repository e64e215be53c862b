//! Board occupancy.

use crate::topology::Topology;
use std::fmt;
use sternhalma_core::{
    BoardNotation, CellKey, Corner, Move, NotationError, PlayerCount, CELL_COUNT, ROW_LENGTHS,
};

/// Occupancy of all 121 cells.
///
/// A cell is either empty or holds one piece, tagged with the corner it
/// belongs to. Board operations never alias: applying a move returns a new
/// board and leaves the original untouched.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Corner>; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            cells: [None; CELL_COUNT],
        }
    }

    /// Creates the starting board for a game of the given size.
    pub fn starting(players: PlayerCount) -> Self {
        let topo = Topology::get();
        let mut board = Board::empty();
        for &corner in players.corners() {
            for &cell in topo.home_cells(corner) {
                board.place(cell, corner);
            }
        }
        board
    }

    /// Parses a board from notation.
    pub fn from_notation(notation: &str) -> Result<Self, NotationError> {
        let parsed = BoardNotation::parse(notation)?;
        Ok(Board {
            cells: *parsed.cells(),
        })
    }

    /// Returns the notation of this board.
    pub fn to_notation(&self) -> String {
        BoardNotation::from_cells(self.cells).to_string()
    }

    /// Returns the corner whose piece stands on the cell.
    #[inline]
    pub fn occupant(&self, cell: CellKey) -> Option<Corner> {
        self.cells[cell.index()]
    }

    #[inline]
    pub fn is_occupied(&self, cell: CellKey) -> bool {
        self.cells[cell.index()].is_some()
    }

    /// Puts a piece on a cell, replacing whatever stood there.
    #[inline]
    pub fn place(&mut self, cell: CellKey, corner: Corner) {
        self.cells[cell.index()] = Some(corner);
    }

    /// Clears a cell, returning its former occupant.
    #[inline]
    pub fn remove(&mut self, cell: CellKey) -> Option<Corner> {
        self.cells[cell.index()].take()
    }

    /// Iterates over the cells holding a corner's pieces, in index order.
    pub fn pieces_of(&self, corner: Corner) -> impl Iterator<Item = CellKey> + '_ {
        CellKey::all().filter(move |&c| self.occupant(c) == Some(corner))
    }

    /// Returns the total number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Returns a new board with the piece on `m.from` moved to `m.to`.
    ///
    /// The move is not validated. If `m.from` is empty the result equals
    /// the original board.
    pub fn with_move(&self, m: &Move) -> Board {
        self.with_relocation(m.from, m.to)
    }

    /// Returns a new board with the piece on `from` relocated to `to`.
    pub fn with_relocation(&self, from: CellKey, to: CellKey) -> Board {
        let mut next = self.clone();
        if let Some(corner) = next.remove(from) {
            next.place(to, corner);
        }
        next
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_notation())
    }
}

impl fmt::Display for Board {
    /// Draws the star, one row per line, cells centered under each other.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widest = ROW_LENGTHS.iter().copied().max().unwrap_or(0) as usize;
        let mut index = 0;
        for &len in ROW_LENGTHS.iter() {
            let indent = widest - len as usize;
            let mut line = " ".repeat(indent);
            for col in 0..len {
                if col > 0 {
                    line.push(' ');
                }
                line.push(self.cells[index].map_or('.', Corner::to_char));
                index += 1;
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
