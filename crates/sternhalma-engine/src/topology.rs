//! Static board geometry.
//!
//! The star is a hexagonal region of 121 cells. Every cell has an axial
//! coordinate; adjacency is the six axial directions. The geometry is built
//! once on first use and shared for the lifetime of the process.

use crate::error::EngineError;
use crate::Board;
use std::collections::HashMap;
use std::sync::OnceLock;
use sternhalma_core::{AxialCoord, CellKey, Corner, Direction, PlayerCount, CELL_COUNT};

/// Axial `q` of the first cell in each row. `r` equals the row.
const ROW_Q_START: [i8; 17] = [0, -1, -2, -3, -8, -8, -8, -8, -8, -9, -10, -11, -12, -8, -8, -8, -8];

/// Number of cells in each home triangle.
pub const HOME_SIZE: usize = 10;

const fn cell(col: u8, row: u8) -> CellKey {
    match CellKey::new(col, row) {
        Some(key) => key,
        None => panic!("home cell off the board"),
    }
}

/// Home triangles in corner index order, each listed row by row.
const HOME_CELLS: [[CellKey; HOME_SIZE]; 6] = [
    // North
    [
        cell(0, 0),
        cell(0, 1),
        cell(1, 1),
        cell(0, 2),
        cell(1, 2),
        cell(2, 2),
        cell(0, 3),
        cell(1, 3),
        cell(2, 3),
        cell(3, 3),
    ],
    // NorthWest
    [
        cell(0, 4),
        cell(1, 4),
        cell(2, 4),
        cell(3, 4),
        cell(0, 5),
        cell(1, 5),
        cell(2, 5),
        cell(0, 6),
        cell(1, 6),
        cell(0, 7),
    ],
    // NorthEast
    [
        cell(9, 4),
        cell(10, 4),
        cell(11, 4),
        cell(12, 4),
        cell(9, 5),
        cell(10, 5),
        cell(11, 5),
        cell(9, 6),
        cell(10, 6),
        cell(9, 7),
    ],
    // South
    [
        cell(0, 13),
        cell(1, 13),
        cell(2, 13),
        cell(3, 13),
        cell(0, 14),
        cell(1, 14),
        cell(2, 14),
        cell(0, 15),
        cell(1, 15),
        cell(0, 16),
    ],
    // SouthWest
    [
        cell(0, 9),
        cell(0, 10),
        cell(1, 10),
        cell(0, 11),
        cell(1, 11),
        cell(2, 11),
        cell(0, 12),
        cell(1, 12),
        cell(2, 12),
        cell(3, 12),
    ],
    // SouthEast
    [
        cell(9, 9),
        cell(9, 10),
        cell(10, 10),
        cell(9, 11),
        cell(10, 11),
        cell(11, 11),
        cell(9, 12),
        cell(10, 12),
        cell(11, 12),
        cell(12, 12),
    ],
];

/// Precomputed geometry of the star board.
#[derive(Debug)]
pub struct Topology {
    coords: [AxialCoord; CELL_COUNT],
    lookup: HashMap<AxialCoord, CellKey>,
    neighbors: [[Option<CellKey>; 6]; CELL_COUNT],
    corner_of: [Option<Corner>; CELL_COUNT],
}

static TOPOLOGY: OnceLock<Topology> = OnceLock::new();

impl Topology {
    /// Returns the shared topology, building it on first use.
    pub fn get() -> &'static Topology {
        TOPOLOGY.get_or_init(Topology::build)
    }

    fn build() -> Self {
        let mut coords = [AxialCoord::new(0, 0); CELL_COUNT];
        let mut lookup = HashMap::with_capacity(CELL_COUNT);
        for key in CellKey::all() {
            let row = key.row();
            let coord = AxialCoord::new(ROW_Q_START[row as usize] + key.col() as i8, row as i8);
            coords[key.index()] = coord;
            lookup.insert(coord, key);
        }

        let mut neighbors = [[None; 6]; CELL_COUNT];
        for key in CellKey::all() {
            for (slot, dir) in Direction::ALL.into_iter().enumerate() {
                neighbors[key.index()][slot] = lookup.get(&coords[key.index()].offset(dir, 1)).copied();
            }
        }

        let mut corner_of = [None; CELL_COUNT];
        for corner in Corner::ALL {
            for key in HOME_CELLS[corner.index()] {
                corner_of[key.index()] = Some(corner);
            }
        }

        Topology {
            coords,
            lookup,
            neighbors,
            corner_of,
        }
    }

    /// Returns the axial coordinate of a cell.
    #[inline]
    pub fn coord(&self, cell: CellKey) -> AxialCoord {
        self.coords[cell.index()]
    }

    /// Returns the cell at an axial coordinate, if it is on the board.
    #[inline]
    pub fn cell_at(&self, coord: AxialCoord) -> Option<CellKey> {
        self.lookup.get(&coord).copied()
    }

    /// Returns the adjacent cell in a direction.
    #[inline]
    pub fn neighbor(&self, cell: CellKey, direction: Direction) -> Option<CellKey> {
        let slot = Direction::ALL.iter().position(|&d| d == direction)?;
        self.neighbors[cell.index()][slot]
    }

    /// Returns the cell `steps` hops away along a direction.
    pub fn step(&self, cell: CellKey, direction: Direction, steps: i8) -> Option<CellKey> {
        self.cell_at(self.coord(cell).offset(direction, steps))
    }

    /// Iterates over the on-board neighbors of a cell.
    pub fn neighbors(&self, cell: CellKey) -> impl Iterator<Item = CellKey> + '_ {
        self.neighbors[cell.index()].iter().flatten().copied()
    }

    /// Returns true if the two cells are adjacent.
    pub fn are_adjacent(&self, a: CellKey, b: CellKey) -> bool {
        self.neighbors(a).any(|n| n == b)
    }

    /// Hex distance between two cells.
    pub fn distance(&self, a: CellKey, b: CellKey) -> u8 {
        self.coord(a).distance_to(self.coord(b))
    }

    /// Returns the home triangle of a corner.
    #[inline]
    pub fn home_cells(&self, corner: Corner) -> &'static [CellKey; HOME_SIZE] {
        &HOME_CELLS[corner.index()]
    }

    /// Returns the cells a corner's pieces must reach.
    #[inline]
    pub fn target_cells_for(&self, corner: Corner) -> &'static [CellKey; HOME_SIZE] {
        self.home_cells(corner.opposite())
    }

    /// Returns the corner whose home triangle contains the cell.
    #[inline]
    pub fn corner_of(&self, cell: CellKey) -> Option<Corner> {
        self.corner_of[cell.index()]
    }

    /// Returns true if the cell lies in the corner's target triangle.
    #[inline]
    pub fn is_target_of(&self, cell: CellKey, corner: Corner) -> bool {
        self.corner_of(cell) == Some(corner.opposite())
    }
}

/// Returns the corner across the board.
#[inline]
pub fn opposite_corner(corner: Corner) -> Corner {
    corner.opposite()
}

/// Returns the cells a corner's pieces must reach.
pub fn target_cells_for(corner: Corner) -> &'static [CellKey; HOME_SIZE] {
    Topology::get().target_cells_for(corner)
}

/// Returns the active corners for a raw player count.
pub fn active_corners(player_count: u8) -> Result<&'static [Corner], EngineError> {
    PlayerCount::new(player_count)
        .map(PlayerCount::corners)
        .ok_or(EngineError::InvalidPlayerCount(player_count))
}

/// Builds the starting board: each active corner's home triangle filled
/// with its own pieces, every other cell empty.
pub fn build_board(player_count: u8) -> Result<Board, EngineError> {
    let count = PlayerCount::new(player_count).ok_or(EngineError::InvalidPlayerCount(player_count))?;
    Ok(Board::starting(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_cell_has_a_unique_coord() {
        let topo = Topology::get();
        let coords: HashSet<_> = CellKey::all().map(|c| topo.coord(c)).collect();
        assert_eq!(coords.len(), CELL_COUNT);
        for cell in CellKey::all() {
            assert_eq!(topo.cell_at(topo.coord(cell)), Some(cell));
        }
    }

    #[test]
    fn center_cell_is_origin() {
        let topo = Topology::get();
        let center = CellKey::new(4, 8).unwrap();
        assert_eq!(topo.coord(center), AxialCoord::new(-4, 8));
        assert_eq!(topo.neighbors(center).count(), 6);
    }

    #[test]
    fn tips_have_two_neighbors() {
        let topo = Topology::get();
        let top = CellKey::new(0, 0).unwrap();
        let mut around: Vec<_> = topo.neighbors(top).collect();
        around.sort();
        assert_eq!(around, vec![CellKey::new(0, 1).unwrap(), CellKey::new(1, 1).unwrap()]);
        assert_eq!(topo.neighbors(CellKey::new(0, 16).unwrap()).count(), 2);
        assert_eq!(topo.neighbors(CellKey::new(0, 4).unwrap()).count(), 2);
        assert_eq!(topo.neighbors(CellKey::new(12, 12).unwrap()).count(), 2);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let topo = Topology::get();
        for cell in CellKey::all() {
            for dir in Direction::ALL {
                if let Some(n) = topo.neighbor(cell, dir) {
                    assert_eq!(topo.neighbor(n, dir.reverse()), Some(cell));
                }
            }
        }
    }

    #[test]
    fn homes_partition_sixty_cells() {
        let topo = Topology::get();
        let mut seen = HashSet::new();
        for corner in Corner::ALL {
            for &cell in topo.home_cells(corner) {
                assert!(seen.insert(cell), "{} in two homes", cell);
                assert_eq!(topo.corner_of(cell), Some(corner));
            }
        }
        assert_eq!(seen.len(), 60);
        assert_eq!(CellKey::all().filter(|&c| topo.corner_of(c).is_none()).count(), 61);
    }

    #[test]
    fn homes_are_triangles() {
        // Each home lies within distance 3 of its tip and is connected.
        let topo = Topology::get();
        for corner in Corner::ALL {
            let home = topo.home_cells(corner);
            let tip = home
                .iter()
                .copied()
                .find(|&c| home.iter().all(|&o| topo.distance(c, o) <= 3))
                .unwrap();
            assert!(home.iter().any(|&c| topo.distance(tip, c) == 3));
            for &c in home {
                assert!(home.iter().any(|&o| o != c && topo.are_adjacent(c, o)));
            }
        }
    }

    #[test]
    fn targets_are_opposite_homes() {
        let topo = Topology::get();
        assert_eq!(target_cells_for(Corner::North), topo.home_cells(Corner::South));
        assert_eq!(target_cells_for(Corner::NorthWest), topo.home_cells(Corner::SouthEast));
        assert_eq!(target_cells_for(Corner::NorthEast), topo.home_cells(Corner::SouthWest));
        assert!(topo.is_target_of(CellKey::new(0, 16).unwrap(), Corner::North));
        assert!(!topo.is_target_of(CellKey::new(0, 0).unwrap(), Corner::North));
        assert_eq!(opposite_corner(Corner::SouthWest), Corner::NorthEast);
    }

    #[test]
    fn active_corner_lookup() {
        assert_eq!(active_corners(2).unwrap(), &[Corner::North, Corner::South]);
        assert_eq!(active_corners(5), Err(EngineError::InvalidPlayerCount(5)));
    }

    #[test]
    fn build_board_populates_active_homes() {
        for n in [2u8, 3, 4, 6] {
            let board = build_board(n).unwrap();
            assert_eq!(board.piece_count(), 10 * n as usize);
            for &corner in active_corners(n).unwrap() {
                for &cell in Topology::get().home_cells(corner) {
                    assert_eq!(board.occupant(cell), Some(corner));
                }
            }
        }
        for n in [0u8, 1, 5, 7] {
            assert_eq!(build_board(n), Err(EngineError::InvalidPlayerCount(n)));
        }
    }
}
