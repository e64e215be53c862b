//! Move generation.
//!
//! A piece either steps to an adjacent empty cell, or jumps over an adjacent
//! occupied cell (any corner's piece) to the empty cell directly beyond.
//! Jumps chain: after landing, the same piece may jump again. While a jump
//! sequence is searched the moving piece is considered lifted off its
//! origin, so its origin counts as empty for the cells it passes over and is
//! never itself a landing.

mod paths;
mod perft;

pub use paths::{jump_path, jump_paths};
pub use perft::{perft, perft_divide};

use crate::topology::Topology;
use crate::Board;
use std::collections::BTreeSet;
use sternhalma_core::{CellKey, Corner, Direction, Move};

/// A set of destination cells, ordered by cell index.
pub type Destinations = BTreeSet<CellKey>;

/// Returns the empty cells adjacent to `origin`.
///
/// Empty if `origin` holds no piece.
pub fn simple_moves(board: &Board, origin: CellKey) -> Destinations {
    if !board.is_occupied(origin) {
        return Destinations::new();
    }
    Topology::get()
        .neighbors(origin)
        .filter(|&n| !board.is_occupied(n))
        .collect()
}

/// Returns the landing cell of a single hop from `from` in `direction`.
///
/// `lifted` is treated as empty: it is the cell the moving piece left.
pub(crate) fn hop(board: &Board, lifted: CellKey, from: CellKey, direction: Direction) -> Option<CellKey> {
    let topo = Topology::get();
    let occupied = |cell: CellKey| cell != lifted && board.is_occupied(cell);
    let over = topo.step(from, direction, 1)?;
    let landing = topo.step(from, direction, 2)?;
    if occupied(over) && !occupied(landing) && landing != lifted {
        Some(landing)
    } else {
        None
    }
}

/// Returns every cell reachable from `origin` by one or more chained jumps.
///
/// Empty if `origin` holds no piece. The search visits each landing once,
/// so cycles in the jump graph terminate.
pub fn jump_moves(board: &Board, origin: CellKey) -> Destinations {
    let mut landings = Destinations::new();
    if !board.is_occupied(origin) {
        return landings;
    }

    let mut stack = vec![origin];
    while let Some(cell) = stack.pop() {
        for dir in Direction::ALL {
            if let Some(landing) = hop(board, origin, cell, dir) {
                if landings.insert(landing) {
                    stack.push(landing);
                }
            }
        }
    }
    landings
}

/// Returns the destinations available to the piece on `origin`.
///
/// Before the turn's first move this is the union of simple moves and jump
/// landings. Once a jump has been made (`chain_started`), only further jump
/// landings from the piece's current cell are offered.
pub fn legal_destinations(board: &Board, origin: CellKey, chain_started: bool) -> Destinations {
    let mut destinations = jump_moves(board, origin);
    if !chain_started {
        destinations.extend(simple_moves(board, origin));
    }
    destinations
}

/// Lists every turn a corner could play, one move per reachable destination.
///
/// Jump entries connect the origin directly to the final landing of a chain.
/// Use [`jump_path`] to expand one into individual hops.
pub fn player_moves(board: &Board, corner: Corner) -> Vec<Move> {
    let mut moves = Vec::new();
    for origin in board.pieces_of(corner) {
        moves.extend(simple_moves(board, origin).into_iter().map(|to| Move::simple(origin, to)));
        moves.extend(jump_moves(board, origin).into_iter().map(|to| Move::jump(origin, to)));
    }
    moves
}
