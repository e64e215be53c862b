//! Reconstruction of jump sequences.
//!
//! The destination sets from [`jump_moves`](super::jump_moves) only name the
//! final landing. To animate, persist or replay a multi-hop jump the caller
//! needs the individual hops; these are recovered by breadth-first search so
//! the shortest sequence is always returned.

use super::hop;
use crate::Board;
use std::collections::{BTreeMap, VecDeque};
use sternhalma_core::{CellKey, Direction, Move, MoveChain};

/// Breadth-first search tree of jump landings: landing -> previous cell.
fn jump_tree(board: &Board, origin: CellKey) -> BTreeMap<CellKey, CellKey> {
    let mut parent = BTreeMap::new();
    if !board.is_occupied(origin) {
        return parent;
    }

    let mut queue = VecDeque::from([origin]);
    while let Some(cell) = queue.pop_front() {
        for dir in Direction::ALL {
            if let Some(landing) = hop(board, origin, cell, dir) {
                if !parent.contains_key(&landing) {
                    parent.insert(landing, cell);
                    queue.push_back(landing);
                }
            }
        }
    }
    parent
}

fn unwind(parent: &BTreeMap<CellKey, CellKey>, origin: CellKey, landing: CellKey) -> Option<MoveChain> {
    let mut hops = Vec::new();
    let mut at = landing;
    while at != origin {
        let prev = *parent.get(&at)?;
        hops.push(Move::jump(prev, at));
        at = prev;
    }
    hops.reverse();
    MoveChain::try_from(hops).ok()
}

/// Returns the shortest hop sequence carrying the piece on `origin` to
/// `landing`, or `None` if `landing` is not a jump destination.
pub fn jump_path(board: &Board, origin: CellKey, landing: CellKey) -> Option<MoveChain> {
    if landing == origin {
        return None;
    }
    let parent = jump_tree(board, origin);
    unwind(&parent, origin, landing)
}

/// Returns the shortest hop sequence to every jump destination of `origin`.
pub fn jump_paths(board: &Board, origin: CellKey) -> BTreeMap<CellKey, MoveChain> {
    let parent = jump_tree(board, origin);
    parent
        .keys()
        .filter_map(|&landing| unwind(&parent, origin, landing).map(|chain| (landing, chain)))
        .collect()
}
