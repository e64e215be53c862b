//! Standard victory: a full target triangle.

use super::RuleSet;
use crate::topology::{Topology, HOME_SIZE};
use crate::Board;
use sternhalma_core::Corner;

/// A corner wins once exactly ten of its pieces, and no others, stand in
/// its target triangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl RuleSet for StandardRules {
    fn has_won(&self, board: &Board, corner: Corner) -> bool {
        let topo = Topology::get();
        let mut count = 0;
        for cell in board.pieces_of(corner) {
            if !topo.is_target_of(cell, corner) {
                return false;
            }
            count += 1;
        }
        count == HOME_SIZE
    }
}
