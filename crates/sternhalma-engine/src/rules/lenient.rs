//! Lenient victory for boards that do not hold a full set of pieces.

use super::RuleSet;
use crate::topology::Topology;
use crate::Board;
use sternhalma_core::Corner;

/// A corner wins once it has at least one piece and every one of its pieces
/// stands in its target triangle.
///
/// Useful for puzzles and endgame setups loaded from notation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientRules;

impl RuleSet for LenientRules {
    fn has_won(&self, board: &Board, corner: Corner) -> bool {
        let topo = Topology::get();
        let mut pieces = board.pieces_of(corner).peekable();
        pieces.peek().is_some() && pieces.all(|cell| topo.is_target_of(cell, corner))
    }
}
