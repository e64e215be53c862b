//! Greedy heuristic agent.
//!
//! Looks one turn ahead. Every legal turn is scored by how far it carries
//! the moved piece toward the tip of its target triangle, adjusted by a set
//! of bonuses and penalties, and the best-scoring turn is played.

use crate::to_suggestion;
use serde::{Deserialize, Serialize};
use sternhalma_core::{AxialCoord, CellKey, Corner, Move};
use sternhalma_engine::{player_moves, Agent, AgentError, Board, RuleSet, StandardRules, Suggestion, Topology};

/// Center of the star in axial coordinates.
const CENTER: AxialCoord = AxialCoord::new(-4, 8);

/// Tunable weights of the greedy heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreedyWeights {
    /// Per hex the moved piece gains toward the target tip.
    pub progress: f32,
    /// Per hex the moved piece still had to travel; favors stragglers.
    pub laggard: f32,
    /// Flat bonus for jumping.
    pub jump: f32,
    /// Bonus per hop beyond the first.
    pub chain: f32,
    /// Bonus for leaving the home triangle.
    pub home_exit: f32,
    /// Bonus for entering the target triangle.
    pub target_entry: f32,
    /// Penalty for leaving the target triangle.
    pub target_exit: f32,
    /// Penalty for undoing the agent's previous turn.
    pub reverse: f32,
    /// Bonus for the turn that wins the game.
    pub win: f32,
}

impl Default for GreedyWeights {
    fn default() -> Self {
        GreedyWeights {
            progress: 1.0,
            laggard: 0.1,
            jump: 0.2,
            chain: 0.15,
            home_exit: 1.5,
            target_entry: 1.0,
            target_exit: 3.0,
            reverse: 2.0,
            win: 200.0,
        }
    }
}

/// One-ply greedy player.
#[derive(Debug, Clone, Default)]
pub struct GreedyAgent {
    weights: GreedyWeights,
    /// Endpoints of the last turn suggested for each corner.
    last: [Option<(CellKey, CellKey)>; 6],
}

/// The cell of a corner's target triangle farthest from the center.
pub(crate) fn target_tip(corner: Corner) -> CellKey {
    let topo = Topology::get();
    let target = topo.target_cells_for(corner);
    target
        .iter()
        .copied()
        .max_by_key(|&c| topo.coord(c).distance_to(CENTER))
        .unwrap_or(target[0])
}

impl GreedyAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: GreedyWeights) -> Self {
        GreedyAgent {
            weights,
            last: [None; 6],
        }
    }

    pub fn weights(&self) -> &GreedyWeights {
        &self.weights
    }

    /// Scores one candidate turn.
    fn score(&self, board: &Board, player: Corner, m: &Move, hops: usize) -> f32 {
        let topo = Topology::get();
        let w = &self.weights;
        let tip = target_tip(player);

        let before = topo.distance(m.from, tip) as f32;
        let after = topo.distance(m.to, tip) as f32;
        let mut score = w.progress * (before - after) + w.laggard * before;

        if m.is_jump() {
            score += w.jump + w.chain * hops.saturating_sub(1) as f32;
        }

        let from_home = topo.corner_of(m.from) == Some(player);
        let to_home = topo.corner_of(m.to) == Some(player);
        if from_home && !to_home {
            score += w.home_exit;
        }

        let from_target = topo.is_target_of(m.from, player);
        let to_target = topo.is_target_of(m.to, player);
        if !from_target && to_target {
            score += w.target_entry;
        } else if from_target && !to_target {
            score -= w.target_exit;
        }

        if self.last[player.index()] == Some((m.to, m.from)) {
            score -= w.reverse;
        }

        if StandardRules.has_won(&board.with_move(m), player) {
            score += w.win;
        }
        score
    }
}

impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        "greedy"
    }

    fn suggest_move(&mut self, board: &Board, player: Corner) -> Result<Suggestion, AgentError> {
        let mut best: Option<(f32, Move, Suggestion)> = None;
        for m in player_moves(board, player) {
            let suggestion = to_suggestion(board, m);
            let score = self.score(board, player, &m, suggestion.moves().len());
            if best.as_ref().map_or(true, |(top, _, _)| score > *top) {
                best = Some((score, m, suggestion));
            }
        }

        let (_, m, suggestion) = best.ok_or(AgentError::NoLegalMoves(player))?;
        self.last[player.index()] = Some((m.from, m.to));
        Ok(suggestion)
    }
}
