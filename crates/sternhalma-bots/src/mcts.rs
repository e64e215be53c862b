//! Monte Carlo agent.
//!
//! Spreads a playout budget over the legal turns with UCB1. Each playout
//! makes the candidate turn, then lets every seat in rotation play random
//! turns until someone wins or the depth limit is reached. A win counts 1
//! for the winner and 0 for everyone else. A playout cut off by the depth
//! limit is scored by how much closer the player's pieces stand to their
//! target tip than the opponents' do, the progress term of the greedy
//! heuristic. The most visited turn is played.

use crate::greedy::target_tip;
use crate::to_suggestion;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use sternhalma_core::{Corner, Move};
use sternhalma_engine::{player_moves, Agent, AgentError, Board, RuleSet, StandardRules, Suggestion, Topology};

/// Difference in remaining hexes that scores a depth-limited playout near 0 or 1.
const DISTANCE_SCALE: f32 = 40.0;

/// Search budget of the Monte Carlo agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsSettings {
    /// Playouts per decision.
    pub simulations: u32,
    /// Turns a playout runs after the candidate, counting every seat.
    pub rollout_depth: u32,
    /// UCB1 exploration constant.
    pub exploration: f32,
}

impl Default for MctsSettings {
    fn default() -> Self {
        MctsSettings {
            simulations: 200,
            rollout_depth: 40,
            exploration: 1.4,
        }
    }
}

/// Playout statistics of one candidate turn.
#[derive(Debug, Clone, Copy, Default)]
struct Arm {
    visits: u32,
    total: f32,
}

impl Arm {
    fn mean(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.total / self.visits as f32
        }
    }
}

/// Flat Monte Carlo player with seeded playouts.
#[derive(Debug)]
pub struct MctsAgent {
    settings: MctsSettings,
    rng: StdRng,
}

impl MctsAgent {
    pub fn new(seed: u64) -> Self {
        Self::with_settings(MctsSettings::default(), seed)
    }

    pub fn with_settings(settings: MctsSettings, seed: u64) -> Self {
        MctsAgent {
            settings,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn settings(&self) -> &MctsSettings {
        &self.settings
    }

    /// Picks the arm to play next: any unvisited arm first, otherwise the
    /// highest UCB1 index.
    fn select(&self, arms: &[Arm], played: u32) -> usize {
        let log = (played.max(1) as f32).ln();
        let mut best = 0;
        let mut best_index = f32::NEG_INFINITY;
        for (i, arm) in arms.iter().enumerate() {
            if arm.visits == 0 {
                return i;
            }
            let index = arm.mean() + self.settings.exploration * (log / arm.visits as f32).sqrt();
            if index > best_index {
                best = i;
                best_index = index;
            }
        }
        best
    }

    /// Plays `first`, then random turns, and returns the result for `player`.
    fn playout(&mut self, board: &Board, seats: &[Corner], player: Corner, first: &Move) -> f32 {
        let mut board = board.with_move(first);
        if StandardRules.has_won(&board, player) {
            return 1.0;
        }
        let start = seats.iter().position(|&c| c == player).unwrap_or(0);
        for ply in 1..=self.settings.rollout_depth as usize {
            let corner = seats[(start + ply) % seats.len()];
            let moves = player_moves(&board, corner);
            // A seat without moves passes.
            let Some(m) = moves.choose(&mut self.rng) else {
                continue;
            };
            board = board.with_move(m);
            if StandardRules.has_won(&board, corner) {
                return if corner == player { 1.0 } else { 0.0 };
            }
        }
        leaf_value(&board, seats, player)
    }
}

/// Corners with pieces on the board, plus `player`, in seating order.
fn seats_on(board: &Board, player: Corner) -> Vec<Corner> {
    Corner::ALL
        .iter()
        .copied()
        .filter(|&c| c == player || board.pieces_of(c).next().is_some())
        .collect()
}

/// Total hex distance from a corner's pieces to its target tip.
fn remaining(board: &Board, corner: Corner) -> f32 {
    let topo = Topology::get();
    let tip = target_tip(corner);
    board
        .pieces_of(corner)
        .map(|cell| topo.distance(cell, tip) as f32)
        .sum()
}

/// Scores a position for `player` between 0 and 1; 0.5 is level with the
/// average opponent.
fn leaf_value(board: &Board, seats: &[Corner], player: Corner) -> f32 {
    let rivals: Vec<f32> = seats
        .iter()
        .filter(|&&c| c != player)
        .map(|&c| remaining(board, c))
        .collect();
    if rivals.is_empty() {
        return 0.5;
    }
    let rival = rivals.iter().sum::<f32>() / rivals.len() as f32;
    let lead = rival - remaining(board, player);
    0.5 + 0.5 * (lead / DISTANCE_SCALE).tanh()
}

impl Agent for MctsAgent {
    fn name(&self) -> &str {
        "mcts"
    }

    fn suggest_move(&mut self, board: &Board, player: Corner) -> Result<Suggestion, AgentError> {
        let moves = player_moves(board, player);
        if moves.is_empty() {
            return Err(AgentError::NoLegalMoves(player));
        }
        if let Some(&m) = moves
            .iter()
            .find(|m| StandardRules.has_won(&board.with_move(m), player))
        {
            return Ok(to_suggestion(board, m));
        }
        if moves.len() == 1 {
            return Ok(to_suggestion(board, moves[0]));
        }

        let seats = seats_on(board, player);
        let mut arms = vec![Arm::default(); moves.len()];
        for played in 0..self.settings.simulations {
            let i = self.select(&arms, played);
            let value = self.playout(board, &seats, player, &moves[i]);
            arms[i].visits += 1;
            arms[i].total += value;
        }

        let mut best = 0;
        for (i, arm) in arms.iter().enumerate().skip(1) {
            let top = &arms[best];
            if arm.visits > top.visits || (arm.visits == top.visits && arm.mean() > top.mean()) {
                best = i;
            }
        }
        Ok(to_suggestion(board, moves[best]))
    }
}
