//! Random agent - plays a random legal turn.
//!
//! The simplest possible computer player, useful as a baseline opponent.

use crate::to_suggestion;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sternhalma_core::Corner;
use sternhalma_engine::{player_moves, Agent, AgentError, Board, Suggestion};

/// Picks uniformly among every legal turn, one entry per destination.
#[derive(Debug)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    /// Creates an agent whose choices are fixed by `seed`.
    pub fn new(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn suggest_move(&mut self, board: &Board, player: Corner) -> Result<Suggestion, AgentError> {
        let moves = player_moves(board, player);
        let m = moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(AgentError::NoLegalMoves(player))?;
        Ok(to_suggestion(board, m))
    }
}
