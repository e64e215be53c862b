//! Computer players for Sternhalma.
//!
//! - [`RandomAgent`] plays a uniformly random legal turn
//! - [`GreedyAgent`] plays the turn with the best one-ply heuristic score
//! - [`MctsAgent`] plays the turn that does best over seeded random playouts
//!
//! All of them implement [`sternhalma_engine::Agent`].

mod greedy;
mod mcts;
mod random;

pub use greedy::{GreedyAgent, GreedyWeights};
pub use mcts::{MctsAgent, MctsSettings};
pub use random::RandomAgent;

use sternhalma_core::Move;
use sternhalma_engine::{jump_path, Agent, Board, Suggestion};
use thiserror::Error;

/// Names accepted by [`agent_by_name`].
pub const AGENT_NAMES: [&str; 3] = ["greedy", "mcts", "random"];

/// An agent name that [`agent_by_name`] does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown agent '{0}' (expected \"greedy\", \"mcts\" or \"random\")")]
pub struct UnknownAgent(pub String);

/// Builds an agent from its configuration name.
///
/// `seed` drives any randomness, so equal seeds replay equal games.
pub fn agent_by_name(name: &str, seed: u64) -> Result<Box<dyn Agent + Send>, UnknownAgent> {
    match name {
        "greedy" => Ok(Box::new(GreedyAgent::new())),
        "mcts" => Ok(Box::new(MctsAgent::new(seed))),
        "random" => Ok(Box::new(RandomAgent::new(seed))),
        other => Err(UnknownAgent(other.to_string())),
    }
}

/// Turns a generated move into a suggestion, expanding jumps into hops.
pub(crate) fn to_suggestion(board: &Board, m: Move) -> Suggestion {
    if !m.is_jump() {
        return Suggestion::Single(m);
    }
    match jump_path(board, m.from, m.to) {
        Some(chain) => Suggestion::Chain(chain),
        None => Suggestion::Single(m),
    }
}
