//! The seam between a game session and computer players.

use crate::Board;
use serde::{Deserialize, Serialize};
use std::fmt;
use sternhalma_core::{Corner, Move, MoveChain};
use thiserror::Error;

/// A move proposed by an agent: either one move or a full hop sequence.
///
/// A single jump may name a multi-hop landing directly; the session expands
/// it into individual hops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suggestion {
    Single(Move),
    Chain(MoveChain),
}

impl Suggestion {
    /// Returns the proposed moves in order.
    pub fn moves(&self) -> &[Move] {
        match self {
            Suggestion::Single(m) => std::slice::from_ref(m),
            Suggestion::Chain(chain) => chain.moves(),
        }
    }
}

impl From<Move> for Suggestion {
    fn from(m: Move) -> Self {
        Suggestion::Single(m)
    }
}

impl From<MoveChain> for Suggestion {
    fn from(chain: MoveChain) -> Self {
        Suggestion::Chain(chain)
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::Single(m) => write!(f, "{}", m),
            Suggestion::Chain(chain) => write!(f, "{}", chain),
        }
    }
}

/// Reasons an agent could not produce a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("agent unavailable: {0}")]
    Unavailable(String),

    #[error("no legal moves for {0}")]
    NoLegalMoves(Corner),
}

/// A computer player.
///
/// Implementations must only read the board they are given. The session
/// validates every suggestion before it touches the game.
pub trait Agent {
    /// Returns the agent's name.
    fn name(&self) -> &str;

    /// Proposes a move for `player` on `board`.
    fn suggest_move(&mut self, board: &Board, player: Corner) -> Result<Suggestion, AgentError>;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn suggest_move(&mut self, board: &Board, player: Corner) -> Result<Suggestion, AgentError> {
        (**self).suggest_move(board, player)
    }
}
