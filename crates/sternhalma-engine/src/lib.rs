//! Sternhalma rule engine.
//!
//! This crate provides:
//! - [`Topology`] - the static geometry of the 121-cell star
//! - [`Board`] - cell occupancy with non-aliasing updates
//! - Move generation: simple steps, chained jumps and hop reconstruction
//! - [`TurnEngine`] - the per-turn select/move/undo/commit state machine
//! - [`RuleSet`] - victory conditions, standard and lenient
//! - [`GameSession`] - seats, turn order, AI requests and persistence
//!
//! # Example
//!
//! ```
//! use sternhalma_core::{CellKey, Corner};
//! use sternhalma_engine::{GameSession, Intent, IntentOutcome, SessionConfig};
//!
//! let mut session = GameSession::in_memory(SessionConfig::new(2).unwrap());
//! let piece = CellKey::new(0, 3).unwrap();
//! let target = CellKey::new(4, 4).unwrap();
//!
//! session.apply_intent(Intent::SelectCell(piece));
//! session.apply_intent(Intent::ConfirmMove(target));
//! let outcome = session.apply_intent(Intent::CommitTurn);
//!
//! assert!(matches!(outcome, IntentOutcome::TurnEnded(_)));
//! assert_eq!(session.active_player(), Corner::South);
//! ```

pub mod agent;
mod board;
mod error;
pub mod movegen;
pub mod persistence;
pub mod rules;
mod session;
mod topology;
mod turn;

pub use agent::{Agent, AgentError, Suggestion};
pub use board::Board;
pub use error::{EngineError, IllegalMove};
pub use movegen::{
    jump_moves, jump_path, legal_destinations, perft, player_moves, simple_moves, Destinations,
};
pub use persistence::{
    InMemoryGateway, PersistenceError, PersistenceGateway, PieceId, TurnId, TurnRecord,
};
pub use rules::{LenientRules, RuleSet, StandardRules, VictoryRule};
pub use session::{
    AiOutcome, AiRequest, AiToken, BlockReason, Controller, GameSession, GameStatus, Intent,
    IntentOutcome, PlayedTurn, Seat, SessionConfig, TurnSummary,
};
pub use topology::{
    active_corners, build_board, opposite_corner, target_cells_for, Topology, HOME_SIZE,
};
pub use turn::{TurnEngine, TurnPhase, TurnSnapshot, TurnState};
