//! Error types for the rule engine.

use sternhalma_core::CellKey;
use thiserror::Error;

/// A player intent that the current turn state does not allow.
///
/// These are advisory: the offending intent is ignored and the board and
/// turn state are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("cell {0} does not hold a piece of the player to move")]
    NotYourPiece(CellKey),

    #[error("a move was already made this turn; only the moved piece may continue")]
    PieceLocked,

    #[error("no piece is selected")]
    NoSelection,

    #[error("{to} is not reachable from {from}")]
    Unreachable { from: CellKey, to: CellKey },

    #[error("no move has been made this turn")]
    NothingToUndo,

    #[error("cannot commit a turn without a move")]
    NoMoveMade,

    #[error("cannot pass after moving")]
    MoveAlreadyMade,
}

/// Errors raised by the engine and game sessions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid player count: {0} (expected 2, 3, 4 or 6)")]
    InvalidPlayerCount(u8),

    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),

    #[error("invalid AI move: {0}")]
    InvalidAiMove(String),

    #[error("AI unavailable: {0}")]
    AiUnavailable(String),

    #[error("persistence failure: {0}")]
    PersistenceFailure(String),
}
