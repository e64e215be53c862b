//! Persistence seam.
//!
//! A session reports every committed turn through a [`PersistenceGateway`].
//! Gateway failures never roll back the board; the session keeps the rejected
//! writes, keeps playing and replays them once the gateway accepts writes again.

use crate::Board;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use sternhalma_core::{CellKey, Corner, Move, MoveChain};
use thiserror::Error;

/// Sequential turn number, starting at 1.
pub type TurnId = u32;

/// Stable identifier of one physical piece, owned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub String);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A turn as known to the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: TurnId,
    pub player: Corner,
}

/// Errors reported by a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("no piece on {0}")]
    UnknownPiece(CellKey),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Storage for piece identities, moves and turn progression.
pub trait PersistenceGateway {
    /// Called once when a session starts with its starting board and seats.
    fn start_match(&mut self, _board: &Board, _seats: &[Corner]) -> Result<(), PersistenceError> {
        Ok(())
    }

    /// Returns the id of the piece currently standing on a cell.
    fn lookup_piece_id(&self, position: CellKey) -> Option<PieceId>;

    /// Records every move of a committed turn, in order.
    fn record_moves(
        &mut self,
        chain: &MoveChain,
        player: Corner,
        turn: TurnId,
    ) -> Result<(), PersistenceError>;

    /// Closes `prev` and opens `next`, returning the stored record of `next`.
    fn advance_turn(&mut self, prev: TurnRecord, next: TurnRecord) -> Result<TurnRecord, PersistenceError>;
}

/// A stored move with the piece that made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMove {
    pub turn: TurnId,
    pub player: Corner,
    pub piece: PieceId,
    pub mov: Move,
}

/// Gateway that keeps everything in memory.
///
/// Piece ids are `P{corner}-{n}`, numbered in cell order within each
/// corner's starting pieces. [`set_failing`](InMemoryGateway::set_failing)
/// makes every write fail, for exercising degraded sessions.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    pieces: HashMap<CellKey, PieceId>,
    moves: Vec<RecordedMove>,
    turns: Vec<TurnRecord>,
    failing: bool,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent writes succeed or fail.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Returns every recorded move in order.
    pub fn moves(&self) -> &[RecordedMove] {
        &self.moves
    }

    /// Returns every opened turn in order.
    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    fn check_writable(&self) -> Result<(), PersistenceError> {
        if self.failing {
            Err(PersistenceError::Backend("in-memory gateway set to fail".to_string()))
        } else {
            Ok(())
        }
    }
}

impl PersistenceGateway for InMemoryGateway {
    fn start_match(&mut self, board: &Board, seats: &[Corner]) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.pieces.clear();
        self.moves.clear();
        self.turns.clear();
        for &corner in seats {
            for (n, cell) in board.pieces_of(corner).enumerate() {
                self.pieces.insert(cell, PieceId(format!("P{}-{}", corner.index(), n)));
            }
        }
        if let Some(&first) = seats.first() {
            self.turns.push(TurnRecord { turn: 1, player: first });
        }
        Ok(())
    }

    fn lookup_piece_id(&self, position: CellKey) -> Option<PieceId> {
        self.pieces.get(&position).cloned()
    }

    fn record_moves(
        &mut self,
        chain: &MoveChain,
        player: Corner,
        turn: TurnId,
    ) -> Result<(), PersistenceError> {
        self.check_writable()?;
        let (Some(origin), Some(destination)) = (chain.origin(), chain.destination()) else {
            return Ok(());
        };
        // Nothing changes unless the moving piece is known.
        let piece = self
            .lookup_piece_id(origin)
            .ok_or(PersistenceError::UnknownPiece(origin))?;
        self.moves.extend(chain.moves().iter().map(|m| RecordedMove {
            turn,
            player,
            piece: piece.clone(),
            mov: *m,
        }));
        self.pieces.remove(&origin);
        self.pieces.insert(destination, piece);
        Ok(())
    }

    fn advance_turn(&mut self, _prev: TurnRecord, next: TurnRecord) -> Result<TurnRecord, PersistenceError> {
        self.check_writable()?;
        self.turns.push(next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_board;

    fn cell(col: u8, row: u8) -> CellKey {
        CellKey::new(col, row).unwrap()
    }

    #[test]
    fn piece_ids_follow_moves() {
        let board = build_board(2).unwrap();
        let mut gateway = InMemoryGateway::new();
        gateway.start_match(&board, &[Corner::North, Corner::South]).unwrap();
        assert_eq!(gateway.lookup_piece_id(cell(0, 0)), Some(PieceId("P0-0".into())));
        assert_eq!(gateway.lookup_piece_id(cell(0, 16)), Some(PieceId("P3-9".into())));
        assert_eq!(gateway.lookup_piece_id(cell(4, 8)), None);

        let id = gateway.lookup_piece_id(cell(0, 3)).unwrap();
        let chain = MoveChain::single(Move::simple(cell(0, 3), cell(4, 4)));
        gateway.record_moves(&chain, Corner::North, 1).unwrap();
        assert_eq!(gateway.lookup_piece_id(cell(0, 3)), None);
        assert_eq!(gateway.lookup_piece_id(cell(4, 4)), Some(id.clone()));
        assert_eq!(gateway.moves().len(), 1);
        assert_eq!(gateway.moves()[0].piece, id);
    }

    #[test]
    fn unknown_piece_is_reported() {
        let mut gateway = InMemoryGateway::new();
        let chain = MoveChain::single(Move::simple(cell(4, 8), cell(5, 8)));
        assert_eq!(
            gateway.record_moves(&chain, Corner::North, 1),
            Err(PersistenceError::UnknownPiece(cell(4, 8)))
        );
    }

    #[test]
    fn jump_chain_is_recorded_whole() {
        let board = build_board(2).unwrap();
        let mut gateway = InMemoryGateway::new();
        gateway.start_match(&board, &[Corner::North, Corner::South]).unwrap();
        let id = gateway.lookup_piece_id(cell(1, 3)).unwrap();

        let mut chain = MoveChain::single(Move::jump(cell(1, 3), cell(5, 5)));
        chain.push(Move::jump(cell(5, 5), cell(6, 7))).unwrap();
        gateway.record_moves(&chain, Corner::North, 1).unwrap();

        assert_eq!(gateway.moves().len(), 2);
        assert!(gateway.moves().iter().all(|m| m.piece == id));
        assert_eq!(gateway.lookup_piece_id(cell(1, 3)), None);
        assert_eq!(gateway.lookup_piece_id(cell(5, 5)), None);
        assert_eq!(gateway.lookup_piece_id(cell(6, 7)), Some(id));
    }

    #[test]
    fn rejected_chain_changes_nothing() {
        let board = build_board(2).unwrap();
        let mut gateway = InMemoryGateway::new();
        gateway.start_match(&board, &[Corner::North, Corner::South]).unwrap();

        let mut chain = MoveChain::single(Move::jump(cell(4, 8), cell(4, 6)));
        chain.push(Move::jump(cell(4, 6), cell(2, 4))).unwrap();
        assert_eq!(
            gateway.record_moves(&chain, Corner::North, 1),
            Err(PersistenceError::UnknownPiece(cell(4, 8)))
        );
        assert!(gateway.moves().is_empty());
        assert_eq!(gateway.lookup_piece_id(cell(4, 6)), None);
        assert_eq!(gateway.lookup_piece_id(cell(2, 4)), None);
        assert_eq!(gateway.lookup_piece_id(cell(0, 0)), Some(PieceId("P0-0".into())));
    }

    #[test]
    fn failing_gateway_rejects_writes() {
        let board = build_board(2).unwrap();
        let mut gateway = InMemoryGateway::new();
        gateway.start_match(&board, &[Corner::North, Corner::South]).unwrap();
        gateway.set_failing(true);
        let prev = TurnRecord { turn: 1, player: Corner::North };
        let next = TurnRecord { turn: 2, player: Corner::South };
        assert!(matches!(gateway.advance_turn(prev, next), Err(PersistenceError::Backend(_))));
        gateway.set_failing(false);
        assert_eq!(gateway.advance_turn(prev, next), Ok(next));
        assert_eq!(gateway.turns(), &[prev, next]);
    }
}
