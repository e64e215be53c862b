//! The per-turn state machine.
//!
//! A turn moves through three phases:
//!
//! - `Idle`: nothing selected.
//! - `Selected`: one of the player's pieces is picked and its destinations
//!   are shown. Selecting another own piece switches; selecting anything
//!   else clears the selection.
//! - `Moved`: at least one move was made. The moved piece is locked. After a
//!   jump it may keep jumping; after a simple move it can go nowhere.
//!
//! Every committed transition replaces the board and state wholesale. A
//! rejected intent returns an [`IllegalMove`] and leaves both unchanged.

use crate::error::IllegalMove;
use crate::movegen::{jump_path, legal_destinations, Destinations};
use crate::topology::Topology;
use crate::Board;
use sternhalma_core::{CellKey, Corner, Move, MoveChain};

/// Where the current turn stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    Selected {
        origin: CellKey,
        destinations: Destinations,
    },
    Moved {
        locked: CellKey,
        destinations: Destinations,
    },
}

/// The board as it was before the turn's first move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSnapshot {
    board: Board,
}

impl TurnSnapshot {
    pub fn board(&self) -> &Board {
        &self.board
    }
}

/// State of the turn in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    player: Corner,
    phase: TurnPhase,
    chain: MoveChain,
    snapshot: Option<TurnSnapshot>,
}

impl TurnState {
    /// A fresh turn for `player`.
    pub fn new(player: Corner) -> Self {
        TurnState {
            player,
            phase: TurnPhase::Idle,
            chain: MoveChain::new(),
            snapshot: None,
        }
    }

    #[inline]
    pub fn player(&self) -> Corner {
        self.player
    }

    #[inline]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// Moves made so far this turn.
    #[inline]
    pub fn chain(&self) -> &MoveChain {
        &self.chain
    }

    /// The start-of-turn board, present once a move has been made.
    #[inline]
    pub fn snapshot(&self) -> Option<&TurnSnapshot> {
        self.snapshot.as_ref()
    }

    /// Destinations on offer, if a piece is selected or locked.
    pub fn destinations(&self) -> Option<&Destinations> {
        match &self.phase {
            TurnPhase::Idle => None,
            TurnPhase::Selected { destinations, .. } | TurnPhase::Moved { destinations, .. } => {
                Some(destinations)
            }
        }
    }

    /// The selected or locked cell.
    pub fn active_cell(&self) -> Option<CellKey> {
        match self.phase {
            TurnPhase::Idle => None,
            TurnPhase::Selected { origin, .. } => Some(origin),
            TurnPhase::Moved { locked, .. } => Some(locked),
        }
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        matches!(self.phase, TurnPhase::Moved { .. })
    }
}

/// Board plus turn state, advanced one intent at a time.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    board: Board,
    state: TurnState,
}

impl TurnEngine {
    /// Starts a turn for `player` on `board`.
    pub fn new(board: Board, player: Corner) -> Self {
        TurnEngine {
            board,
            state: TurnState::new(player),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// Discards the turn in progress and starts a fresh one for `player`.
    ///
    /// Moves already made this turn stay on the board.
    pub fn begin_turn(&mut self, player: Corner) {
        self.state = TurnState::new(player);
    }

    /// Selects, switches or clears the selected piece.
    pub fn select_cell(&mut self, cell: CellKey) -> Result<(), IllegalMove> {
        if self.state.has_moved() {
            return Err(IllegalMove::PieceLocked);
        }

        if self.board.occupant(cell) == Some(self.state.player) {
            self.state.phase = TurnPhase::Selected {
                origin: cell,
                destinations: legal_destinations(&self.board, cell, false),
            };
            Ok(())
        } else if matches!(self.state.phase, TurnPhase::Selected { .. }) {
            self.state.phase = TurnPhase::Idle;
            Ok(())
        } else {
            Err(IllegalMove::NotYourPiece(cell))
        }
    }

    /// Clears the selection without moving.
    pub fn deselect(&mut self) {
        if matches!(self.state.phase, TurnPhase::Selected { .. }) {
            self.state.phase = TurnPhase::Idle;
        }
    }

    /// Moves the selected or locked piece to `destination`.
    ///
    /// A multi-hop jump landing is expanded into its individual hops, each
    /// appended to the turn's chain. Returns the hops applied.
    pub fn confirm_move(&mut self, destination: CellKey) -> Result<Vec<Move>, IllegalMove> {
        let (from, destinations, chain_started) = match &self.state.phase {
            TurnPhase::Idle => return Err(IllegalMove::NoSelection),
            TurnPhase::Selected {
                origin,
                destinations,
            } => (*origin, destinations, false),
            TurnPhase::Moved {
                locked,
                destinations,
            } => (*locked, destinations, true),
        };
        let unreachable = IllegalMove::Unreachable {
            from,
            to: destination,
        };
        if !destinations.contains(&destination) {
            return Err(unreachable);
        }

        let hops: Vec<Move> = if !chain_started && Topology::get().are_adjacent(from, destination) {
            vec![Move::simple(from, destination)]
        } else {
            match jump_path(&self.board, from, destination) {
                Some(path) => path.moves().to_vec(),
                None => return Err(unreachable),
            }
        };

        let mut chain = self.state.chain.clone();
        let mut board = self.board.clone();
        for hop in &hops {
            chain.push(*hop).map_err(|_| unreachable.clone())?;
            board = board.with_move(hop);
        }

        let snapshot = match self.state.snapshot.take() {
            Some(snapshot) => snapshot,
            None => TurnSnapshot {
                board: self.board.clone(),
            },
        };
        let destinations = if chain.is_simple() {
            Destinations::new()
        } else {
            legal_destinations(&board, destination, true)
        };

        self.board = board;
        self.state.chain = chain;
        self.state.snapshot = Some(snapshot);
        self.state.phase = TurnPhase::Moved {
            locked: destination,
            destinations,
        };
        Ok(hops)
    }

    /// Reverses the most recent move of the turn.
    ///
    /// Undoing the only move returns to `Idle` with no selection.
    pub fn undo_last_step(&mut self) -> Result<Move, IllegalMove> {
        if !self.state.has_moved() {
            return Err(IllegalMove::NothingToUndo);
        }
        let mut chain = self.state.chain.clone();
        let last = chain.pop().ok_or(IllegalMove::NothingToUndo)?;
        let board = self.board.with_move(&last.reversed());

        if chain.is_empty() {
            self.state.phase = TurnPhase::Idle;
            self.state.snapshot = None;
        } else {
            self.state.phase = TurnPhase::Moved {
                locked: last.from,
                destinations: legal_destinations(&board, last.from, true),
            };
        }
        self.board = board;
        self.state.chain = chain;
        Ok(last)
    }

    /// Restores the start-of-turn board and returns to `Idle`.
    pub fn undo_to_start(&mut self) -> Result<(), IllegalMove> {
        if !self.state.has_moved() {
            return Err(IllegalMove::NothingToUndo);
        }
        let snapshot = self.state.snapshot.take().ok_or(IllegalMove::NothingToUndo)?;
        self.board = snapshot.board;
        self.state = TurnState::new(self.state.player);
        Ok(())
    }

    /// Ends the turn, returning its moves. The engine is left `Idle` for the
    /// same player until [`begin_turn`](TurnEngine::begin_turn).
    pub fn commit_turn(&mut self) -> Result<MoveChain, IllegalMove> {
        if !self.state.has_moved() {
            return Err(IllegalMove::NoMoveMade);
        }
        let chain = std::mem::take(&mut self.state.chain);
        self.state = TurnState::new(self.state.player);
        Ok(chain)
    }

    /// Ends the turn without moving. Allowed before any move is made.
    pub fn pass_turn(&mut self) -> Result<(), IllegalMove> {
        if self.state.has_moved() {
            return Err(IllegalMove::MoveAlreadyMade);
        }
        self.state = TurnState::new(self.state.player);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sternhalma_core::PlayerCount;

    fn cell(col: u8, row: u8) -> CellKey {
        CellKey::new(col, row).unwrap()
    }

    fn opening() -> TurnEngine {
        TurnEngine::new(Board::starting(PlayerCount::TWO), Corner::North)
    }

    #[test]
    fn select_own_piece() {
        let mut engine = opening();
        engine.select_cell(cell(0, 3)).unwrap();
        match engine.state().phase() {
            TurnPhase::Selected {
                origin,
                destinations,
            } => {
                assert_eq!(*origin, cell(0, 3));
                assert_eq!(destinations.len(), 2);
            }
            other => panic!("unexpected phase {:?}", other),
        }
    }

    #[test]
    fn select_opponent_from_idle_is_rejected() {
        let mut engine = opening();
        assert_eq!(
            engine.select_cell(cell(0, 16)),
            Err(IllegalMove::NotYourPiece(cell(0, 16)))
        );
        assert_eq!(engine.state().phase(), &TurnPhase::Idle);
    }

    #[test]
    fn select_elsewhere_clears_selection() {
        let mut engine = opening();
        engine.select_cell(cell(0, 3)).unwrap();
        engine.select_cell(cell(4, 8)).unwrap();
        assert_eq!(engine.state().phase(), &TurnPhase::Idle);
    }

    #[test]
    fn simple_move_locks_turn() {
        let mut engine = opening();
        let before = engine.board().clone();
        engine.select_cell(cell(0, 3)).unwrap();
        let hops = engine.confirm_move(cell(4, 4)).unwrap();
        assert_eq!(hops, vec![Move::simple(cell(0, 3), cell(4, 4))]);
        assert_eq!(engine.state().destinations().map(|d| d.len()), Some(0));
        assert_eq!(engine.state().snapshot().map(|s| s.board()), Some(&before));
        assert_eq!(engine.select_cell(cell(1, 3)), Err(IllegalMove::PieceLocked));
        assert_eq!(engine.pass_turn(), Err(IllegalMove::MoveAlreadyMade));

        let chain = engine.commit_turn().unwrap();
        assert!(chain.is_simple());
        assert_eq!(engine.board().occupant(cell(4, 4)), Some(Corner::North));
        assert_eq!(engine.state().phase(), &TurnPhase::Idle);
    }

    #[test]
    fn unreachable_destination_changes_nothing() {
        let mut engine = opening();
        engine.select_cell(cell(0, 3)).unwrap();
        let before = engine.clone();
        assert_eq!(
            engine.confirm_move(cell(4, 8)),
            Err(IllegalMove::Unreachable {
                from: cell(0, 3),
                to: cell(4, 8)
            })
        );
        assert_eq!(engine.board(), before.board());
        assert_eq!(engine.state(), before.state());
    }

    #[test]
    fn confirm_without_selection() {
        let mut engine = opening();
        assert_eq!(engine.confirm_move(cell(4, 4)), Err(IllegalMove::NoSelection));
    }

    #[test]
    fn jump_then_continue_then_undo() {
        let mut board = Board::empty();
        board.place(cell(0, 8), Corner::North);
        board.place(cell(1, 8), Corner::South);
        board.place(cell(3, 8), Corner::South);
        let mut engine = TurnEngine::new(board.clone(), Corner::North);

        engine.select_cell(cell(0, 8)).unwrap();
        engine.confirm_move(cell(2, 8)).unwrap();
        let destinations = engine.state().destinations().unwrap().clone();
        assert!(destinations.contains(&cell(4, 8)));
        assert!(!destinations.contains(&cell(2, 7)));

        engine.confirm_move(cell(4, 8)).unwrap();
        assert_eq!(engine.state().chain().len(), 2);

        assert_eq!(engine.undo_last_step(), Ok(Move::jump(cell(2, 8), cell(4, 8))));
        assert_eq!(engine.state().active_cell(), Some(cell(2, 8)));
        assert_eq!(engine.board().occupant(cell(2, 8)), Some(Corner::North));

        engine.undo_last_step().unwrap();
        assert_eq!(engine.state().phase(), &TurnPhase::Idle);
        assert_eq!(engine.board(), &board);
        assert_eq!(engine.undo_last_step(), Err(IllegalMove::NothingToUndo));
    }

    #[test]
    fn multi_hop_landing_expands() {
        let mut board = Board::empty();
        board.place(cell(0, 8), Corner::North);
        board.place(cell(1, 8), Corner::South);
        board.place(cell(3, 8), Corner::South);
        let mut engine = TurnEngine::new(board, Corner::North);

        engine.select_cell(cell(0, 8)).unwrap();
        let hops = engine.confirm_move(cell(4, 8)).unwrap();
        assert_eq!(
            hops,
            vec![Move::jump(cell(0, 8), cell(2, 8)), Move::jump(cell(2, 8), cell(4, 8))]
        );
        assert_eq!(engine.state().chain().len(), 2);
    }

    #[test]
    fn undo_to_start_restores_snapshot() {
        let mut engine = opening();
        let before = engine.board().clone();
        engine.select_cell(cell(1, 2)).unwrap();
        engine.confirm_move(cell(5, 4)).unwrap();
        assert_ne!(engine.board(), &before);
        engine.undo_to_start().unwrap();
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.state(), &TurnState::new(Corner::North));
        assert_eq!(engine.undo_to_start(), Err(IllegalMove::NothingToUndo));
    }

    #[test]
    fn pass_and_commit_guards() {
        let mut engine = opening();
        assert_eq!(engine.commit_turn(), Err(IllegalMove::NoMoveMade));
        engine.select_cell(cell(0, 3)).unwrap();
        engine.pass_turn().unwrap();
        assert_eq!(engine.state().phase(), &TurnPhase::Idle);
    }
}
