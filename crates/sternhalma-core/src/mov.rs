//! Move representation.

use crate::CellKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How a piece travels between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// One step to an adjacent empty cell.
    Simple,
    /// A hop over an adjacent occupied cell to the empty cell beyond it.
    Jump,
}

/// A single relocation of one piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: CellKey,
    pub to: CellKey,
    pub kind: MoveKind,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: CellKey, to: CellKey, kind: MoveKind) -> Self {
        Move { from, to, kind }
    }

    /// Creates a simple step.
    #[inline]
    pub const fn simple(from: CellKey, to: CellKey) -> Self {
        Self::new(from, to, MoveKind::Simple)
    }

    /// Creates a jump.
    #[inline]
    pub const fn jump(from: CellKey, to: CellKey) -> Self {
        Self::new(from, to, MoveKind::Jump)
    }

    /// Returns true if this is a jump.
    #[inline]
    pub const fn is_jump(&self) -> bool {
        matches!(self.kind, MoveKind::Jump)
    }

    /// Returns the same move played backwards.
    #[inline]
    pub const fn reversed(self) -> Self {
        Move::new(self.to, self.from, self.kind)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = match self.kind {
            MoveKind::Simple => '>',
            MoveKind::Jump => 'x',
        };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

/// Reasons a move cannot extend a [`MoveChain`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("a simple move must be the only move of a turn")]
    SimpleNotAlone,

    #[error("the turn already ended with a simple move")]
    ClosedBySimple,

    #[error("hop starts at {got} but the piece stands on {expected}")]
    Disconnected { expected: CellKey, got: CellKey },
}

/// The moves of one turn.
///
/// Either a single simple move, or one or more consecutive jumps by the same
/// piece. [`push`](MoveChain::push) rejects anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Move>", into = "Vec<Move>")]
pub struct MoveChain {
    moves: Vec<Move>,
}

impl MoveChain {
    /// Creates an empty chain.
    pub const fn new() -> Self {
        MoveChain { moves: Vec::new() }
    }

    /// Creates a chain holding a single move.
    pub fn single(m: Move) -> Self {
        MoveChain { moves: vec![m] }
    }

    /// Appends a move, keeping the chain well formed.
    pub fn push(&mut self, m: Move) -> Result<(), ChainError> {
        if let Some(last) = self.moves.last() {
            if !last.is_jump() {
                return Err(ChainError::ClosedBySimple);
            }
            if !m.is_jump() {
                return Err(ChainError::SimpleNotAlone);
            }
            if last.to != m.from {
                return Err(ChainError::Disconnected {
                    expected: last.to,
                    got: m.from,
                });
            }
        }
        self.moves.push(m);
        Ok(())
    }

    /// Removes and returns the most recent move.
    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    /// Returns the moves in order.
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns the most recent move.
    #[inline]
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// The cell the piece stood on before the turn.
    pub fn origin(&self) -> Option<CellKey> {
        self.moves.first().map(|m| m.from)
    }

    /// The cell the piece stands on now.
    pub fn destination(&self) -> Option<CellKey> {
        self.moves.last().map(|m| m.to)
    }

    /// Returns true if the chain is a single simple step.
    pub fn is_simple(&self) -> bool {
        matches!(self.moves.as_slice(), [m] if !m.is_jump())
    }
}

impl TryFrom<Vec<Move>> for MoveChain {
    type Error = ChainError;

    fn try_from(moves: Vec<Move>) -> Result<Self, Self::Error> {
        let mut chain = MoveChain::new();
        for m in moves {
            chain.push(m)?;
        }
        Ok(chain)
    }
}

impl From<MoveChain> for Vec<Move> {
    fn from(chain: MoveChain) -> Self {
        chain.moves
    }
}

impl<'a> IntoIterator for &'a MoveChain {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl fmt::Display for MoveChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.moves.iter().enumerate() {
            if i == 0 {
                write!(f, "{}", m)?;
            } else {
                write!(f, "x{}", m.to)?;
            }
        }
        Ok(())
    }
}
