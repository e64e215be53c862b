//! Core types for Sternhalma.
//!
//! This crate provides the fundamental types shared by the rule engine, the
//! bots and the arena:
//! - [`Corner`] and [`PlayerCount`] for star points and seating
//! - [`CellKey`], [`AxialCoord`] and [`Direction`] for board coordinates
//! - [`Move`], [`MoveKind`] and [`MoveChain`] for turn contents
//! - Board notation parsing and serialization

mod cell;
mod corner;
mod mov;
mod notation;

pub use cell::{AxialCoord, CellKey, CellKeyParseError, Direction, CELL_COUNT, ROW_LENGTHS};
pub use corner::{Corner, PlayerCount};
pub use mov::{ChainError, Move, MoveChain, MoveKind};
pub use notation::{BoardNotation, NotationError};
