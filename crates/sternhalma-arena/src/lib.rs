//! Sternhalma Arena - runs matches between computer players.
//!
//! # Modules
//!
//! - [`config`] - `arena.toml` loading and command-line overrides
//! - [`runner`] - Plays a session to the end with one agent per seat
//! - [`storage`] - SQLite persistence gateway and match results
//! - [`json_output`] - JSON export of finished matches

pub mod config;
pub mod json_output;
pub mod runner;
pub mod storage;
