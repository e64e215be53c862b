//! JSON export of finished matches.
//!
//! Each match becomes one file holding its seats, outcome and the full
//! turn history, suitable for replay or offline analysis.

use crate::runner::{MatchEnd, MatchReport, SeatReport};
use chrono::Utc;
use serde::Serialize;
use std::path::Path;
use sternhalma_core::Corner;
use sternhalma_engine::PlayedTurn;

/// JSON representation of a finished match.
#[derive(Serialize)]
struct MatchJson<'a> {
    id: &'a str,
    seats: &'a [SeatReport],
    end: MatchEnd,
    #[serde(skip_serializing_if = "Option::is_none")]
    winner: Option<Corner>,
    turns: u32,
    stalls: u32,
    final_board: &'a str,
    history: &'a [PlayedTurn],
    /// ISO 8601 timestamp when the file was created.
    created_at: String,
}

/// Writes a finished match to a JSON file.
///
/// The file has this shape:
/// ```json
/// {
///   "id": "match-uuid",
///   "seats": [{ "corner": 0, "agent": "greedy" }, { "corner": 3, "agent": "random" }],
///   "end": { "won": 0 },
///   "winner": 0,
///   "turns": 97,
///   "stalls": 0,
///   "final_board": "3/33/333/3333/...",
///   "history": [
///     { "turn": 1, "player": 0, "chain": [{ "from": "2-3", "to": "2-5", "kind": "jump" }] }
///   ],
///   "created_at": "2026-01-15T12:00:00Z"
/// }
/// ```
pub fn write_json<P: AsRef<Path>>(path: P, id: &str, report: &MatchReport) -> std::io::Result<()> {
    let json = MatchJson {
        id,
        seats: &report.seats,
        end: report.end,
        winner: report.winner(),
        turns: report.turns,
        stalls: report.stalls,
        final_board: &report.final_board,
        history: &report.history,
        created_at: Utc::now().to_rfc3339(),
    };

    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &json)?;
    Ok(())
}
