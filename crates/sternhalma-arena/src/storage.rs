//! SQLite storage for matches, pieces, moves and turns.
//!
//! [`SqliteGateway`] is the session's [`PersistenceGateway`]: it hands out
//! piece ids when a match starts, follows every piece as it moves and keeps
//! one row per turn. Finished matches are summarized with
//! [`SqliteGateway::save_result`].

use crate::runner::{MatchEnd, MatchReport};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result as SqliteResult};
use std::path::Path;
use sternhalma_core::{CellKey, Corner, MoveChain, MoveKind};
use sternhalma_engine::{Board, PersistenceError, PersistenceGateway, PieceId, TurnId, TurnRecord};
use uuid::Uuid;

/// SQLite-backed persistence gateway.
///
/// One gateway can record several matches in a row; every
/// [`start_match`](PersistenceGateway::start_match) opens a new match id.
///
/// # Example
///
/// ```ignore
/// let gateway = SqliteGateway::open("data/arena.db")?;
/// let mut session = GameSession::new(config, gateway);
/// let report = runner.run(&mut session, agents).await?;
/// session.gateway().save_result(&report)?;
/// ```
pub struct SqliteGateway {
    conn: Connection,
    match_id: String,
}

/// A move as read back from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMove {
    pub turn: TurnId,
    pub seq: u32,
    pub player: u8,
    pub piece: PieceId,
    pub from: String,
    pub to: String,
    pub kind: String,
}

fn backend(e: rusqlite::Error) -> PersistenceError {
    PersistenceError::Backend(e.to_string())
}

fn kind_str(kind: MoveKind) -> &'static str {
    match kind {
        MoveKind::Simple => "simple",
        MoveKind::Jump => "jump",
    }
}

impl SqliteGateway {
    /// Opens or creates a database at the given path.
    ///
    /// The schema is created on first open.
    pub fn open<P: AsRef<Path>>(path: P) -> SqliteResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> SqliteResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> SqliteResult<Self> {
        let gateway = Self {
            conn,
            match_id: Uuid::new_v4().to_string(),
        };
        gateway.init_schema()?;
        Ok(gateway)
    }

    /// Initializes the database schema if tables do not exist.
    fn init_schema(&self) -> SqliteResult<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS matches (
                id TEXT PRIMARY KEY,
                players INTEGER NOT NULL,
                result TEXT,
                winner INTEGER,
                turns INTEGER,
                final_board TEXT,
                created_at TEXT NOT NULL,
                finished_at TEXT
            );

            CREATE TABLE IF NOT EXISTS participants (
                match_id TEXT NOT NULL,
                corner INTEGER NOT NULL,
                agent TEXT NOT NULL,
                PRIMARY KEY (match_id, corner)
            );

            CREATE TABLE IF NOT EXISTS pieces (
                match_id TEXT NOT NULL,
                id TEXT NOT NULL,
                corner INTEGER NOT NULL,
                position TEXT NOT NULL,
                PRIMARY KEY (match_id, id)
            );

            CREATE TABLE IF NOT EXISTS moves (
                match_id TEXT NOT NULL,
                turn INTEGER NOT NULL,
                seq INTEGER NOT NULL,
                player INTEGER NOT NULL,
                piece_id TEXT NOT NULL,
                from_cell TEXT NOT NULL,
                to_cell TEXT NOT NULL,
                kind TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (match_id, turn, seq)
            );

            CREATE TABLE IF NOT EXISTS turns (
                match_id TEXT NOT NULL,
                turn INTEGER NOT NULL,
                player INTEGER NOT NULL,
                started_at TEXT NOT NULL,
                ended_at TEXT,
                PRIMARY KEY (match_id, turn)
            );
            ",
        )
    }

    /// Id of the match currently being recorded.
    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    /// Stores the outcome and participants of the current match.
    pub fn save_result(&self, report: &MatchReport) -> SqliteResult<()> {
        let result = match report.end {
            MatchEnd::Won(_) => "won",
            MatchEnd::TurnLimit => "turn_limit",
            MatchEnd::Aborted => "aborted",
        };
        self.conn.execute(
            "UPDATE matches SET result = ?2, winner = ?3, turns = ?4, final_board = ?5, finished_at = ?6
             WHERE id = ?1",
            (
                &self.match_id,
                result,
                report.winner().map(|c| c.index() as i64),
                report.turns as i64,
                &report.final_board,
                Utc::now().to_rfc3339(),
            ),
        )?;
        for seat in &report.seats {
            self.conn.execute(
                "INSERT OR REPLACE INTO participants (match_id, corner, agent) VALUES (?1, ?2, ?3)",
                (&self.match_id, seat.corner.index() as i64, &seat.agent),
            )?;
        }
        Ok(())
    }

    /// Returns the moves of a match in play order.
    pub fn moves_for(&self, match_id: &str) -> SqliteResult<Vec<StoredMove>> {
        let mut stmt = self.conn.prepare(
            "SELECT turn, seq, player, piece_id, from_cell, to_cell, kind FROM moves
             WHERE match_id = ?1 ORDER BY turn, seq",
        )?;
        let rows = stmt.query_map([match_id], |row| {
            Ok(StoredMove {
                turn: row.get(0)?,
                seq: row.get(1)?,
                player: row.get(2)?,
                piece: PieceId(row.get(3)?),
                from: row.get(4)?,
                to: row.get(5)?,
                kind: row.get(6)?,
            })
        })?;
        rows.collect()
    }

    /// Returns the number of turn rows of a match.
    pub fn turn_count(&self, match_id: &str) -> SqliteResult<u32> {
        self.conn.query_row(
            "SELECT COUNT(*) FROM turns WHERE match_id = ?1",
            [match_id],
            |row| row.get(0),
        )
    }

    /// Returns `(games, wins)` for an agent across every saved match.
    pub fn agent_stats(&self, agent: &str) -> SqliteResult<(u32, u32)> {
        self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(CASE WHEN m.winner = p.corner THEN 1 ELSE 0 END), 0)
             FROM participants p JOIN matches m ON m.id = p.match_id
             WHERE p.agent = ?1",
            [agent],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
    }
}

impl PersistenceGateway for SqliteGateway {
    fn start_match(&mut self, board: &Board, seats: &[Corner]) -> Result<(), PersistenceError> {
        self.match_id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction().map_err(backend)?;
        tx.execute(
            "INSERT INTO matches (id, players, created_at) VALUES (?1, ?2, ?3)",
            (&self.match_id, seats.len() as i64, &now),
        )
        .map_err(backend)?;
        for &corner in seats {
            for (n, cell) in board.pieces_of(corner).enumerate() {
                tx.execute(
                    "INSERT INTO pieces (match_id, id, corner, position) VALUES (?1, ?2, ?3, ?4)",
                    (
                        &self.match_id,
                        format!("P{}-{}", corner.index(), n),
                        corner.index() as i64,
                        cell.to_string(),
                    ),
                )
                .map_err(backend)?;
            }
        }
        if let Some(first) = seats.first() {
            tx.execute(
                "INSERT INTO turns (match_id, turn, player, started_at) VALUES (?1, 1, ?2, ?3)",
                (&self.match_id, first.index() as i64, &now),
            )
            .map_err(backend)?;
        }
        tx.commit().map_err(backend)?;
        tracing::debug!("Recording match {}", self.match_id);
        Ok(())
    }

    fn lookup_piece_id(&self, position: CellKey) -> Option<PieceId> {
        let found = self
            .conn
            .query_row(
                "SELECT id FROM pieces WHERE match_id = ?1 AND position = ?2",
                (&self.match_id, position.to_string()),
                |row| row.get(0),
            )
            .optional();
        match found {
            Ok(id) => id.map(PieceId),
            Err(e) => {
                tracing::warn!("Piece lookup on {} failed: {}", position, e);
                None
            }
        }
    }

    fn record_moves(
        &mut self,
        chain: &MoveChain,
        player: Corner,
        turn: TurnId,
    ) -> Result<(), PersistenceError> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction().map_err(backend)?;
        for (seq, m) in chain.moves().iter().enumerate() {
            let piece: Option<String> = tx
                .query_row(
                    "SELECT id FROM pieces WHERE match_id = ?1 AND position = ?2",
                    (&self.match_id, m.from.to_string()),
                    |row| row.get(0),
                )
                .optional()
                .map_err(backend)?;
            let piece = piece.ok_or(PersistenceError::UnknownPiece(m.from))?;

            tx.execute(
                "UPDATE pieces SET position = ?3 WHERE match_id = ?1 AND id = ?2",
                (&self.match_id, &piece, m.to.to_string()),
            )
            .map_err(backend)?;
            tx.execute(
                "INSERT INTO moves (match_id, turn, seq, player, piece_id, from_cell, to_cell, kind, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                (
                    &self.match_id,
                    turn as i64,
                    seq as i64,
                    player.index() as i64,
                    &piece,
                    m.from.to_string(),
                    m.to.to_string(),
                    kind_str(m.kind),
                    &now,
                ),
            )
            .map_err(backend)?;
        }
        tx.commit().map_err(backend)
    }

    fn advance_turn(&mut self, prev: TurnRecord, next: TurnRecord) -> Result<TurnRecord, PersistenceError> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction().map_err(backend)?;
        tx.execute(
            "UPDATE turns SET ended_at = ?3 WHERE match_id = ?1 AND turn = ?2",
            (&self.match_id, prev.turn as i64, &now),
        )
        .map_err(backend)?;
        tx.execute(
            "INSERT INTO turns (match_id, turn, player, started_at) VALUES (?1, ?2, ?3, ?4)",
            (&self.match_id, next.turn as i64, next.player.index() as i64, &now),
        )
        .map_err(backend)?;
        tx.commit().map_err(backend)?;
        Ok(next)
    }
}
