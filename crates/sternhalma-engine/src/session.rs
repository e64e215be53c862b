//! Game sessions.
//!
//! A [`GameSession`] owns the board and turn state of one game and everything
//! around it: who sits where and who controls each seat, whose turn it is,
//! requests to computer players, pausing, victory and reporting to a
//! [`PersistenceGateway`].
//!
//! Human input arrives as [`Intent`]s. Computer turns go through a request
//! and delivery pair: [`request_ai_move`](GameSession::request_ai_move) hands
//! out a board copy and a token; [`deliver_ai_suggestion`](GameSession::deliver_ai_suggestion)
//! applies the answer only if the token is still current. Changing turns,
//! cancelling, ending the game or issuing a new request invalidates a token.
//! Pausing does not: an answer that arrives while paused is held and applied
//! on [`resume`](GameSession::resume).

use crate::agent::{Agent, AgentError, Suggestion};
use crate::error::{EngineError, IllegalMove};
use crate::persistence::{InMemoryGateway, PersistenceError, PersistenceGateway, PieceId, TurnId, TurnRecord};
use crate::rules::VictoryRule;
use crate::turn::{TurnEngine, TurnState};
use crate::Board;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use sternhalma_core::{CellKey, Corner, Move, MoveChain, PlayerCount};

/// Who makes the decisions for a seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    #[default]
    Human,
    Computer,
}

/// A seated corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub corner: Corner,
    pub controller: Controller,
}

/// Settings for starting a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    players: PlayerCount,
    controllers: Vec<Controller>,
    victory: VictoryRule,
    board: Option<Board>,
}

impl SessionConfig {
    /// A game for `player_count` humans with standard victory.
    pub fn new(player_count: u8) -> Result<Self, EngineError> {
        let players =
            PlayerCount::new(player_count).ok_or(EngineError::InvalidPlayerCount(player_count))?;
        Ok(SessionConfig {
            players,
            controllers: vec![Controller::Human; players.get()],
            victory: VictoryRule::default(),
            board: None,
        })
    }

    /// Sets the controller of a seat, by seat index. Out-of-range seats are ignored.
    pub fn with_controller(mut self, seat: usize, controller: Controller) -> Self {
        if let Some(slot) = self.controllers.get_mut(seat) {
            *slot = controller;
        }
        self
    }

    /// Sets controllers in seat order.
    pub fn with_controllers(mut self, controllers: impl IntoIterator<Item = Controller>) -> Self {
        for (slot, controller) in self.controllers.iter_mut().zip(controllers) {
            *slot = controller;
        }
        self
    }

    pub fn with_victory(mut self, victory: VictoryRule) -> Self {
        self.victory = victory;
        self
    }

    /// Starts from a custom board instead of the standard setup.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    pub fn players(&self) -> PlayerCount {
        self.players
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Paused,
    Finished,
}

/// A human player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SelectCell(CellKey),
    ConfirmMove(CellKey),
    UndoLastStep,
    UndoToStart,
    CommitTurn,
    PassTurn,
}

/// Why an intent was not even considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    Finished,
    Paused,
    AwaitingAi,
    ComputerSeat,
}

/// A finished turn, as kept in the session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedTurn {
    pub turn: TurnId,
    pub player: Corner,
    /// Empty for a pass.
    pub chain: MoveChain,
}

/// What happened when a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSummary {
    pub turn: TurnId,
    pub player: Corner,
    pub chain: MoveChain,
    pub winner: Option<Corner>,
    /// The player now to move, or `None` if the game just ended.
    pub next_player: Option<Corner>,
}

/// Result of [`GameSession::apply_intent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// The intent changed the turn state; the turn continues.
    Applied,
    /// The intent ended the turn.
    TurnEnded(TurnSummary),
    /// The intent was illegal and ignored. Carries the advisory message.
    Ignored(IllegalMove),
    /// The session is not accepting intents right now.
    Blocked(BlockReason),
}

/// Identifies one AI request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AiToken(u64);

/// Work handed to a computer player.
#[derive(Debug, Clone)]
pub struct AiRequest {
    pub token: AiToken,
    pub board: Board,
    pub player: Corner,
}

/// Result of delivering an AI answer.
#[derive(Debug, Clone)]
pub enum AiOutcome {
    /// The suggestion was played.
    Applied(TurnSummary),
    /// The session is paused; the answer is held until resume.
    Queued,
    /// The token was no longer current; nothing changed.
    Stale,
    /// The suggestion was rejected; ask again with this request.
    Retry(AiRequest),
    /// The turn is stuck. A human may force a pass.
    Stalled(EngineError),
}

/// A gateway write that has not gone through yet.
#[derive(Debug, Clone)]
enum UnsavedWrite {
    Start { board: Board, seats: Vec<Corner> },
    Moves { chain: MoveChain, player: Corner, turn: TurnId },
    Turn { prev: TurnRecord, next: TurnRecord },
}

#[derive(Debug, Clone, Copy)]
struct PendingAi {
    token: AiToken,
    retried: bool,
}

/// One game of Sternhalma.
pub struct GameSession<G: PersistenceGateway = InMemoryGateway> {
    seats: Vec<Seat>,
    corners: Vec<Corner>,
    victory: VictoryRule,
    engine: TurnEngine,
    active: usize,
    turn: TurnId,
    status: GameStatus,
    winner: Option<Corner>,
    history: Vec<PlayedTurn>,
    gateway: G,
    persistence_error: Option<EngineError>,
    unsaved: VecDeque<UnsavedWrite>,
    next_token: u64,
    pending_ai: Option<PendingAi>,
    queued: Option<(AiToken, Result<Suggestion, AgentError>)>,
    stalled: Option<EngineError>,
}

impl GameSession<InMemoryGateway> {
    /// Starts a session that keeps its records in memory.
    pub fn in_memory(config: SessionConfig) -> Self {
        Self::new(config, InMemoryGateway::new())
    }
}

impl<G: PersistenceGateway> GameSession<G> {
    /// Starts a session. The first seat moves first.
    pub fn new(config: SessionConfig, gateway: G) -> Self {
        let corners: Vec<Corner> = config.players.corners().to_vec();
        let seats: Vec<Seat> = corners
            .iter()
            .zip(&config.controllers)
            .map(|(&corner, &controller)| Seat { corner, controller })
            .collect();
        let board = config
            .board
            .unwrap_or_else(|| Board::starting(config.players));

        let mut session = GameSession {
            engine: TurnEngine::new(board, corners[0]),
            seats,
            corners,
            victory: config.victory,
            active: 0,
            turn: 1,
            status: GameStatus::InProgress,
            winner: None,
            history: Vec::new(),
            gateway,
            persistence_error: None,
            unsaved: VecDeque::new(),
            next_token: 0,
            pending_ai: None,
            queued: None,
            stalled: None,
        };

        session.persist(UnsavedWrite::Start {
            board: session.engine.board().clone(),
            seats: session.corners.clone(),
        });
        tracing::info!(
            "Started {}-player game ({} victory)",
            session.seats.len(),
            session.victory
        );
        session
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn turn_state(&self) -> &TurnState {
        self.engine.state()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn active_seat(&self) -> &Seat {
        &self.seats[self.active]
    }

    pub fn active_player(&self) -> Corner {
        self.active_seat().corner
    }

    /// Current turn number, starting at 1.
    pub fn turn_number(&self) -> TurnId {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Corner> {
        self.winner
    }

    pub fn victory_rule(&self) -> VictoryRule {
        self.victory
    }

    /// True while an AI request is outstanding.
    pub fn is_thinking(&self) -> bool {
        self.pending_ai.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    /// Why the current computer turn is stuck, if it is.
    pub fn stall_reason(&self) -> Option<&EngineError> {
        self.stalled.as_ref()
    }

    /// True while some write to the gateway has failed and not yet gone through.
    pub fn persistence_degraded(&self) -> bool {
        self.persistence_error.is_some()
    }

    /// The most recent gateway failure, until the backlog is written.
    pub fn persistence_error(&self) -> Option<&EngineError> {
        self.persistence_error.as_ref()
    }

    /// Number of gateway writes still waiting to go through.
    pub fn unsaved_writes(&self) -> usize {
        self.unsaved.len()
    }

    /// Replays every write the gateway rejected, oldest first.
    ///
    /// Stops at the first write that fails again and keeps it and everything
    /// after it for the next attempt. Later turns also retry the backlog
    /// before writing their own records.
    pub fn retry_persistence(&mut self) -> Result<(), EngineError> {
        if self.unsaved.is_empty() {
            return Ok(());
        }
        tracing::info!("Retrying {} unsaved writes", self.unsaved.len());
        self.flush_unsaved()
            .map_err(|e| EngineError::PersistenceFailure(e.to_string()))
    }

    /// Every finished turn, in order.
    pub fn history(&self) -> &[PlayedTurn] {
        &self.history
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    /// Returns the gateway's id for the piece on a cell.
    pub fn piece_id_at(&self, cell: CellKey) -> Option<PieceId> {
        self.gateway.lookup_piece_id(cell)
    }

    /// Returns the first seated corner that has won, in seat order.
    pub fn check_victory(&self) -> Option<Corner> {
        self.victory
            .rules()
            .check_victory(self.engine.board(), &self.corners)
    }

    /// Applies a human intent to the turn in progress.
    pub fn apply_intent(&mut self, intent: Intent) -> IntentOutcome {
        if let Some(reason) = self.block_reason(intent) {
            tracing::debug!("Intent {:?} blocked: {:?}", intent, reason);
            return IntentOutcome::Blocked(reason);
        }

        let result = match intent {
            Intent::SelectCell(cell) => self.engine.select_cell(cell).map(|_| None),
            Intent::ConfirmMove(cell) => self.engine.confirm_move(cell).map(|_| None),
            Intent::UndoLastStep => self.engine.undo_last_step().map(|_| None),
            Intent::UndoToStart => self.engine.undo_to_start().map(|_| None),
            Intent::CommitTurn => self.engine.commit_turn().map(Some),
            Intent::PassTurn => self.engine.pass_turn().map(|_| Some(MoveChain::new())),
        };

        match result {
            Ok(None) => IntentOutcome::Applied,
            Ok(Some(chain)) => IntentOutcome::TurnEnded(self.finish_turn(chain)),
            Err(illegal) => {
                tracing::debug!("Ignored {:?}: {}", intent, illegal);
                IntentOutcome::Ignored(illegal)
            }
        }
    }

    fn block_reason(&self, intent: Intent) -> Option<BlockReason> {
        match self.status {
            GameStatus::Finished => return Some(BlockReason::Finished),
            GameStatus::Paused => return Some(BlockReason::Paused),
            GameStatus::InProgress => {}
        }
        if self.pending_ai.is_some() {
            return Some(BlockReason::AwaitingAi);
        }
        if self.active_seat().controller == Controller::Computer {
            let forced_pass = self.stalled.is_some() && intent == Intent::PassTurn;
            if !forced_pass {
                return Some(BlockReason::ComputerSeat);
            }
        }
        None
    }

    fn finish_turn(&mut self, chain: MoveChain) -> TurnSummary {
        let player = self.active_player();
        let turn = self.turn;

        if chain.is_empty() {
            tracing::info!("Turn {}: {} passes", turn, player);
        } else {
            tracing::info!("Turn {}: {} plays {}", turn, player, chain);
            self.persist(UnsavedWrite::Moves {
                chain: chain.clone(),
                player,
                turn,
            });
        }
        self.history.push(PlayedTurn {
            turn,
            player,
            chain: chain.clone(),
        });

        let winner = if chain.is_empty() {
            None
        } else {
            self.check_victory()
        };
        if let Some(winner) = winner {
            self.status = GameStatus::Finished;
            self.winner = Some(winner);
            self.clear_ai();
            self.stalled = None;
            tracing::info!("{} wins on turn {}", winner, turn);
            return TurnSummary {
                turn,
                player,
                chain,
                winner: Some(winner),
                next_player: None,
            };
        }

        let next = self.advance_player();
        TurnSummary {
            turn,
            player,
            chain,
            winner: None,
            next_player: Some(next),
        }
    }

    /// Hands the turn to the next seat and returns its corner.
    ///
    /// Uncommitted moves of the current turn are rolled back and any AI
    /// request is invalidated.
    pub fn advance_player(&mut self) -> Corner {
        if self.engine.undo_to_start().is_ok() {
            tracing::debug!("Discarded uncommitted moves of turn {}", self.turn);
        }
        let prev = TurnRecord {
            turn: self.turn,
            player: self.active_player(),
        };
        self.active = (self.active + 1) % self.seats.len();
        self.turn += 1;
        let next = TurnRecord {
            turn: self.turn,
            player: self.active_player(),
        };

        self.engine.begin_turn(next.player);
        self.clear_ai();
        self.stalled = None;
        self.persist(UnsavedWrite::Turn { prev, next });
        next.player
    }

    /// Queues a write behind any earlier unsaved ones and tries to flush them.
    fn persist(&mut self, write: UnsavedWrite) {
        self.unsaved.push_back(write);
        // A failure is kept in `persistence_error`.
        let _ = self.flush_unsaved();
    }

    fn flush_unsaved(&mut self) -> Result<(), PersistenceError> {
        while let Some(write) = self.unsaved.front() {
            let written = match write {
                UnsavedWrite::Start { board, seats } => self.gateway.start_match(board, seats),
                UnsavedWrite::Moves {
                    chain,
                    player,
                    turn,
                } => self.gateway.record_moves(chain, *player, *turn),
                UnsavedWrite::Turn { prev, next } => {
                    self.gateway.advance_turn(*prev, *next).map(|_| ())
                }
            };
            if let Err(e) = written {
                self.degrade(e.clone());
                return Err(e);
            }
            self.unsaved.pop_front();
        }
        if self.persistence_error.take().is_some() {
            tracing::info!("Persistence recovered on turn {}", self.turn);
        }
        Ok(())
    }

    fn degrade(&mut self, error: PersistenceError) {
        if self.persistence_error.is_none() {
            tracing::warn!("Persistence degraded: {}", error);
        } else {
            tracing::debug!("Persistence failure: {}", error);
        }
        self.persistence_error = Some(EngineError::PersistenceFailure(error.to_string()));
    }

    fn clear_ai(&mut self) {
        self.pending_ai = None;
        self.queued = None;
    }

    /// Asks for a computer move for the player to move.
    ///
    /// Returns `None` unless the game is in progress, the seat to move is
    /// computer-controlled and its turn is not stalled. Any request still
    /// outstanding is superseded.
    pub fn request_ai_move(&mut self) -> Option<AiRequest> {
        if self.status != GameStatus::InProgress
            || self.active_seat().controller != Controller::Computer
            || self.stalled.is_some()
        {
            return None;
        }
        Some(self.issue_request(false))
    }

    fn issue_request(&mut self, retried: bool) -> AiRequest {
        self.next_token += 1;
        let token = AiToken(self.next_token);
        self.pending_ai = Some(PendingAi { token, retried });
        self.queued = None;
        tracing::debug!("AI request {:?} for {} on turn {}", token, self.active_player(), self.turn);
        AiRequest {
            token,
            board: self.engine.board().clone(),
            player: self.active_player(),
        }
    }

    /// Drops the outstanding AI request. A later answer to it is stale.
    pub fn cancel_ai_request(&mut self) {
        if let Some(pending) = self.pending_ai {
            tracing::debug!("Cancelled AI request {:?}", pending.token);
        }
        self.clear_ai();
    }

    /// Delivers an agent's answer to a request.
    pub fn deliver_ai_suggestion(
        &mut self,
        token: AiToken,
        result: Result<Suggestion, AgentError>,
    ) -> AiOutcome {
        match self.pending_ai {
            Some(pending) if pending.token == token => {}
            _ => {
                tracing::debug!("Discarded stale AI answer {:?}", token);
                return AiOutcome::Stale;
            }
        }
        if self.status == GameStatus::Paused {
            self.queued = Some((token, result));
            return AiOutcome::Queued;
        }
        self.resolve_ai(result)
    }

    fn resolve_ai(&mut self, result: Result<Suggestion, AgentError>) -> AiOutcome {
        let Some(pending) = self.pending_ai.take() else {
            return AiOutcome::Stale;
        };
        let player = self.active_player();

        let suggestion = match result {
            Ok(suggestion) => suggestion,
            Err(AgentError::NoLegalMoves(_)) => {
                tracing::info!("{} has no legal moves", player);
                return AiOutcome::Applied(self.finish_turn(MoveChain::new()));
            }
            Err(e) => {
                let error = EngineError::AiUnavailable(e.to_string());
                tracing::warn!("Turn {} stalled: {}", self.turn, error);
                self.stalled = Some(error.clone());
                return AiOutcome::Stalled(error);
            }
        };

        match self.play_suggestion(&suggestion) {
            Ok(chain) => AiOutcome::Applied(self.finish_turn(chain)),
            Err(reason) if pending.retried => {
                let error = EngineError::InvalidAiMove(reason);
                tracing::warn!("Turn {} stalled: {}", self.turn, error);
                self.stalled = Some(error.clone());
                AiOutcome::Stalled(error)
            }
            Err(reason) => {
                tracing::warn!("Rejected AI move for {}: {}; retrying", player, reason);
                AiOutcome::Retry(self.issue_request(true))
            }
        }
    }

    /// Plays a suggestion through the turn engine, leaving the engine
    /// untouched if any step is illegal.
    fn play_suggestion(&mut self, suggestion: &Suggestion) -> Result<MoveChain, String> {
        let result = self.try_moves(suggestion.moves());
        if result.is_err() {
            self.engine.undo_to_start().ok();
            self.engine.deselect();
        }
        result.map_err(|e| format!("{}: {}", suggestion, e))
    }

    fn try_moves(&mut self, moves: &[Move]) -> Result<MoveChain, String> {
        let first = moves.first().ok_or_else(|| "empty suggestion".to_string())?;
        self.engine
            .select_cell(first.from)
            .map_err(|e| e.to_string())?;
        for m in moves {
            if self.engine.state().active_cell() != Some(m.from) {
                return Err(format!("{} does not start where the piece stands", m));
            }
            self.engine.confirm_move(m.to).map_err(|e| e.to_string())?;
        }
        self.engine.commit_turn().map_err(|e| e.to_string())
    }

    /// Runs one computer turn synchronously with `agent`, retrying once on
    /// an invalid suggestion.
    ///
    /// Returns `None` if no AI move is due.
    pub fn play_ai_turn<A: Agent + ?Sized>(&mut self, agent: &mut A) -> Option<AiOutcome> {
        let mut request = self.request_ai_move()?;
        loop {
            let result = agent.suggest_move(&request.board, request.player);
            match self.deliver_ai_suggestion(request.token, result) {
                AiOutcome::Retry(next) => request = next,
                outcome => return Some(outcome),
            }
        }
    }

    /// Suspends intent processing. Returns false if the game was not in progress.
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::InProgress {
            return false;
        }
        self.status = GameStatus::Paused;
        tracing::info!("Paused on turn {}", self.turn);
        true
    }

    /// Resumes a paused game, applying an AI answer held during the pause.
    pub fn resume(&mut self) -> Option<AiOutcome> {
        if self.status != GameStatus::Paused {
            return None;
        }
        self.status = GameStatus::InProgress;
        tracing::info!("Resumed on turn {}", self.turn);
        let (token, result) = self.queued.take()?;
        match self.pending_ai {
            Some(pending) if pending.token == token => Some(self.resolve_ai(result)),
            _ => None,
        }
    }

    /// Ends the game immediately without a winner.
    pub fn end_game(&mut self) {
        if self.status == GameStatus::Finished {
            return;
        }
        self.engine.undo_to_start().ok();
        self.status = GameStatus::Finished;
        self.clear_ai();
        self.stalled = None;
        tracing::info!("Game ended on turn {} without a winner", self.turn);
    }

    /// Consumes the session, returning its gateway.
    pub fn into_gateway(self) -> G {
        self.gateway
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(col: u8, row: u8) -> CellKey {
        CellKey::new(col, row).unwrap()
    }

    #[test]
    fn config_rejects_bad_player_count() {
        assert_eq!(
            SessionConfig::new(5).unwrap_err(),
            EngineError::InvalidPlayerCount(5)
        );
    }

    #[test]
    fn seats_follow_active_corners() {
        let config = SessionConfig::new(3)
            .unwrap()
            .with_controller(2, Controller::Computer)
            .with_controller(9, Controller::Computer);
        let session = GameSession::in_memory(config);
        let corners: Vec<_> = session.seats().iter().map(|s| s.corner).collect();
        assert_eq!(corners, vec![Corner::North, Corner::SouthWest, Corner::SouthEast]);
        assert_eq!(session.seats()[2].controller, Controller::Computer);
        assert_eq!(session.seats()[0].controller, Controller::Human);
        assert_eq!(session.active_player(), Corner::North);
        assert_eq!(session.turn_number(), 1);
    }

    #[test]
    fn commit_advances_player_and_records() {
        let mut session = GameSession::in_memory(SessionConfig::new(2).unwrap());
        assert_eq!(session.apply_intent(Intent::SelectCell(cell(0, 3))), IntentOutcome::Applied);
        assert_eq!(session.apply_intent(Intent::ConfirmMove(cell(4, 4))), IntentOutcome::Applied);
        let IntentOutcome::TurnEnded(summary) = session.apply_intent(Intent::CommitTurn) else {
            panic!("turn did not end");
        };
        assert_eq!(summary.player, Corner::North);
        assert_eq!(summary.next_player, Some(Corner::South));
        assert_eq!(session.active_player(), Corner::South);
        assert_eq!(session.turn_number(), 2);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.gateway().moves().len(), 1);
        assert_eq!(session.gateway().turns().len(), 2);
    }

    #[test]
    fn illegal_intent_is_advisory() {
        let mut session = GameSession::in_memory(SessionConfig::new(2).unwrap());
        let before = session.board().clone();
        assert_eq!(
            session.apply_intent(Intent::SelectCell(cell(0, 16))),
            IntentOutcome::Ignored(IllegalMove::NotYourPiece(cell(0, 16)))
        );
        assert_eq!(session.board(), &before);
        assert_eq!(session.active_player(), Corner::North);
    }

    #[test]
    fn computer_seat_blocks_humans() {
        let config = SessionConfig::new(2).unwrap().with_controller(0, Controller::Computer);
        let mut session = GameSession::in_memory(config);
        assert_eq!(
            session.apply_intent(Intent::SelectCell(cell(0, 3))),
            IntentOutcome::Blocked(BlockReason::ComputerSeat)
        );
    }

    #[test]
    fn end_game_blocks_everything() {
        let mut session = GameSession::in_memory(SessionConfig::new(2).unwrap());
        session.end_game();
        assert_eq!(session.status(), GameStatus::Finished);
        assert_eq!(session.winner(), None);
        assert_eq!(
            session.apply_intent(Intent::PassTurn),
            IntentOutcome::Blocked(BlockReason::Finished)
        );
        assert!(!session.pause());
    }
}
