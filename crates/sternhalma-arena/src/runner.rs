//! Match runner - plays a session to the end with computer players.
//!
//! Every seat is driven by its own [`Agent`]. Agents think on tokio's
//! blocking pool and their answers go back to the session with the request
//! token, so a turn that moved on in the meantime simply discards them.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use sternhalma_core::Corner;
use sternhalma_engine::{
    Agent, AgentError, AiOutcome, AiRequest, GameSession, GameStatus, Intent, IntentOutcome,
    PersistenceGateway, PlayedTurn, Suggestion,
};
use thiserror::Error;

/// Errors that stop a match before it ends.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The number of agents does not match the number of seats.
    #[error("expected {expected} agents, got {got}")]
    AgentCount { expected: usize, got: usize },
    /// The seat to move is not computer-controlled.
    #[error("{0} is not a computer seat")]
    HumanSeat(Corner),
    /// An agent task panicked or was cancelled.
    #[error("agent task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchEnd {
    /// A player brought every piece home.
    Won(Corner),
    /// The turn limit was reached.
    TurnLimit,
    /// The run was interrupted.
    Aborted,
}

/// A seat and the agent that played it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatReport {
    pub corner: Corner,
    pub agent: String,
}

/// Everything worth keeping about a finished match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub seats: Vec<SeatReport>,
    pub end: MatchEnd,
    /// Turns played, passes included.
    pub turns: u32,
    /// Turns that stalled and were passed on the agent's behalf.
    pub stalls: u32,
    /// Board notation after the last turn.
    pub final_board: String,
    pub history: Vec<PlayedTurn>,
    /// Set if some gateway writes were still unsaved when the match ended.
    pub persistence_degraded: bool,
}

impl MatchReport {
    pub fn winner(&self) -> Option<Corner> {
        match self.end {
            MatchEnd::Won(corner) => Some(corner),
            _ => None,
        }
    }

    /// Name of the agent that won, if any.
    pub fn winner_name(&self) -> Option<&str> {
        let winner = self.winner()?;
        self.seats
            .iter()
            .find(|seat| seat.corner == winner)
            .map(|seat| seat.agent.as_str())
    }
}

/// Drives sessions whose seats are all computer-controlled.
pub struct MatchRunner {
    max_turns: u32,
    shutdown: Arc<AtomicBool>,
}

impl MatchRunner {
    /// Creates a runner that abandons games after `max_turns` turns.
    pub fn new(max_turns: u32) -> Self {
        Self {
            max_turns,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Aborts the running match at the next turn boundary once `flag` is set.
    pub fn with_shutdown(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown = flag;
        self
    }

    /// Plays `session` to the end. `agents` lists one agent per seat, in
    /// seating order.
    ///
    /// A stalled turn is passed so the game keeps going.
    ///
    /// # Errors
    ///
    /// Returns an error if the agents do not fit the seats, a seat is not
    /// computer-controlled, or an agent task panics.
    pub async fn run<G: PersistenceGateway>(
        &self,
        session: &mut GameSession<G>,
        agents: Vec<Box<dyn Agent + Send>>,
    ) -> Result<MatchReport, RunnerError> {
        if agents.len() != session.seats().len() {
            return Err(RunnerError::AgentCount {
                expected: session.seats().len(),
                got: agents.len(),
            });
        }
        let seats: Vec<SeatReport> = session
            .seats()
            .iter()
            .zip(&agents)
            .map(|(seat, agent)| SeatReport {
                corner: seat.corner,
                agent: agent.name().to_string(),
            })
            .collect();
        let mut agents: Vec<Option<Box<dyn Agent + Send>>> = agents.into_iter().map(Some).collect();
        let mut stalls = 0;
        let mut aborted = false;

        while session.status() == GameStatus::InProgress {
            if self.shutdown.load(Ordering::SeqCst) {
                tracing::info!("Shutdown requested, abandoning match");
                session.end_game();
                aborted = true;
                break;
            }
            if session.history().len() as u32 >= self.max_turns {
                tracing::info!("Turn limit of {} reached", self.max_turns);
                session.end_game();
                break;
            }

            let Some(mut request) = session.request_ai_move() else {
                if session.stall_reason().is_some() {
                    session.apply_intent(Intent::PassTurn);
                    continue;
                }
                return Err(RunnerError::HumanSeat(session.active_player()));
            };

            let seat = seat_index(session, request.player);
            loop {
                let result = think(&mut agents[seat], request.clone()).await?;
                match session.deliver_ai_suggestion(request.token, result) {
                    AiOutcome::Retry(next) => request = next,
                    AiOutcome::Stalled(reason) => {
                        tracing::warn!("{} stalled: {}; passing", request.player, reason);
                        stalls += 1;
                        if let IntentOutcome::Ignored(e) = session.apply_intent(Intent::PassTurn) {
                            tracing::error!("Could not pass stalled turn: {}", e);
                        }
                        break;
                    }
                    AiOutcome::Applied(_) | AiOutcome::Queued | AiOutcome::Stale => break,
                }
            }
        }

        if let Err(e) = session.retry_persistence() {
            tracing::warn!("{} writes left unsaved: {}", session.unsaved_writes(), e);
        }

        let end = match session.winner() {
            Some(winner) => MatchEnd::Won(winner),
            None if aborted => MatchEnd::Aborted,
            None => MatchEnd::TurnLimit,
        };
        Ok(MatchReport {
            seats,
            end,
            turns: session.history().len() as u32,
            stalls,
            final_board: session.board().to_notation(),
            history: session.history().to_vec(),
            persistence_degraded: session.persistence_degraded(),
        })
    }
}

fn seat_index<G: PersistenceGateway>(session: &GameSession<G>, player: Corner) -> usize {
    session
        .seats()
        .iter()
        .position(|seat| seat.corner == player)
        .unwrap_or(0)
}

/// Runs one agent on the blocking pool and hands it back with its answer.
async fn think(
    slot: &mut Option<Box<dyn Agent + Send>>,
    request: AiRequest,
) -> Result<Result<Suggestion, AgentError>, RunnerError> {
    let Some(mut agent) = slot.take() else {
        return Ok(Err(AgentError::Unavailable(
            "agent lost by an earlier failure".to_string(),
        )));
    };
    let (agent, result) = tokio::task::spawn_blocking(move || {
        let result = agent.suggest_move(&request.board, request.player);
        (agent, result)
    })
    .await?;
    *slot = Some(agent);
    Ok(result)
}
