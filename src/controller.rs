// Turn controller: the agent's poll loop.
//
// One tick = fetch snapshot, decide whether it is our turn, optionally pick
// and submit a move. Ticks never overlap and every fault is absorbed at the
// tick boundary, so the loop only ends when the shutdown flag is cleared.

use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::bot::Bot;
use crate::debug_logger::DebugLogger;
use crate::error::AgentResult;
use crate::service::GameService;
use crate::snapshot::parse_snapshot;
use crate::types::{Action, GameOutcome};

/// What a single tick ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Fetch, parse or search failed; nothing was done
    Faulted,
    /// The game has a result; no further moves are issued
    GameOver(GameOutcome),
    /// Someone else is to move (or nobody has joined yet)
    Waiting { current: Option<String> },
    /// Our turn, but this turn was already answered and the service has not caught up
    AlreadyActed { turn: u64 },
    /// Our turn, but the selector found nothing to play
    NoValidMoves,
    /// Move accepted by the service
    Submitted(Action),
    /// Move rejected or lost in transit; retried on a later tick
    SubmissionFailed(Action),
}

/// Cloneable stop flag checked between ticks
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    running: Arc<AtomicBool>,
}

impl ShutdownHandle {
    fn new() -> Self {
        ShutdownHandle {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Asks the loop to stop after the in-flight tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Drives the bot against a live game service
pub struct TurnController<S: GameService> {
    service: S,
    bot: Bot,
    logger: DebugLogger,
    shutdown: ShutdownHandle,
    /// Turn index of the last accepted submission
    last_submitted_turn: Option<u64>,
}

impl<S: GameService> TurnController<S> {
    pub fn new(service: S, bot: Bot, logger: DebugLogger) -> Self {
        TurnController {
            service,
            bot,
            logger,
            shutdown: ShutdownHandle::new(),
            last_submitted_turn: None,
        }
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Runs ticks until stopped; the first tick starts immediately
    pub async fn run(&mut self) {
        let interval = self.bot.config().timing.poll_interval();
        info!(
            "Polling every {}ms as player '{}'",
            interval.as_millis(),
            self.bot.player_id()
        );

        while self.shutdown.is_running() {
            self.tick().await;
            tokio::time::sleep(interval).await;
        }

        info!("Agent stopped");
    }

    /// Executes one tick, absorbing any fault
    pub async fn tick(&mut self) -> TickOutcome {
        match self.try_tick().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Tick failed: {}", e);
                TickOutcome::Faulted
            }
        }
    }

    async fn try_tick(&mut self) -> AgentResult<TickOutcome> {
        let raw = self.service.fetch_state().await?;
        let snapshot = parse_snapshot(&raw)?;
        debug!(
            "Turn {}: {} players, {} units",
            snapshot.turn_index,
            snapshot.players.len(),
            snapshot.board.units.len()
        );

        if let Some(result) = &snapshot.result {
            info!("Game ended: {}", result);
            return Ok(TickOutcome::GameOver(result.clone()));
        }

        let agent = self.bot.player_id();
        let current = snapshot.current_player();
        if current != Some(agent) {
            debug!("Turn {}: waiting for {:?}", snapshot.turn_index, current);
            return Ok(TickOutcome::Waiting {
                current: current.map(str::to_string),
            });
        }

        if self.last_submitted_turn == Some(snapshot.turn_index) {
            debug!(
                "Turn {}: move already submitted, waiting for the service to advance",
                snapshot.turn_index
            );
            return Ok(TickOutcome::AlreadyActed {
                turn: snapshot.turn_index,
            });
        }

        let decision = match self.bot.decide(&snapshot).await? {
            Some(decision) => decision,
            None => {
                info!("Turn {}: no valid moves available", snapshot.turn_index);
                return Ok(TickOutcome::NoValidMoves);
            }
        };

        let action = decision.action;
        info!("Turn {}: executing {}", snapshot.turn_index, action);

        match self.service.submit_move(&action.to_input()).await {
            Ok(ack) => {
                info!("Move submitted successfully: {}", ack);
                self.last_submitted_turn = Some(snapshot.turn_index);
                self.logger
                    .log_decision(self.bot.player_id(), &snapshot, action, decision.score);
                Ok(TickOutcome::Submitted(action))
            }
            Err(e) => {
                warn!("Move submission failed: {}", e);
                Ok(TickOutcome::SubmissionFailed(action))
            }
        }
    }
}
