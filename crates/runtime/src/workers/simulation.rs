//! Simulation worker that owns the authoritative [`game_core::BattleState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], the clock worker and its
//! own deferred flip timers, executes them via [`game_core::BattleEngine`]
//! one at a time, and publishes events to the EventBus.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use game_core::{
    Action, ActionResult, BattleConfig, BattleEngine, BattleResult, BattleState, ExecuteError,
    ExecutionOutcome, GameError, ScheduledFlip, TickResult,
};

use crate::api::{Result, RuntimeError};
use crate::events::{BattleEvent, Event, EventBus, MatchEvent, TurnEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Execute an action. Internal senders (clock, deferred flips) pass no
    /// reply channel.
    Execute {
        action: Action,
        reply: Option<oneshot::Sender<Result<ExecutionOutcome>>>,
    },
    /// Query the current battle state (read-only).
    QueryState { reply: oneshot::Sender<BattleState> },
}

/// Background task that processes battle commands.
///
/// The worker is the only holder of the battle state, so commands from the
/// handle, the clock and deferred flips are applied strictly in queue order.
pub struct SimulationWorker {
    state: BattleState,
    config: BattleConfig,
    command_rx: mpsc::Receiver<Command>,
    command_tx: mpsc::WeakSender<Command>,
    event_bus: EventBus,
    result_tx: watch::Sender<Option<BattleResult>>,
    pending_flip: Option<JoinHandle<()>>,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        state: BattleState,
        config: BattleConfig,
        command_rx: mpsc::Receiver<Command>,
        command_tx: mpsc::WeakSender<Command>,
        event_bus: EventBus,
        result_tx: watch::Sender<Option<BattleResult>>,
    ) -> Self {
        info!(
            target: "runtime::worker",
            current = %state.turn.current,
            turn_duration = config.turn_duration,
            "SimulationWorker initialized"
        );

        Self {
            state,
            config,
            command_rx,
            command_tx,
            event_bus,
            result_tx,
            pending_flip: None,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        self.cancel_pending_flip();
        debug!(target: "runtime::worker", "command queue closed, worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Execute { action, reply } => {
                let result = self.execute(action);
                if let Some(reply) = reply
                    && reply.send(result).is_err()
                {
                    debug!(target: "runtime::worker", "Execute reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!(target: "runtime::worker", "QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn execute(&mut self, action: Action) -> Result<ExecutionOutcome> {
        let executed = BattleEngine::new(&mut self.state).execute(&self.config, &action);

        match executed {
            Ok(outcome) => {
                self.handle_outcome(&action, &outcome);
                Ok(outcome)
            }
            Err(error) => {
                self.handle_execute_error(&action, &error);
                Err(RuntimeError::Action(error))
            }
        }
    }

    fn handle_outcome(&mut self, action: &Action, outcome: &ExecutionOutcome) {
        debug!(
            target: "runtime::worker",
            action = action.as_snake_case(),
            nonce = outcome.nonce,
            "Action executed"
        );

        self.event_bus
            .publish(Event::Battle(BattleEvent::ActionExecuted {
                action: action.clone(),
                nonce: outcome.nonce,
                result: outcome.result.clone(),
                state: Box::new(self.state.clone()),
            }));

        match &outcome.result {
            ActionResult::TargetResolved(resolution) => {
                if let Some(flip) = resolution.scheduled {
                    self.schedule_flip(flip);
                }
                if let Some(result) = resolution.result {
                    self.finish(result);
                }
            }
            ActionResult::Tick(TickResult::Counting { time_left }) => {
                self.event_bus.publish(Event::Turn(TurnEvent::Countdown {
                    team: self.state.turn.current,
                    time_left: *time_left,
                }));
            }
            ActionResult::Tick(TickResult::Expired(change))
            | ActionResult::TurnCompleted(change) => {
                self.pending_flip = None;
                info!(
                    target: "runtime::worker",
                    team = %change.current,
                    turn = change.number,
                    reason = %change.reason,
                    "Turn started"
                );
                self.event_bus
                    .publish(Event::Turn(TurnEvent::Changed(*change)));
            }
            ActionResult::Tick(TickResult::Paused)
            | ActionResult::AttackerSelected { .. }
            | ActionResult::AttackSelected(_)
            | ActionResult::AttackCancelled => {}
        }
    }

    /// Spawns the deferred flip, replacing any earlier one.
    fn schedule_flip(&mut self, flip: ScheduledFlip) {
        self.cancel_pending_flip();

        let command_tx = self.command_tx.clone();
        self.pending_flip = Some(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(flip.delay_ms)).await;

            let Some(command_tx) = command_tx.upgrade() else {
                return;
            };
            let command = Command::Execute {
                action: Action::complete_turn(flip.token),
                reply: None,
            };
            if command_tx.send(command).await.is_err() {
                debug!(target: "runtime::worker", token = ?flip.token, "deferred flip dropped");
            }
        }));

        self.event_bus
            .publish(Event::Turn(TurnEvent::FlipScheduled(flip)));
    }

    fn cancel_pending_flip(&mut self) {
        if let Some(task) = self.pending_flip.take() {
            task.abort();
        }
    }

    fn finish(&mut self, result: BattleResult) {
        self.cancel_pending_flip();
        self.result_tx.send_replace(Some(result));

        info!(
            target: "runtime::worker",
            winner = %result.winner,
            turns = result.turns,
            "Battle finished"
        );

        self.event_bus.publish(Event::Match(MatchEvent::Finished {
            result,
            scores: self.state.scores.clone(),
        }));
    }

    fn handle_execute_error(&self, action: &Action, error: &ExecuteError) {
        let phase = error.phase();
        let phase_label = phase.map_or("actor", |phase| phase.as_str());

        if error.severity().is_internal() {
            error!(
                target: "runtime::worker",
                action = ?action,
                phase = phase_label,
                error = %error.error(),
                "Action execution failed"
            );
        } else {
            debug!(
                target: "runtime::worker",
                action = action.as_snake_case(),
                phase = phase_label,
                code = error.error_code(),
                "Action rejected"
            );
        }

        self.event_bus
            .publish(Event::Battle(BattleEvent::ActionRejected {
                action: action.clone(),
                phase,
                kind: error.kind(),
                code: error.error_code().to_owned(),
                error: error.error().to_string(),
            }));
    }
}
