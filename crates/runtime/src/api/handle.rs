//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for the
//! four player intents, manual clock ticks and event streaming.
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use game_core::{
    Action, AttackKind, BattleResult, BattleState, ExecutionOutcome, SlotIndex, TeamId,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    result_rx: watch::Receiver<Option<BattleResult>>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        result_rx: watch::Receiver<Option<BattleResult>>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            result_rx,
        }
    }

    /// Choose the acting team's attacker.
    pub async fn select_attacker(&self, team: TeamId, slot: SlotIndex) -> Result<ExecutionOutcome> {
        self.execute(Action::select_attacker(team, slot)).await
    }

    /// Choose one of the selected attacker's attacks.
    pub async fn select_attack(&self, team: TeamId, kind: AttackKind) -> Result<ExecutionOutcome> {
        self.execute(Action::select_attack(team, kind)).await
    }

    /// Back out of the attack choice.
    pub async fn cancel_attack(&self, team: TeamId) -> Result<ExecutionOutcome> {
        self.execute(Action::cancel_attack(team)).await
    }

    /// Resolve the selected attack against an opposing slot.
    pub async fn select_target(&self, team: TeamId, slot: SlotIndex) -> Result<ExecutionOutcome> {
        self.execute(Action::select_target(team, slot)).await
    }

    /// Advance the countdown by one tick.
    ///
    /// Only needed when the runtime was built without its own clock.
    pub async fn tick(&self) -> Result<ExecutionOutcome> {
        self.execute(Action::tick()).await
    }

    /// Execute an arbitrary action through the owner task.
    pub async fn execute(&self, action: Action) -> Result<ExecutionOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Execute {
                action,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the current battle state (read-only snapshot)
    pub async fn query_state(&self) -> Result<BattleState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Waits until the battle has a winner.
    pub async fn wait_for_result(&self) -> Result<BattleResult> {
        let mut result_rx = self.result_rx.clone();
        let result = result_rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| RuntimeError::ResultChannelClosed)?;

        (*result).ok_or(RuntimeError::ResultChannelClosed)
    }

    /// The winner, if the battle is already over.
    pub fn result(&self) -> Option<BattleResult> {
        *self.result_rx.borrow()
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Battle` - Executed and rejected actions
    /// - `Topic::Turn` - Countdown, scheduled flips and turn changes
    /// - `Topic::Match` - Battle finished
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut turn_rx = handle.subscribe(Topic::Turn);
    /// while let Ok(event) = turn_rx.recv().await {
    ///     // Render the banner for the new turn
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
