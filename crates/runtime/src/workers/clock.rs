//! Clock worker that feeds countdown ticks into the command queue.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use game_core::{Action, BattleResult};

use super::Command;

/// Background task sending one `Tick` per period.
///
/// Holds only a weak sender so it never keeps the simulation worker alive.
/// Stops when the battle finishes or the command queue closes.
pub struct ClockWorker {
    period: Duration,
    command_tx: mpsc::WeakSender<Command>,
    result_rx: watch::Receiver<Option<BattleResult>>,
}

impl ClockWorker {
    pub fn new(
        period: Duration,
        command_tx: mpsc::WeakSender<Command>,
        result_rx: watch::Receiver<Option<BattleResult>>,
    ) -> Self {
        Self {
            period,
            command_tx,
            result_rx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut interval = time::interval_at(time::Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if !self.send_tick().await {
                        debug!(target: "runtime::clock", "command queue closed, clock stopped");
                        break;
                    }
                }
                changed = self.result_rx.changed() => {
                    if changed.is_err() || self.result_rx.borrow().is_some() {
                        debug!(target: "runtime::clock", "battle finished, clock stopped");
                        break;
                    }
                }
            }
        }
    }

    async fn send_tick(&self) -> bool {
        let Some(command_tx) = self.command_tx.upgrade() else {
            return false;
        };

        command_tx
            .send(Command::Execute {
                action: Action::tick(),
                reply: None,
            })
            .await
            .is_ok()
    }
}
