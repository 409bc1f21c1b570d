//! Scripted frontend that plays both teams.
//!
//! Each turn it picks an attacker, its strongest attack and a target chosen by
//! a [`TargetingStrategy`], issuing one intent at a time through the handle.
//! Turn banners, hits and the countdown are rendered to the log.

mod strategy;

pub use strategy::{FirstAliveStrategy, LowestHealthStrategy, TargetingStrategy};

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use game_core::{ActionResult, BattleState, PerTeam, SlotIndex, TeamId};
use runtime::{Event, MatchEvent, RuntimeError, RuntimeHandle, Topic, TurnEvent};

use crate::Frontend;
use crate::render::{format_clock, team_summary, turn_banner};

/// Countdown values below this are logged every tick.
const COUNTDOWN_WARNING: u32 = 10;

pub struct AutoplayFrontend {
    strategy: Box<dyn TargetingStrategy>,
    think_time: Duration,
}

impl AutoplayFrontend {
    pub fn new(strategy: Box<dyn TargetingStrategy>, think_time: Duration) -> Self {
        Self {
            strategy,
            think_time,
        }
    }

    async fn think(&self) {
        if !self.think_time.is_zero() {
            tokio::time::sleep(self.think_time).await;
        }
    }

    /// Plays the current turn, treating rejected intents as a lost turn.
    async fn play_turn(&self, handle: &RuntimeHandle) -> Result<()> {
        match self.take_turn(handle).await {
            Ok(()) => Ok(()),
            Err(RuntimeError::Action(error)) => {
                warn!(target: "client::autoplay", "Intent rejected: {}", error);
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn take_turn(&self, handle: &RuntimeHandle) -> runtime::Result<()> {
        let state = handle.query_state().await?;
        if state.is_over() {
            return Ok(());
        }

        let team = state.turn.current;
        let Some(attacker) = pick_attacker(&state) else {
            return Ok(());
        };

        self.think().await;
        let selected = handle.select_attacker(team, attacker).await?;
        let ActionResult::AttackerSelected { options, .. } = selected.result else {
            return Ok(());
        };
        let Some(attack) = options.iter().max_by_key(|attack| attack.damage) else {
            return Ok(());
        };

        self.think().await;
        handle.select_attack(team, attack.kind).await?;

        let Some(target) = self.strategy.select_target(&state) else {
            return Ok(());
        };

        self.think().await;
        let resolved = handle.select_target(team, target).await?;
        if let ActionResult::TargetResolved(resolution) = resolved.result {
            let attacker_name = state
                .teams[team]
                .member(resolution.attacker)
                .map_or("?", |member| member.name());
            let target_name = state
                .teams[resolution.hit.target]
                .member(resolution.hit.slot)
                .map_or("?", |member| member.name());

            info!(
                target: "client::autoplay",
                "{} uses {} on {}: {} -> {}{}",
                attacker_name,
                resolution.attack.name,
                target_name,
                resolution.hit.previous_health,
                resolution.hit.health,
                if resolution.hit.defeated { " (defeated)" } else { "" }
            );
        }

        Ok(())
    }

    fn render_state(&self, state: &BattleState) {
        for team in [TeamId::One, TeamId::Two] {
            info!(
                target: "client::autoplay",
                "{} [{} pts] {}",
                team,
                state.scores[team],
                team_summary(&state.teams[team])
            );
        }
    }

    fn render_finish(&self, winner: TeamId, turns: u32, scores: &PerTeam<u32>) {
        info!(
            target: "client::autoplay",
            "*** {} wins after {} turns ({} - {}) ***",
            winner,
            turns,
            scores[TeamId::One],
            scores[TeamId::Two]
        );
    }
}

#[async_trait]
impl Frontend for AutoplayFrontend {
    async fn run(&mut self, handle: RuntimeHandle) -> Result<()> {
        let mut topics = handle.subscribe_multiple(&[Topic::Turn, Topic::Match]);
        let mut turn_rx = topics
            .remove(&Topic::Turn)
            .context("turn topic subscription missing")?;
        let mut match_rx = topics
            .remove(&Topic::Match)
            .context("match topic subscription missing")?;

        info!(
            target: "client::autoplay",
            strategy = self.strategy.name(),
            "Autoplay started"
        );

        let state = handle.query_state().await?;
        if let Some(result) = state.result {
            self.render_finish(result.winner, result.turns, &state.scores);
            return Ok(());
        }
        info!(target: "client::autoplay", "=== Turn 1: {}'s turn ===", state.turn.current);
        self.render_state(&state);
        self.play_turn(&handle).await?;

        loop {
            tokio::select! {
                event = match_rx.recv() => match event {
                    Ok(Event::Match(MatchEvent::Finished { result, scores })) => {
                        self.render_state(&handle.query_state().await?);
                        self.render_finish(result.winner, result.turns, &scores);
                        return Ok(());
                    }
                    Ok(_) => {}
                    Err(error) => return closed(error, "match"),
                },
                event = turn_rx.recv() => match event {
                    Ok(Event::Turn(TurnEvent::Changed(change))) => {
                        info!(target: "client::autoplay", "{} ({})", turn_banner(&change), change.reason);
                        self.render_state(&handle.query_state().await?);
                        self.play_turn(&handle).await?;
                    }
                    Ok(Event::Turn(TurnEvent::Countdown { team, time_left })) => {
                        if time_left < COUNTDOWN_WARNING || time_left % 30 == 0 {
                            info!(target: "client::autoplay", "{} {}", team, format_clock(time_left));
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(target: "client::autoplay", skipped, "turn events lagged");
                    }
                    Err(error) => return closed(error, "turn"),
                },
            }
        }
    }
}

/// Rotates through the acting team's living members by turn number.
fn pick_attacker(state: &BattleState) -> Option<SlotIndex> {
    let alive: Vec<SlotIndex> = state.acting_team().alive_slots().collect();
    if alive.is_empty() {
        return None;
    }
    let round = (state.turn.number.saturating_sub(1) / 2) as usize;
    Some(alive[round % alive.len()])
}

fn closed(error: broadcast::error::RecvError, topic: &str) -> Result<()> {
    match error {
        RecvError::Closed => anyhow::bail!("{topic} events closed before the battle finished"),
        RecvError::Lagged(skipped) => {
            anyhow::bail!("missed {skipped} {topic} events")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{BattleConfig, Character, Team};

    fn team(healths: [u32; 3]) -> Team {
        Team::new(healths.map(|health| Character::new("C", 10).with_health(health)))
    }

    #[test]
    fn attacker_rotates_over_living_members() {
        let mut state = BattleState::new(
            team([10, 0, 10]),
            team([10, 10, 10]),
            &BattleConfig::default(),
        );

        assert_eq!(pick_attacker(&state), Some(0));
        state.turn.number = 3;
        assert_eq!(pick_attacker(&state), Some(2));
        state.turn.number = 5;
        assert_eq!(pick_attacker(&state), Some(0));
    }
}
