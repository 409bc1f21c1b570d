//! End-to-end battle flow through the async runtime.
//!
//! Tests run on a paused tokio clock, so deferred flips and clock ticks fire
//! as soon as every task is idle.

use std::time::Duration;

use game_content::{Lineup, LineupBuilder, Roster};
use game_core::{
    Action, ActionError, ActionResult, AttackKind, BattleConfig, ErrorKind, FlipReason, FlipToken,
    Team, TeamId, TickResult,
};
use runtime::{BattleEvent, Event, MatchEvent, Runtime, RuntimeConfig, Topic, TurnEvent};

fn lineup(config: &BattleConfig) -> Lineup {
    let roster = Roster::standard();
    let mut builder = LineupBuilder::new(&roster);
    for (slot, name) in ["Rai", "Kitsumi", "Ioshiro"].into_iter().enumerate() {
        builder.assign(TeamId::One, slot, name).expect("team one pick");
    }
    for (slot, name) in ["Namae", "Vkhuu", "Kiota"].into_iter().enumerate() {
        builder.assign(TeamId::Two, slot, name).expect("team two pick");
    }
    builder.build(config).expect("complete lineup")
}

fn manual_config(turn_duration: u32) -> RuntimeConfig {
    RuntimeConfig {
        battle: BattleConfig::new().with_turn_duration(turn_duration),
        auto_tick: false,
        ..RuntimeConfig::default()
    }
}

async fn start(config: RuntimeConfig) -> Runtime {
    let lineup = lineup(&config.battle);
    Runtime::builder()
        .config(config)
        .lineup(lineup)
        .build()
        .await
        .expect("runtime should start")
}

/// Rai hits `slot` with a super attack (5 damage).
async fn rai_super_hit(runtime: &Runtime, slot: usize) -> ActionResult {
    let handle = runtime.handle();
    handle
        .select_attacker(TeamId::One, 0)
        .await
        .expect("select Rai");
    handle
        .select_attack(TeamId::One, AttackKind::Super)
        .await
        .expect("select super");
    handle
        .select_target(TeamId::One, slot)
        .await
        .expect("resolve hit")
        .result
}

#[tokio::test(start_paused = true)]
async fn hit_resolves_then_turn_flips_after_delay() {
    let runtime = start(manual_config(120)).await;
    let handle = runtime.handle();

    let selected = handle.select_attacker(TeamId::One, 0).await.unwrap();
    match selected.result {
        ActionResult::AttackerSelected { slot, options } => {
            assert_eq!(slot, 0);
            let damages: Vec<u32> = options.iter().map(|attack| attack.damage).collect();
            assert_eq!(damages, vec![3, 3, 5]);
        }
        other => panic!("unexpected result: {other:?}"),
    }

    handle
        .select_attack(TeamId::One, AttackKind::Super)
        .await
        .unwrap();
    let resolved = handle.select_target(TeamId::One, 2).await.unwrap();
    let ActionResult::TargetResolved(resolution) = resolved.result else {
        panic!("expected a resolved target");
    };
    assert_eq!(resolution.hit.previous_health, 10);
    assert_eq!(resolution.hit.health, 5);
    assert!(!resolution.scored);
    assert!(resolution.scheduled.is_some());

    // Still Team 1's turn, but nothing can be chosen until the flip.
    let error = handle.select_attacker(TeamId::One, 1).await.unwrap_err();
    assert_eq!(error.action_error(), Some(&ActionError::TurnResolving));

    let tick = handle.tick().await.unwrap();
    assert_eq!(tick.result, ActionResult::Tick(TickResult::Paused));

    tokio::time::sleep(Duration::from_millis(600)).await;

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.turn.current, TeamId::Two);
    assert_eq!(state.turn.number, 2);
    assert_eq!(state.turn.time_left, 120);
    assert_eq!(state.turn.selected_attacker, None);
    assert_eq!(state.turn.pending_flip, None);
    assert_eq!(state.teams[TeamId::Two].member(2).map(|c| c.health()), Some(5));
}

#[tokio::test(start_paused = true)]
async fn acting_out_of_turn_is_rejected_without_changes() {
    let runtime = start(manual_config(120)).await;
    let handle = runtime.handle();
    let before = handle.query_state().await.unwrap();

    let error = handle.select_attacker(TeamId::Two, 0).await.unwrap_err();
    assert_eq!(
        error.action_error(),
        Some(&ActionError::NotYourTurn {
            team: TeamId::Two,
            current: TeamId::One,
        })
    );

    let error = handle.select_attack(TeamId::One, AttackKind::Normal).await.unwrap_err();
    assert_eq!(error.action_error(), Some(&ActionError::NoAttackerSelected));

    assert_eq!(handle.query_state().await.unwrap(), before);
}

#[tokio::test(start_paused = true)]
async fn rejected_actions_are_published_with_their_kind() {
    let runtime = start(manual_config(120)).await;
    let handle = runtime.handle();
    let mut battle_rx = runtime.subscribe(Topic::Battle);

    handle.select_attacker(TeamId::One, 3).await.unwrap_err();

    match battle_rx.recv().await.unwrap() {
        Event::Battle(BattleEvent::ActionRejected { kind, code, .. }) => {
            assert_eq!(kind, ErrorKind::IllegalTransition);
            assert_eq!(code, "ACTION_SLOT_OUT_OF_RANGE");
        }
        other => panic!("unexpected event: {other:?}"),
    }

    handle.select_attacker(TeamId::One, 0).await.unwrap();
    handle.select_attack(TeamId::One, AttackKind::Normal).await.unwrap();
    handle.select_target(TeamId::One, 3).await.unwrap_err();

    let rejected = loop {
        match battle_rx.recv().await.unwrap() {
            Event::Battle(BattleEvent::ActionExecuted { .. }) => {}
            Event::Battle(BattleEvent::ActionRejected { kind, code, .. }) => break (kind, code),
            other => panic!("unexpected event: {other:?}"),
        }
    };
    assert_eq!(rejected.0, ErrorKind::InvalidTarget);
    assert_eq!(rejected.1, "ACTION_TARGET_OUT_OF_RANGE");
}

#[tokio::test(start_paused = true)]
async fn stale_or_missing_flips_are_ignored() {
    let runtime = start(manual_config(120)).await;
    let handle = runtime.handle();

    let error = handle
        .execute(Action::complete_turn(FlipToken(0)))
        .await
        .unwrap_err();
    assert_eq!(error.action_error(), Some(&ActionError::NoPendingFlip));

    let ActionResult::TargetResolved(resolution) = rai_super_hit(&runtime, 0).await else {
        panic!("expected a resolved target");
    };
    let scheduled = resolution.scheduled.expect("flip scheduled");
    let stale = FlipToken(scheduled.token.0 + 1);

    let error = handle.execute(Action::complete_turn(stale)).await.unwrap_err();
    assert_eq!(
        error.action_error(),
        Some(&ActionError::StaleFlip {
            token: stale,
            pending: Some(scheduled.token),
        })
    );
    assert_eq!(handle.query_state().await.unwrap().turn.current, TeamId::One);

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(handle.query_state().await.unwrap().turn.current, TeamId::Two);
}

#[tokio::test(start_paused = true)]
async fn manual_ticks_count_down_and_forfeit_the_turn() {
    let runtime = start(manual_config(3)).await;
    let handle = runtime.handle();
    let mut turn_rx = runtime.subscribe(Topic::Turn);

    handle.select_attacker(TeamId::One, 1).await.unwrap();

    assert_eq!(
        handle.tick().await.unwrap().result,
        ActionResult::Tick(TickResult::Counting { time_left: 2 })
    );
    handle.tick().await.unwrap();
    let expired = handle.tick().await.unwrap();
    let ActionResult::Tick(TickResult::Expired(change)) = expired.result else {
        panic!("expected the countdown to expire");
    };
    assert_eq!(change.previous, TeamId::One);
    assert_eq!(change.current, TeamId::Two);
    assert_eq!(change.reason, FlipReason::TimedOut);

    let mut countdown = Vec::new();
    loop {
        match turn_rx.recv().await.unwrap() {
            Event::Turn(TurnEvent::Countdown { team, time_left }) => {
                assert_eq!(team, TeamId::One);
                countdown.push(time_left);
            }
            Event::Turn(TurnEvent::Changed(published)) => {
                assert_eq!(published, change);
                break;
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
    assert_eq!(countdown, vec![2, 1]);

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.turn.selected_attacker, None);
    assert_eq!(state.turn.time_left, 3);
}

#[tokio::test(start_paused = true)]
async fn clock_worker_drives_the_countdown() {
    let config = RuntimeConfig {
        battle: BattleConfig::new().with_turn_duration(2),
        tick_interval_ms: 1000,
        ..RuntimeConfig::default()
    };
    let runtime = start(config).await;
    let mut turn_rx = runtime.subscribe(Topic::Turn);

    match turn_rx.recv().await.unwrap() {
        Event::Turn(TurnEvent::Countdown { team, time_left }) => {
            assert_eq!(team, TeamId::One);
            assert_eq!(time_left, 1);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match turn_rx.recv().await.unwrap() {
        Event::Turn(TurnEvent::Changed(change)) => {
            assert_eq!(change.current, TeamId::Two);
            assert_eq!(change.reason, FlipReason::TimedOut);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn defeating_every_defender_ends_the_battle() {
    // Team 2 never acts: each of its turns expires after one tick.
    let runtime = start(manual_config(1)).await;
    let handle = runtime.handle();
    let mut match_rx = runtime.subscribe(Topic::Match);

    let mut last = None;
    for slot in [0, 0, 1, 1, 2, 2] {
        last = Some(rai_super_hit(&runtime, slot).await);
        if handle.result().is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(600)).await;
        let expired = handle.tick().await.unwrap();
        assert!(matches!(
            expired.result,
            ActionResult::Tick(TickResult::Expired(_))
        ));
    }

    let Some(ActionResult::TargetResolved(resolution)) = last else {
        panic!("expected a final hit");
    };
    assert!(resolution.hit.defeated);
    assert!(resolution.scored);
    assert_eq!(resolution.scheduled, None);

    let result = handle.wait_for_result().await.unwrap();
    assert_eq!(result.winner, TeamId::One);
    assert_eq!(result.turns, 11);
    assert_eq!(resolution.result, Some(result));

    match match_rx.recv().await.unwrap() {
        Event::Match(MatchEvent::Finished { result: finished, scores }) => {
            assert_eq!(finished, result);
            assert_eq!(scores[TeamId::One], 3);
            assert_eq!(scores[TeamId::Two], 0);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let error = handle.tick().await.unwrap_err();
    assert_eq!(error.action_error(), Some(&ActionError::BattleOver));
    let error = handle.select_attacker(TeamId::One, 0).await.unwrap_err();
    assert_eq!(error.action_error(), Some(&ActionError::BattleOver));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn clock_stops_once_the_battle_is_won() {
    let config = RuntimeConfig {
        battle: BattleConfig::new().with_turn_duration(120),
        tick_interval_ms: 1000,
        ..RuntimeConfig::default()
    };
    // Every defender falls to a single super hit from Rai.
    let mut lineup = lineup(&config.battle);
    lineup.team_two = Team::new(std::array::from_fn(|slot| {
        lineup.team_two.members()[slot].clone().with_health(5)
    }));
    let runtime = Runtime::builder()
        .config(config)
        .lineup(lineup)
        .build()
        .await
        .expect("runtime should start");
    let handle = runtime.handle();
    let mut battle_rx = runtime.subscribe(Topic::Battle);

    for slot in 0..3 {
        rai_super_hit(&runtime, slot).await;
        if handle.result().is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(600)).await;

        // Kiota answers on Ioshiro and the turn flips back.
        handle.select_attacker(TeamId::Two, 2).await.unwrap();
        handle.select_attack(TeamId::Two, AttackKind::Normal).await.unwrap();
        handle.select_target(TeamId::Two, 2).await.unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
    }
    assert_eq!(handle.result().map(|result| result.winner), Some(TeamId::One));

    // Well past several tick periods, with the handle still alive.
    tokio::time::sleep(Duration::from_secs(10)).await;

    let mut finished = false;
    let mut ticks_before_finish = 0;
    while let Ok(event) = battle_rx.try_recv() {
        match event {
            Event::Battle(BattleEvent::ActionExecuted { action, state, .. }) => {
                if action == Action::tick() {
                    assert!(!finished, "clock ticked after the battle finished");
                    ticks_before_finish += 1;
                }
                finished |= state.is_over();
            }
            Event::Battle(BattleEvent::ActionRejected { action, code, .. }) => {
                panic!("unexpected rejection of {action:?}: {code}");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
    assert!(finished);
    assert!(ticks_before_finish > 0);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn builder_requires_a_battle() {
    let error = Runtime::builder().build().await.err().expect("missing battle");
    assert!(matches!(error, runtime::RuntimeError::MissingBattle));
}
