//! Tests for the match engine, fighter transitions, combat resolution, and save/restore.

use standoff_core::archetype::ActionClip;
use standoff_core::commands::{InputIntent, MatchCommand};
use standoff_core::constants::{
    COMBO_BREAK_COOLDOWN, HIT_COOLDOWN, POINTS_PER_BLOCK, POINTS_PER_COMBO, POINTS_PER_HIT,
    POINTS_PER_KO, POINTS_WIN_BONUS,
};
use standoff_core::enums::*;
use standoff_core::error::ConfigError;
use standoff_core::events::CombatEvent;
use standoff_core::types::{Facing, FrameRange, Vec2};
use standoff_roster::profiles::{builtin_catalog, DIO, JOTARO};
use standoff_roster::ArchetypeCatalog;

use crate::animation::{advance, Gate, Step};
use crate::engine::{MatchConfig, MatchEngine, MatchState};
use crate::fighter::{Activity, Fighter};
use crate::stats::MatchStats;
use crate::systems::combat::resolve_hit;

// ---- Helpers ----

fn catalog() -> ArchetypeCatalog {
    builtin_catalog().expect("built-in roster loads")
}

fn config(p1: &str, p2: &str, spawn_x: [f64; 2], starting_meter: f64) -> MatchConfig {
    MatchConfig {
        p1: p1.into(),
        p2: p2.into(),
        intro_ticks: 0,
        spawn_x,
        starting_meter,
        ..Default::default()
    }
}

/// Jotaro (P1) and DIO (P2) close enough for Jotaro's first attack to connect.
fn close_fight(starting_meter: f64) -> MatchEngine {
    MatchEngine::new(config(JOTARO, DIO, [300.0, 400.0], starting_meter), &catalog())
        .expect("engine builds")
}

fn far_fight(starting_meter: f64) -> MatchEngine {
    MatchEngine::new(config(JOTARO, DIO, [200.0, 600.0], starting_meter), &catalog())
        .expect("engine builds")
}

fn idle() -> [InputIntent; 2] {
    [InputIntent::neutral(); 2]
}

fn p1(intent: InputIntent) -> [InputIntent; 2] {
    [intent, InputIntent::neutral()]
}

fn p2(intent: InputIntent) -> [InputIntent; 2] {
    [InputIntent::neutral(), intent]
}

fn fighter(engine: &MatchEngine, slot: PlayerSlot) -> Fighter {
    Fighter::clone(&engine.fighter(slot).expect("fighter exists"))
}

/// Tick `n` times with the same inputs, collecting every event.
fn run(engine: &mut MatchEngine, n: usize, inputs: [InputIntent; 2]) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        events.extend(engine.tick(inputs).events);
    }
    events
}

/// Tick with neutral inputs until `slot` is idle again.
fn settle(engine: &mut MatchEngine, slot: PlayerSlot, max_ticks: usize) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    for _ in 0..max_ticks {
        if fighter(engine, slot).activity == Activity::Idle {
            return events;
        }
        events.extend(engine.tick(idle()).events);
    }
    panic!("{slot:?} did not return to idle within {max_ticks} ticks");
}

fn summon_stand(engine: &mut MatchEngine, slot: PlayerSlot) {
    let inputs = match slot {
        PlayerSlot::One => p1(InputIntent::toggle_stand()),
        PlayerSlot::Two => p2(InputIntent::toggle_stand()),
    };
    let events = run(engine, 1, inputs);
    assert!(
        events.contains(&CombatEvent::StandSummon { fighter: slot }),
        "Summon should succeed with enough meter"
    );
    settle(engine, slot, 100);
    assert!(fighter(engine, slot).stand.is_some());
}

// ---- Match flow ----

#[test]
fn test_intro_runs_then_fight_starts() {
    let mut engine = MatchEngine::new(MatchConfig::default(), &catalog()).unwrap();
    assert_eq!(engine.phase(), MatchPhase::Intro);
    assert_eq!(fighter(&engine, PlayerSlot::One).action, ActionKind::Intro);

    let start_x = fighter(&engine, PlayerSlot::One).position.x;
    run(&mut engine, 199, p1(InputIntent::walking(1)));
    assert_eq!(engine.phase(), MatchPhase::Intro);
    assert_eq!(
        fighter(&engine, PlayerSlot::One).position.x,
        start_x,
        "Inputs are ignored during the intro"
    );

    engine.tick(idle());
    assert_eq!(engine.phase(), MatchPhase::Fighting);
    for slot in PlayerSlot::ALL {
        let f = fighter(&engine, slot);
        assert_eq!(f.activity, Activity::Idle);
        assert_eq!(f.action, ActionKind::Idle);
    }
    assert_eq!(engine.time().tick, 200);
}

#[test]
fn test_skip_intro() {
    let mut engine = MatchEngine::new(MatchConfig::default(), &catalog()).unwrap();
    engine.queue_command(MatchCommand::SkipIntro);
    engine.tick(idle());
    assert_eq!(engine.phase(), MatchPhase::Fighting);
    assert_eq!(fighter(&engine, PlayerSlot::Two).action, ActionKind::Idle);
}

#[test]
fn test_pause_freezes_time_and_state() {
    let mut engine = far_fight(0.0);
    engine.tick(idle());
    engine.queue_command(MatchCommand::Pause);
    let snap = engine.tick(p1(InputIntent::walking(1)));
    assert_eq!(snap.phase, MatchPhase::Paused);
    assert_eq!(snap.time.tick, 1, "Paused ticks do not advance time");
    assert_eq!(fighter(&engine, PlayerSlot::One).position.x, 200.0);

    engine.queue_command(MatchCommand::Resume);
    engine.tick(p1(InputIntent::walking(1)));
    assert_eq!(engine.phase(), MatchPhase::Fighting);
    assert_eq!(fighter(&engine, PlayerSlot::One).position.x, 203.0);
}

#[test]
fn test_force_action_scripted_pose() {
    let mut engine = far_fight(0.0);
    engine.queue_command(MatchCommand::ForceAction {
        slot: PlayerSlot::Two,
        action: ActionKind::Victory,
    });
    engine.tick(idle());
    let dio = fighter(&engine, PlayerSlot::Two);
    assert_eq!(dio.action, ActionKind::Victory);
    assert!(dio.is_scripted());

    // Scripted fighters ignore input until released.
    engine.tick(p2(InputIntent::jump()));
    assert_eq!(fighter(&engine, PlayerSlot::Two).action, ActionKind::Victory);

    engine.queue_command(MatchCommand::ForceAction {
        slot: PlayerSlot::Two,
        action: ActionKind::Idle,
    });
    engine.tick(idle());
    let dio = fighter(&engine, PlayerSlot::Two);
    assert_eq!(dio.action, ActionKind::Idle);
    assert!(!dio.is_scripted());
}

#[test]
fn test_force_action_rejects_gameplay_clips() {
    let mut engine = far_fight(0.0);
    engine.queue_command(MatchCommand::ForceAction {
        slot: PlayerSlot::One,
        action: ActionKind::Attack1,
    });
    run(&mut engine, 30, idle());
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.action, ActionKind::Idle);
    assert_eq!(jotaro.activity, Activity::Idle);

    // Still free to act afterwards.
    run(&mut engine, 1, p1(InputIntent::walking(1)));
    assert_eq!(fighter(&engine, PlayerSlot::One).action, ActionKind::WalkForward);
}

#[test]
fn test_unknown_archetype_rejected() {
    let result = MatchEngine::new(config("kakyoin", DIO, [200.0, 600.0], 0.0), &catalog());
    let Err(err) = result else {
        panic!("an unknown archetype must not build a match");
    };
    assert_eq!(err, ConfigError::UnknownArchetype("kakyoin".into()));
}

// ---- Locomotion ----

#[test]
fn test_walk_forward_and_backward() {
    let mut engine = far_fight(0.0);
    run(&mut engine, 10, p1(InputIntent::walking(1)));
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.position.x, 230.0);
    assert_eq!(jotaro.action, ActionKind::WalkForward);
    assert_eq!(jotaro.position.y, 150.0, "Walking stays on the ground");

    engine.tick(p1(InputIntent::walking(-1)));
    assert_eq!(fighter(&engine, PlayerSlot::One).action, ActionKind::WalkBackward);

    engine.tick(idle());
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.activity, Activity::Idle);
    assert_eq!(jotaro.action, ActionKind::Idle);
}

#[test]
fn test_facing_follows_opponent() {
    let mut engine = close_fight(0.0);
    engine.fighter_mut(PlayerSlot::One).unwrap().position.x = 500.0;
    engine.tick(idle());
    assert_eq!(fighter(&engine, PlayerSlot::One).facing, Facing::Left);
    assert_eq!(fighter(&engine, PlayerSlot::Two).facing, Facing::Right);
}

#[test]
fn test_dash_stops_at_wall() {
    let mut engine = MatchEngine::new(config(JOTARO, DIO, [100.0, 600.0], 0.0), &catalog())
        .unwrap();
    let events = run(&mut engine, 1, p1(InputIntent::dash(-1)));
    assert!(events.contains(&CombatEvent::Dash {
        fighter: PlayerSlot::One
    }));
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.action, ActionKind::DashBackward);
    assert_eq!(jotaro.position.x, 85.0);

    run(&mut engine, 3, idle());
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.position.x, 40.0, "Dash target is clamped to the stage");
    assert_eq!(jotaro.activity, Activity::Idle, "Reaching the wall ends the dash");

    let events = run(&mut engine, 1, p1(InputIntent::dash(1)));
    assert!(events.is_empty(), "Dash cooldown rejects a second dash");
}

#[test]
fn test_jump_lands_and_idles() {
    let mut engine = far_fight(0.0);
    let events = run(&mut engine, 1, p1(InputIntent::jump()));
    assert_eq!(
        events,
        vec![CombatEvent::Jump {
            fighter: PlayerSlot::One,
            double: false
        }]
    );
    assert!(fighter(&engine, PlayerSlot::One).position.y > 150.0);

    let events = run(&mut engine, 1, p1(InputIntent::jump()));
    assert!(events.is_empty(), "No double jump without a Stand");

    settle(&mut engine, PlayerSlot::One, 150);
    assert_eq!(fighter(&engine, PlayerSlot::One).position.y, 150.0);
}

#[test]
fn test_double_jump_needs_stand() {
    let mut engine = far_fight(50.0);
    summon_stand(&mut engine, PlayerSlot::One);

    run(&mut engine, 1, p1(InputIntent::jump()));
    let events = run(&mut engine, 1, p1(InputIntent::jump()));
    assert_eq!(
        events,
        vec![CombatEvent::Jump {
            fighter: PlayerSlot::One,
            double: true
        }]
    );
    assert_eq!(
        fighter(&engine, PlayerSlot::One).activity,
        Activity::Airborne {
            double_jump_used: true
        }
    );

    let events = run(&mut engine, 1, p1(InputIntent::jump()));
    assert!(events.is_empty(), "Only one double jump per airtime");
}

// ---- Stand ----

#[test]
fn test_stand_summon_costs_meter_and_follows_owner() {
    let mut engine = far_fight(50.0);
    engine.tick(p1(InputIntent::toggle_stand()));
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.activity, Activity::Summoning);
    assert_eq!(jotaro.meter, 40.0);
    let stand = jotaro.stand.expect("stand summoned");
    assert_eq!(stand.action, StandAction::Summon);
    assert_eq!(stand.position, Vec2::new(160.0, 150.0), "Star Platinum sits behind Jotaro");

    settle(&mut engine, PlayerSlot::One, 100);
    let events = run(&mut engine, 1, p1(InputIntent::toggle_stand()));
    assert_eq!(
        events,
        vec![CombatEvent::StandDismissed {
            fighter: PlayerSlot::One,
            forced: false
        }]
    );
    assert!(fighter(&engine, PlayerSlot::One).stand.is_none());
}

#[test]
fn test_summon_without_meter_rejected() {
    let mut engine = far_fight(0.0);
    let events = run(&mut engine, 1, p1(InputIntent::toggle_stand()));
    assert!(events.is_empty());
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert!(jotaro.stand.is_none());
    assert_eq!(jotaro.activity, Activity::Idle);
}

#[test]
fn test_stand_attack_hits_and_releases_owner() {
    let mut engine = close_fight(50.0);
    summon_stand(&mut engine, PlayerSlot::One);

    let events = run(&mut engine, 1, p1(InputIntent::attack(AttackSlot::One)));
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.action, ActionKind::StandAttack1);
    assert_eq!(
        jotaro.stand.as_ref().map(|s| s.action),
        Some(StandAction::Attack1)
    );
    assert!(events.contains(&CombatEvent::Hit {
        attacker: PlayerSlot::One,
        defender: PlayerSlot::Two,
        damage: 12,
        form: AttackForm::Stand,
    }));
    assert_eq!(fighter(&engine, PlayerSlot::Two).health, 988);

    run(&mut engine, 25, idle());
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.activity, Activity::Idle);
    assert!(!jotaro.stand.as_ref().unwrap().is_attacking());
}

// ---- Combat ----

#[test]
fn test_attack_hits_once_per_activation() {
    let mut engine = close_fight(0.0);
    let mut events = run(&mut engine, 1, p1(InputIntent::attack(AttackSlot::One)));
    assert_eq!(fighter(&engine, PlayerSlot::One).action, ActionKind::Attack1);
    events.extend(run(&mut engine, 2, idle()));
    assert_eq!(
        events,
        vec![CombatEvent::Hit {
            attacker: PlayerSlot::One,
            defender: PlayerSlot::Two,
            damage: 15,
            form: AttackForm::Owner,
        }]
    );
    let dio = fighter(&engine, PlayerSlot::Two);
    assert_eq!(dio.health, 985);
    assert_eq!(dio.action, ActionKind::Hit);
    assert_eq!(dio.timers.hit_cooldown, HIT_COOLDOWN);

    // Even with the defender open again, the latched attack stays spent.
    engine.fighter_mut(PlayerSlot::Two).unwrap().timers.hit_cooldown = 0;
    let events = run(&mut engine, 6, idle());
    assert!(events.is_empty(), "Attack landed twice: {events:?}");
    assert_eq!(fighter(&engine, PlayerSlot::Two).health, 985);
}

#[test]
fn test_hit_pushes_and_recovers() {
    let mut engine = close_fight(0.0);
    run(&mut engine, 3, p1(InputIntent::attack(AttackSlot::One)));
    run(&mut engine, 10, idle());
    assert!(
        fighter(&engine, PlayerSlot::Two).position.x > 420.0,
        "Knockback pushes the defender away"
    );
    settle(&mut engine, PlayerSlot::Two, 40);
    assert_eq!(fighter(&engine, PlayerSlot::Two).action, ActionKind::Idle);
}

#[test]
fn test_out_of_range_attack_misses() {
    let mut engine = far_fight(0.0);
    let mut events = run(&mut engine, 1, p1(InputIntent::attack(AttackSlot::One)));
    events.extend(settle(&mut engine, PlayerSlot::One, 40));
    assert!(events.is_empty());
    assert_eq!(fighter(&engine, PlayerSlot::Two).health, 1000);
}

#[test]
fn test_resolve_hit_respects_active_frames() {
    let catalog = catalog();
    let jotaro = catalog.get(JOTARO).unwrap();
    let dio = catalog.get(DIO).unwrap();
    let mut engine = close_fight(0.0);
    engine.tick(p1(InputIntent::attack(AttackSlot::One)));
    let mut attacker = fighter(&engine, PlayerSlot::One);
    let defender = fighter(&engine, PlayerSlot::Two);

    attacker.frame = 452;
    assert!(resolve_hit(&attacker, &jotaro, &defender, &dio).is_none());
    attacker.frame = 455;
    assert!(resolve_hit(&attacker, &jotaro, &defender, &dio).is_none());

    attacker.frame = 454;
    let check = resolve_hit(&attacker, &jotaro, &defender, &dio).expect("active frame hits");
    assert_eq!(check.damage, 15);
    assert_eq!(check.knockback, 5.0);
    assert_eq!(check.form, AttackForm::Owner);

    // The hitbox keeps the facing captured when the attack started.
    attacker.facing = Facing::Left;
    assert!(resolve_hit(&attacker, &jotaro, &defender, &dio).is_some());
}

#[test]
fn test_simultaneous_hits_trade() {
    let mut engine = MatchEngine::new(config(JOTARO, JOTARO, [300.0, 400.0], 0.0), &catalog())
        .unwrap();
    let attack = InputIntent::attack(AttackSlot::One);
    let mut events = run(&mut engine, 1, [attack, attack]);
    events.extend(run(&mut engine, 2, idle()));
    let hits = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::Hit { .. }))
        .count();
    assert_eq!(hits, 2, "Both attacks should land on the same tick");
    assert_eq!(fighter(&engine, PlayerSlot::One).health, 985);
    assert_eq!(fighter(&engine, PlayerSlot::Two).health, 985);
}

#[test]
fn test_combo_chains_after_connect() {
    let mut engine = close_fight(0.0);
    run(&mut engine, 1, p1(InputIntent::attack(AttackSlot::One)));
    settle(&mut engine, PlayerSlot::One, 40);
    assert_eq!(fighter(&engine, PlayerSlot::One).combo.counter, 1);
    assert!(fighter(&engine, PlayerSlot::One).combo.connected);

    engine.fighter_mut(PlayerSlot::Two).unwrap().timers.hit_cooldown = 0;
    let mut events = run(&mut engine, 1, p1(InputIntent::attack(AttackSlot::One)));
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.action, ActionKind::Attack2, "Chain picks the next stage");
    assert_eq!(jotaro.combo.counter, 2);

    events.extend(settle(&mut engine, PlayerSlot::One, 40));
    assert!(events.contains(&CombatEvent::Combo {
        fighter: PlayerSlot::One,
        count: 2
    }));
    assert_eq!(fighter(&engine, PlayerSlot::Two).health, 1000 - 15 - 20);
}

#[test]
fn test_combo_window_expires() {
    let mut engine = close_fight(0.0);
    run(&mut engine, 1, p1(InputIntent::attack(AttackSlot::One)));
    run(&mut engine, 40, idle());
    assert_eq!(fighter(&engine, PlayerSlot::One).combo.counter, 0);

    run(&mut engine, 1, p1(InputIntent::attack(AttackSlot::One)));
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.action, ActionKind::Attack1);
    assert_eq!(jotaro.combo.counter, 1);
    assert_eq!(jotaro.timers.combo_cooldown, 0);
}

#[test]
fn test_whiffed_chain_arms_penalty() {
    let mut engine = far_fight(0.0);
    run(&mut engine, 1, p1(InputIntent::attack(AttackSlot::One)));
    settle(&mut engine, PlayerSlot::One, 40);

    run(&mut engine, 1, p1(InputIntent::attack(AttackSlot::Two)));
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.action, ActionKind::Attack2, "The attack still plays");
    assert_eq!(jotaro.combo.counter, 1);
    assert_eq!(jotaro.timers.combo_cooldown, COMBO_BREAK_COOLDOWN - 1);

    settle(&mut engine, PlayerSlot::One, 40);
    run(&mut engine, 1, p1(InputIntent::attack(AttackSlot::Three)));
    assert_eq!(
        fighter(&engine, PlayerSlot::One).action,
        ActionKind::Idle,
        "Attacks are locked out during the penalty"
    );
}

// ---- Guard and meter ----

#[test]
fn test_chip_guard_without_stand() {
    let mut engine = close_fight(50.0);
    let mut events = run(
        &mut engine,
        1,
        [
            InputIntent::attack(AttackSlot::One),
            InputIntent::crouch_press(),
        ],
    );
    assert!(fighter(&engine, PlayerSlot::Two).is_guarding());
    events.extend(run(&mut engine, 2, p2(InputIntent::crouch_hold())));

    assert!(events.contains(&CombatEvent::Hit {
        attacker: PlayerSlot::One,
        defender: PlayerSlot::Two,
        damage: 7,
        form: AttackForm::Owner,
    }));
    assert!(events.contains(&CombatEvent::Block {
        defender: PlayerSlot::Two
    }));
    let dio = fighter(&engine, PlayerSlot::Two);
    assert_eq!(dio.health, 993, "Chip guard halves the damage");
    assert_eq!(dio.activity, Activity::HitStun { guarding: true });
    assert_eq!(dio.action, ActionKind::Crouch);
    assert!((dio.meter - 45.3).abs() < 1e-9, "meter was {}", dio.meter);
}

#[test]
fn test_crouch_release_plays_exit_frames() {
    let mut engine = far_fight(0.0);
    run(&mut engine, 1, p1(InputIntent::crouch_press()));
    run(&mut engine, 3, p1(InputIntent::crouch_hold()));

    // Letting go while already walking must not cut the exit frames.
    engine.tick(p1(InputIntent::walking(1)));
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.activity, Activity::CrouchRelease);
    assert_eq!(jotaro.action, ActionKind::Crouch);
    assert!(!jotaro.is_guarding());

    let mut last_frame = jotaro.frame;
    for _ in 0..100 {
        let jotaro = fighter(&engine, PlayerSlot::One);
        if jotaro.activity != Activity::CrouchRelease {
            break;
        }
        assert_eq!(jotaro.action, ActionKind::Crouch);
        assert_eq!(jotaro.position.x, 200.0, "No walking during the exit");
        last_frame = jotaro.frame;
        engine.tick(p1(InputIntent::walking(1)));
    }
    assert_eq!(last_frame, 36, "The exit reaches the clip's last frame");
    assert_eq!(fighter(&engine, PlayerSlot::One).activity, Activity::Idle);

    engine.tick(p1(InputIntent::walking(1)));
    let jotaro = fighter(&engine, PlayerSlot::One);
    assert_eq!(jotaro.activity, Activity::Walking);
    assert_eq!(jotaro.action, ActionKind::WalkForward);
}

#[test]
fn test_guard_with_stand_drains_meter() {
    let mut engine = close_fight(50.0);
    summon_stand(&mut engine, PlayerSlot::Two);
    engine.fighter_mut(PlayerSlot::Two).unwrap().meter = 60.0;

    run(&mut engine, 1, p2(InputIntent::crouch_press()));
    let mut events = run(
        &mut engine,
        1,
        [
            InputIntent::attack(AttackSlot::One),
            InputIntent::crouch_hold(),
        ],
    );
    events.extend(run(&mut engine, 2, p2(InputIntent::crouch_hold())));

    assert!(events.contains(&CombatEvent::Block {
        defender: PlayerSlot::Two
    }));
    let dio = fighter(&engine, PlayerSlot::Two);
    assert_eq!(dio.health, 1000, "A Stand guard takes no damage");
    assert_eq!(dio.meter, 45.0);
    assert_eq!(
        dio.stand.as_ref().map(|s| s.action),
        Some(StandAction::Block)
    );
}

#[test]
fn test_guard_that_empties_meter_breaks_stand() {
    let mut engine = close_fight(50.0);
    summon_stand(&mut engine, PlayerSlot::Two);
    engine.fighter_mut(PlayerSlot::Two).unwrap().meter = 20.0;

    run(&mut engine, 1, p2(InputIntent::crouch_press()));
    let mut events = run(
        &mut engine,
        1,
        [
            InputIntent::attack(AttackSlot::One),
            InputIntent::crouch_hold(),
        ],
    );
    events.extend(run(&mut engine, 2, p2(InputIntent::crouch_hold())));

    assert!(events.contains(&CombatEvent::StandDismissed {
        fighter: PlayerSlot::Two,
        forced: true
    }));
    let dio = fighter(&engine, PlayerSlot::Two);
    assert!(dio.stand.is_none());
    assert_eq!(dio.meter, 0.0);
    assert_eq!(dio.health, 1000);
}

#[test]
fn test_broken_stand_guard_earns_no_hit_meter() {
    let mut engine = close_fight(50.0);
    summon_stand(&mut engine, PlayerSlot::Two);
    // Below DIO's block drain of 20, so the guard cannot hold.
    engine.fighter_mut(PlayerSlot::Two).unwrap().meter = 10.0;

    run(&mut engine, 1, p2(InputIntent::crouch_press()));
    let mut events = run(
        &mut engine,
        1,
        [
            InputIntent::attack(AttackSlot::One),
            InputIntent::crouch_hold(),
        ],
    );
    events.extend(run(&mut engine, 2, p2(InputIntent::crouch_hold())));

    assert!(events.contains(&CombatEvent::Hit {
        attacker: PlayerSlot::One,
        defender: PlayerSlot::Two,
        damage: 15,
        form: AttackForm::Owner,
    }));
    assert!(!events.contains(&CombatEvent::Block {
        defender: PlayerSlot::Two
    }));
    assert!(events.contains(&CombatEvent::StandDismissed {
        fighter: PlayerSlot::Two,
        forced: true
    }));
    let dio = fighter(&engine, PlayerSlot::Two);
    assert_eq!(dio.meter, 0.0, "The damage drain runs without the hit gain");
    assert!(dio.stand.is_none());
    assert_eq!(dio.health, 985);
}

#[test]
fn test_meter_and_health_stay_in_bounds() {
    let catalog = catalog();
    let jotaro = catalog.get(JOTARO).unwrap();
    let mut f = Fighter::new(
        PlayerSlot::One,
        &jotaro,
        Vec2::new(200.0, 150.0),
        Facing::Right,
        500.0,
    );
    assert_eq!(f.meter, 100.0, "Starting meter is clamped to the maximum");
    f.gain_meter(&jotaro, 50.0);
    assert_eq!(f.meter, 100.0);
    assert!(f.drain_meter(&jotaro, 250.0));
    assert_eq!(f.meter, 0.0);

    let outcome = f.take_damage(&jotaro, 5000, 3.0).expect("hit lands");
    assert_eq!(f.health, 0);
    assert!(!outcome.guarded);
    assert!(
        f.take_damage(&jotaro, 10, 3.0).is_none(),
        "Hit cooldown makes the fighter untouchable"
    );
}

// ---- Knockout ----

#[test]
fn test_knockout_ends_match() {
    let mut engine = close_fight(0.0);
    engine.fighter_mut(PlayerSlot::Two).unwrap().health = 10;
    let mut events = run(&mut engine, 1, p1(InputIntent::attack(AttackSlot::One)));
    events.extend(run(&mut engine, 2, idle()));

    assert!(events.contains(&CombatEvent::Ko {
        winner: PlayerSlot::One,
        loser: PlayerSlot::Two
    }));
    assert_eq!(engine.phase(), MatchPhase::Finished);
    let jotaro = fighter(&engine, PlayerSlot::One);
    let dio = fighter(&engine, PlayerSlot::Two);
    assert_eq!(dio.health, 0);
    assert_eq!(jotaro.action, ActionKind::Victory);
    assert_eq!(dio.action, ActionKind::Defeat);

    // Finished matches keep animating but ignore input.
    let events = run(&mut engine, 5, p1(InputIntent::attack(AttackSlot::Two)));
    assert!(events.is_empty());
    assert_eq!(engine.phase(), MatchPhase::Finished);
}

// ---- Save / restore ----

fn scripted_inputs(tick: usize) -> [InputIntent; 2] {
    match tick {
        0 => [InputIntent::toggle_stand(), InputIntent::walking(-1)],
        45 => [InputIntent::attack(AttackSlot::One), InputIntent::crouch_press()],
        46..=60 => [InputIntent::neutral(), InputIntent::crouch_hold()],
        70 => [InputIntent::jump(), InputIntent::attack(AttackSlot::One)],
        71 => [InputIntent::jump(), InputIntent::neutral()],
        90 => [InputIntent::dash(1), InputIntent::attack(AttackSlot::Two)],
        100..=110 => [InputIntent::walking(1), InputIntent::walking(-1)],
        120 => [InputIntent::attack(AttackSlot::Three), InputIntent::toggle_stand()],
        _ => idle(),
    }
}

#[test]
fn test_save_restore_resumes_identically() {
    let catalog = catalog();
    let config = config(JOTARO, DIO, [300.0, 420.0], 40.0);
    let mut original = MatchEngine::new(config.clone(), &catalog).unwrap();
    for tick in 0..60 {
        original.tick(scripted_inputs(tick));
    }
    original.queue_command(MatchCommand::Pause);
    original.queue_command(MatchCommand::Resume);

    let json = serde_json::to_string(&original.save_state()).unwrap();
    let state: MatchState = serde_json::from_str(&json).unwrap();
    assert_eq!(state, original.save_state());
    let mut restored = MatchEngine::restore(config, &catalog, state).unwrap();
    assert_eq!(
        serde_json::to_string(&restored.snapshot()).unwrap(),
        serde_json::to_string(&original.snapshot()).unwrap()
    );

    for tick in 60..200 {
        let a = original.tick(scripted_inputs(tick));
        let b = restored.tick(scripted_inputs(tick));
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap(),
            "Restored match diverged at tick {tick}"
        );
    }
}

#[test]
fn test_same_inputs_same_match() {
    let catalog = catalog();
    let config = config(JOTARO, DIO, [300.0, 420.0], 40.0);
    let mut a = MatchEngine::new(config.clone(), &catalog).unwrap();
    let mut b = MatchEngine::new(config, &catalog).unwrap();
    for tick in 0..200 {
        let snap_a = a.tick(scripted_inputs(tick));
        let snap_b = b.tick(scripted_inputs(tick));
        assert_eq!(snap_a, snap_b, "Snapshots diverged at tick {tick}");
    }
}

#[test]
fn test_restore_rejects_bad_state() {
    let catalog = catalog();
    let engine = far_fight(0.0);
    let mut state = engine.save_state();
    state.fighters.pop();
    let Err(err) = MatchEngine::restore(MatchConfig::default(), &catalog, state) else {
        panic!("a state with one fighter must not restore");
    };
    assert!(matches!(err, ConfigError::InvalidState(_)), "{err}");

    let mut state = engine.save_state();
    state.fighters.swap(0, 1);
    assert!(MatchEngine::restore(MatchConfig::default(), &catalog, state).is_err());
}

// ---- Stats ----

#[test]
fn test_stats_fold_events() {
    let mut stats = MatchStats::new();
    stats.record_all(&[
        CombatEvent::Hit {
            attacker: PlayerSlot::One,
            defender: PlayerSlot::Two,
            damage: 15,
            form: AttackForm::Owner,
        },
        CombatEvent::Hit {
            attacker: PlayerSlot::One,
            defender: PlayerSlot::Two,
            damage: 20,
            form: AttackForm::Owner,
        },
        CombatEvent::Combo {
            fighter: PlayerSlot::One,
            count: 2,
        },
        CombatEvent::Block {
            defender: PlayerSlot::Two,
        },
        CombatEvent::Ko {
            winner: PlayerSlot::One,
            loser: PlayerSlot::Two,
        },
    ]);
    let one = stats.player(PlayerSlot::One);
    assert_eq!(one.hits, 2);
    assert_eq!(one.damage_dealt, 35);
    assert!(one.won);
    assert_eq!(
        one.points,
        2 * POINTS_PER_HIT + POINTS_PER_COMBO + POINTS_PER_KO + POINTS_WIN_BONUS
    );
    let two = stats.player(PlayerSlot::Two);
    assert_eq!(two.blocks, 1);
    assert_eq!(two.points, POINTS_PER_BLOCK);
    assert!(!two.won);
}

// ---- Animation driver ----

fn clip(start: u16, end: u16, speed: u16) -> ActionClip {
    ActionClip {
        frames: FrameRange::new(start, end),
        speed,
    }
}

#[test]
fn test_loop_wraps_after_speed_ticks() {
    let clip = clip(0, 2, 3);
    let (mut frame, mut hold) = (2, 0);
    let gate = Gate::default();
    assert_eq!(advance(&clip, Playback::Loop, &mut frame, &mut hold, &gate), Step::Playing);
    assert_eq!(advance(&clip, Playback::Loop, &mut frame, &mut hold, &gate), Step::Playing);
    assert_eq!(frame, 2, "Frame holds for `speed` ticks");
    advance(&clip, Playback::Loop, &mut frame, &mut hold, &gate);
    assert_eq!(frame, 0);
}

#[test]
fn test_one_shot_completes_past_last_frame() {
    let clip = clip(10, 11, 1);
    let (mut frame, mut hold) = (10, 0);
    let gate = Gate::default();
    assert_eq!(advance(&clip, Playback::OneShot, &mut frame, &mut hold, &gate), Step::Playing);
    assert_eq!(frame, 11);
    assert_eq!(advance(&clip, Playback::OneShot, &mut frame, &mut hold, &gate), Step::Complete);
    assert_eq!(frame, 11);
}

#[test]
fn test_freeze_holds_then_releases() {
    let clip = clip(26, 36, 1);
    let (mut frame, mut hold) = (26, 0);
    let held = Gate {
        freeze_frame: Some(31),
        held: true,
        ..Gate::default()
    };
    for _ in 0..20 {
        advance(&clip, Playback::FreezeToPoint, &mut frame, &mut hold, &held);
    }
    assert_eq!(frame, 31);

    let released = Gate {
        held: false,
        ..held
    };
    let mut steps = 0;
    while advance(&clip, Playback::FreezeToPoint, &mut frame, &mut hold, &released)
        == Step::Playing
    {
        steps += 1;
    }
    assert_eq!(steps, 5, "Release plays on from the frozen frame");
    assert_eq!(frame, 36);
}

#[test]
fn test_position_gated_loops_while_airborne() {
    let clip = clip(84, 99, 1);
    let (mut frame, mut hold) = (93, 0);
    let airborne = Gate {
        jump_loop: Some(FrameRange::new(94, 95)),
        airborne: true,
        ..Gate::default()
    };
    for _ in 0..7 {
        advance(&clip, Playback::PositionGated, &mut frame, &mut hold, &airborne);
        assert!((93..=95).contains(&frame));
    }

    let landed = Gate {
        airborne: false,
        grounded: true,
        ..airborne
    };
    let mut result = Step::Playing;
    for _ in 0..10 {
        result = advance(&clip, Playback::PositionGated, &mut frame, &mut hold, &landed);
    }
    assert_eq!(result, Step::Complete);
    assert_eq!(frame, 99);
}
