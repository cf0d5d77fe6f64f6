//! Scripted demo bout: a fixed input pattern for both players.
//!
//! Stands in for a real input device so the harness can run a full match
//! unattended. The pattern is a pure function of the tick, so every run of the
//! demo plays out the same way.

use standoff_core::commands::InputIntent;
use standoff_core::enums::{AttackSlot, MatchPhase, PlayerSlot};
use standoff_sim::{MatchEngine, MatchStats};
use tracing::{debug, info};

/// Length of one scripted cycle in ticks.
const CYCLE: u64 = 240;

/// Intents for both players at `tick` of the bout.
pub fn scripted_inputs(tick: u64) -> [InputIntent; 2] {
    [aggressor(tick), defender(tick)]
}

/// Player one closes in, summons, and chains attacks.
fn aggressor(tick: u64) -> InputIntent {
    match tick % CYCLE {
        0 => InputIntent::toggle_stand(),
        1..=59 => InputIntent::walking(1),
        60 | 80 | 100 => InputIntent::attack(AttackSlot::One),
        130 => InputIntent::dash(-1),
        160 => InputIntent::jump(),
        165 => InputIntent::jump(),
        190..=209 => InputIntent::walking(1),
        210 | 225 => InputIntent::attack(AttackSlot::Three),
        _ => InputIntent::neutral(),
    }
}

/// Player two guards, counters, and keeps its distance.
fn defender(tick: u64) -> InputIntent {
    match tick % CYCLE {
        55 => InputIntent::crouch_press(),
        56..=90 => InputIntent::crouch_hold(),
        110 => InputIntent::attack(AttackSlot::One),
        125 => InputIntent::attack(AttackSlot::Two),
        150..=170 => InputIntent::walking(1),
        180 => InputIntent::toggle_stand(),
        200 => InputIntent::attack(AttackSlot::Two),
        _ => InputIntent::neutral(),
    }
}

/// Run the scripted bout as fast as possible, up to `max_ticks` fight ticks.
pub fn run_headless(engine: &mut MatchEngine, max_ticks: u64) -> MatchStats {
    let mut stats = MatchStats::new();
    let mut fight_tick = 0;
    while fight_tick < max_ticks {
        let inputs = if engine.phase() == MatchPhase::Fighting {
            fight_tick += 1;
            scripted_inputs(fight_tick - 1)
        } else {
            [InputIntent::neutral(); 2]
        };
        let snapshot = engine.tick(inputs);
        for event in &snapshot.events {
            debug!(tick = snapshot.time.tick, ?event, "event");
        }
        stats.record_all(&snapshot.events);
        if snapshot.phase == MatchPhase::Finished {
            break;
        }
    }
    for slot in PlayerSlot::ALL {
        let player = stats.player(slot);
        info!(
            ?slot,
            hits = player.hits,
            blocks = player.blocks,
            damage = player.damage_dealt,
            points = player.points,
            won = player.won,
            "bout summary"
        );
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use standoff_roster::profiles::builtin_catalog;
    use standoff_sim::MatchConfig;

    fn engine() -> MatchEngine {
        let config = MatchConfig {
            intro_ticks: 0,
            starting_meter: 30.0,
            ..Default::default()
        };
        MatchEngine::new(config, &builtin_catalog().unwrap()).unwrap()
    }

    #[test]
    fn test_script_repeats_each_cycle() {
        for tick in 0..CYCLE {
            assert_eq!(scripted_inputs(tick), scripted_inputs(tick + CYCLE));
        }
    }

    #[test]
    fn test_demo_bout_is_deterministic() {
        let a = run_headless(&mut engine(), 1200);
        let b = run_headless(&mut engine(), 1200);
        assert_eq!(a, b);
        assert!(
            a.player(PlayerSlot::One).summons > 0,
            "The opening summon should always go through"
        );
    }

    #[test]
    fn test_headless_waits_out_intro() {
        let mut engine = MatchEngine::new(MatchConfig::default(), &builtin_catalog().unwrap())
            .unwrap();
        run_headless(&mut engine, 1);
        assert_eq!(engine.phase(), MatchPhase::Fighting);
        assert_eq!(engine.time().tick, 201);
    }
}
