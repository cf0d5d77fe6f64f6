//! Match flow: intro poses, the start of the fight, and the knockout.

use hecs::{Entity, World};
use tracing::info;

use standoff_core::enums::{ActionKind, PlayerSlot};
use standoff_core::events::CombatEvent;
use standoff_core::types::Facing;

use crate::fighter::{ArchetypeRef, Fighter};

/// Put both fighters into their intro pose.
pub fn start_intro(world: &mut World, fighters: &[Entity; 2]) {
    for (_entity, (fighter, archetype)) in world.query_mut::<(&mut Fighter, &ArchetypeRef)>() {
        fighter.enter_scripted(&archetype.0, ActionKind::Intro, ActionKind::Idle);
    }
    face_each_other(world, fighters);
}

/// Release scripted poses so inputs take effect.
pub fn begin_fight(world: &mut World, fighters: &[Entity; 2]) {
    for (_entity, (fighter, archetype)) in world.query_mut::<(&mut Fighter, &ArchetypeRef)>() {
        if fighter.is_scripted() {
            fighter.go_idle(&archetype.0);
        }
    }
    face_each_other(world, fighters);
}

/// Detect a knockout. Returns true when the match just ended.
///
/// On a double knockout the lower player slot loses.
pub fn check_knockout(
    world: &mut World,
    fighters: &[Entity; 2],
    events: &mut Vec<CombatEvent>,
) -> bool {
    let loser = fighters.iter().position(|&entity| {
        world
            .get::<&Fighter>(entity)
            .is_ok_and(|fighter| fighter.health <= 0)
    });
    let Some(loser) = loser else {
        return false;
    };
    let winner = 1 - loser;
    events.push(CombatEvent::Ko {
        winner: PlayerSlot::ALL[winner],
        loser: PlayerSlot::ALL[loser],
    });
    info!(winner = ?PlayerSlot::ALL[winner], loser = ?PlayerSlot::ALL[loser], "knockout");

    for (index, &entity) in fighters.iter().enumerate() {
        let Ok(archetype) = world.get::<&ArchetypeRef>(entity).map(|a| a.0.clone()) else {
            continue;
        };
        let Ok(mut fighter) = world.get::<&mut Fighter>(entity) else {
            continue;
        };
        if fighter.dismiss_stand(&archetype) {
            events.push(CombatEvent::StandDismissed {
                fighter: fighter.slot,
                forced: true,
            });
        }
        let (pose, fallback) = if index == winner {
            (ActionKind::Victory, ActionKind::Idle)
        } else {
            (ActionKind::Defeat, ActionKind::Crouch)
        };
        fighter.enter_scripted(&archetype, pose, fallback);
        fighter.knockback = Default::default();
    }
    face_each_other(world, fighters);
    true
}

fn face_each_other(world: &mut World, fighters: &[Entity; 2]) {
    let xs = fighters.map(|entity| {
        world
            .get::<&Fighter>(entity)
            .map(|fighter| fighter.position.x)
            .ok()
    });
    let [Some(x1), Some(x2)] = xs else {
        return;
    };
    if x1 == x2 {
        return;
    }
    for (&entity, facing) in fighters
        .iter()
        .zip([Facing::toward(x1, x2), Facing::toward(x2, x1)])
    {
        if let Ok(mut fighter) = world.get::<&mut Fighter>(entity) {
            fighter.facing = facing;
        }
    }
}
