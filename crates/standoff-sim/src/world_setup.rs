//! Entity spawn factories for setting up the match world.
//!
//! Each fighter entity carries its `Fighter` state, the shared archetype, and
//! a handle to the other fighter.

use std::sync::Arc;

use hecs::{Entity, World};

use standoff_core::archetype::Archetype;
use standoff_core::enums::PlayerSlot;
use standoff_core::types::{Facing, Vec2};

use crate::engine::MatchConfig;
use crate::fighter::{ArchetypeRef, Fighter, Opponent};

/// Spawn both fighters at their configured marks, facing each other.
pub fn spawn_fighters(
    world: &mut World,
    config: &MatchConfig,
    archetypes: [Arc<Archetype>; 2],
) -> [Entity; 2] {
    let [p1_x, p2_x] = config.spawn_x;
    let ground = config.stage.ground_level;
    let p1 = Fighter::new(
        PlayerSlot::One,
        &archetypes[0],
        Vec2::new(config.stage.clamp_x(p1_x, archetypes[0].half_width()), ground),
        Facing::toward(p1_x, p2_x),
        config.starting_meter,
    );
    let p2 = Fighter::new(
        PlayerSlot::Two,
        &archetypes[1],
        Vec2::new(config.stage.clamp_x(p2_x, archetypes[1].half_width()), ground),
        Facing::toward(p2_x, p1_x),
        config.starting_meter,
    );
    spawn_pair(world, [p1, p2], archetypes)
}

/// Spawn two existing fighters and link them as opponents.
pub fn spawn_pair(
    world: &mut World,
    fighters: [Fighter; 2],
    archetypes: [Arc<Archetype>; 2],
) -> [Entity; 2] {
    let [f1, f2] = fighters;
    let [a1, a2] = archetypes;
    let e1 = world.reserve_entity();
    let e2 = world.reserve_entity();
    world.spawn_at(e1, (f1, ArchetypeRef(a1), Opponent(e2)));
    world.spawn_at(e2, (f2, ArchetypeRef(a2), Opponent(e1)));
    [e1, e2]
}
