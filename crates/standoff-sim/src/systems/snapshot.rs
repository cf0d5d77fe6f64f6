//! Snapshot system: builds the render-facing `MatchSnapshot`.
//!
//! Read-only; never modifies the world.

use hecs::{Entity, World};

use standoff_core::enums::MatchPhase;
use standoff_core::events::CombatEvent;
use standoff_core::state::{FighterView, MatchSnapshot, StandView};
use standoff_core::types::SimTime;

use crate::fighter::{ArchetypeRef, Fighter};

pub fn build_snapshot(
    world: &World,
    fighters: &[Entity; 2],
    time: SimTime,
    phase: MatchPhase,
    events: Vec<CombatEvent>,
) -> MatchSnapshot {
    MatchSnapshot {
        time,
        phase,
        fighters: fighters
            .iter()
            .filter_map(|&entity| fighter_view(world, entity))
            .collect(),
        events,
    }
}

fn fighter_view(world: &World, entity: Entity) -> Option<FighterView> {
    let fighter = world.get::<&Fighter>(entity).ok()?;
    let archetype = world.get::<&ArchetypeRef>(entity).ok()?;
    Some(FighterView {
        slot: fighter.slot,
        archetype: fighter.archetype.clone(),
        position: fighter.position,
        facing: fighter.facing,
        health: fighter.health,
        max_health: archetype.0.max_health,
        stand_meter: fighter.meter,
        stand_meter_max: archetype.0.meter.max,
        action: fighter.action,
        frame: fighter.frame,
        combo_counter: fighter.combo.counter,
        guarding: fighter.is_guarding(),
        stand: fighter.stand.as_ref().map(|stand| StandView {
            position: stand.position,
            facing: stand.facing,
            action: stand.action,
            frame: stand.frame,
        }),
    })
}
