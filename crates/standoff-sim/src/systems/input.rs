//! Input system: turns each fighter's intent into ability calls.

use hecs::{Entity, World};

use standoff_core::archetype::Archetype;
use standoff_core::commands::InputIntent;
use standoff_core::events::CombatEvent;

use crate::engine::StageConfig;
use crate::fighter::{ArchetypeRef, Fighter};

/// Apply intents in player-slot order.
pub fn run(
    world: &mut World,
    fighters: &[Entity; 2],
    inputs: &[InputIntent; 2],
    stage: &StageConfig,
    events: &mut Vec<CombatEvent>,
) {
    for (&entity, intent) in fighters.iter().zip(inputs) {
        let Ok(archetype) = world.get::<&ArchetypeRef>(entity).map(|a| a.0.clone()) else {
            continue;
        };
        if let Ok(mut fighter) = world.get::<&mut Fighter>(entity) {
            apply_intent(&mut fighter, &archetype, intent, stage, events);
        }
    }
}

/// Edge-triggered abilities first, then held movement.
pub fn apply_intent(
    fighter: &mut Fighter,
    archetype: &Archetype,
    intent: &InputIntent,
    stage: &StageConfig,
    events: &mut Vec<CombatEvent>,
) {
    if fighter.is_scripted() {
        return;
    }
    let direction = intent.horizontal();

    if intent.crouch_held {
        fighter.hold_guard();
        // A held crouch also re-enters as soon as the fighter is free again.
        if !fighter.is_crouching() && (intent.crouch_edge || fighter.can_crouch(stage)) {
            fighter.crouch(archetype, true, stage);
        }
    } else if fighter.is_crouching() {
        fighter.crouch(archetype, false, stage);
    }

    if intent.stand_toggle_edge {
        fighter.toggle_stand(archetype, events);
    }
    if intent.dash_edge {
        fighter.dash(archetype, (direction != 0).then_some(direction), stage, events);
    }
    if intent.jump_edge {
        fighter.jump(archetype, stage, events);
    }
    if let Some(slot) = intent.attack_pressed() {
        fighter.attack(archetype, slot);
    }
    fighter.walk(archetype, direction, stage);
}
