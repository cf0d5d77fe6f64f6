//! Animation system: advances each fighter's frame cursor and reacts to clip
//! completion.

use hecs::World;

use standoff_core::archetype::Archetype;
use standoff_core::enums::ActionKind;

use crate::animation::{advance, Gate, Step};
use crate::engine::StageConfig;
use crate::fighter::{Activity, ArchetypeRef, Fighter};

pub fn run(world: &mut World, stage: &StageConfig) {
    for (_entity, (fighter, archetype)) in world.query_mut::<(&mut Fighter, &ArchetypeRef)>() {
        advance_fighter(fighter, &archetype.0, stage);
    }
}

pub fn advance_fighter(fighter: &mut Fighter, archetype: &Archetype, stage: &StageConfig) {
    let Some(clip) = archetype.clip(fighter.action) else {
        return;
    };
    let gate = Gate {
        jump_loop: archetype.jump_loop,
        airborne: stage.is_airborne(fighter.position.y),
        grounded: fighter.is_grounded(stage),
        freeze_frame: Some(archetype.crouch_freeze_frame),
        held: fighter.is_crouching(),
    };
    let step = advance(
        clip,
        fighter.action.playback(),
        &mut fighter.frame,
        &mut fighter.hold,
        &gate,
    );
    if step == Step::Complete {
        on_complete(fighter, archetype);
    }
}

fn on_complete(fighter: &mut Fighter, archetype: &Archetype) {
    match (fighter.action, fighter.activity) {
        (ActionKind::Attack1 | ActionKind::Attack2 | ActionKind::Attack3, Activity::Attacking(_))
        | (ActionKind::StandSummon, Activity::Summoning)
        | (ActionKind::Jump, Activity::Airborne { .. }) => fighter.go_idle(archetype),
        (ActionKind::DashForward | ActionKind::DashBackward, _) => fighter.end_dash(archetype),
        (ActionKind::Crouch, Activity::CrouchRelease) => fighter.go_idle(archetype),
        // Crouch clip ran out during hit-stun.
        (ActionKind::Crouch, _) if !fighter.is_crouching() && !fighter.is_scripted() => {
            fighter.play(archetype, ActionKind::Idle);
        }
        _ => {}
    }
}
