//! Locomotion system: knockback, walking, dash interpolation, gravity, and
//! stage bounds.

use hecs::World;

use standoff_core::archetype::Archetype;
use standoff_core::constants::{GRAVITY, KNOCKBACK_DECAY};

use crate::engine::StageConfig;
use crate::fighter::{Activity, ArchetypeRef, Fighter};

pub fn run(world: &mut World, stage: &StageConfig) {
    for (_entity, (fighter, archetype)) in world.query_mut::<(&mut Fighter, &ArchetypeRef)>() {
        step(fighter, &archetype.0, stage);
    }
}

/// Integrate one fighter for one tick.
pub fn step(fighter: &mut Fighter, archetype: &Archetype, stage: &StageConfig) {
    if fighter.knockback.timer > 0 {
        fighter.knockback.timer -= 1;
        fighter.position.x += fighter.knockback.velocity;
        fighter.knockback.velocity *= KNOCKBACK_DECAY;
    }

    match fighter.activity {
        Activity::Dashing { target_x } => {
            let speed = archetype.movement.dash_speed;
            let distance = target_x - fighter.position.x;
            if distance.abs() > speed {
                fighter.position.x += speed * distance.signum();
            } else {
                fighter.position.x = target_x;
            }
        }
        Activity::Walking | Activity::Airborne { .. } => {
            fighter.position.x += fighter.velocity.x;
        }
        _ => {}
    }

    // Dashes travel flat and a crouch is planted.
    if !matches!(
        fighter.activity,
        Activity::Dashing { .. } | Activity::Crouching | Activity::CrouchRelease
    ) {
        fighter.velocity.y -= GRAVITY;
    }
    fighter.position.y += fighter.velocity.y;

    if fighter.position.y <= stage.ground_level {
        fighter.position.y = stage.ground_level;
        fighter.velocity.y = 0.0;
        if matches!(fighter.activity, Activity::Airborne { .. }) {
            // Without a loop segment there are no landing frames to play.
            if archetype.jump_loop.is_none() {
                fighter.go_idle(archetype);
            } else {
                fighter.activity = Activity::Airborne {
                    double_jump_used: false,
                };
            }
        }
    }

    clamp_to_stage(fighter, archetype, stage);
}

/// Keep the hurtbox inside the stage. Touching a side wall ends a dash.
pub fn clamp_to_stage(fighter: &mut Fighter, archetype: &Archetype, stage: &StageConfig) {
    let half_width = archetype.half_width();
    let min_x = half_width;
    let max_x = stage.width - half_width;
    let at_wall = if fighter.position.x <= min_x {
        fighter.position.x = min_x;
        true
    } else if fighter.position.x >= max_x {
        fighter.position.x = max_x;
        true
    } else {
        false
    };
    if at_wall {
        fighter.end_dash(archetype);
    }

    let top = stage.height - archetype.half_height();
    if fighter.position.y > top {
        fighter.position.y = top;
        fighter.velocity.y = fighter.velocity.y.min(0.0);
    }
}
