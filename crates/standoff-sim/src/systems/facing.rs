//! Facing system: fighters turn toward their opponent when free to.

use hecs::{Entity, World};

use standoff_core::types::Facing;

use crate::fighter::{Activity, Fighter, Opponent};

pub fn run(world: &mut World) {
    let pairs: Vec<(Entity, f64)> = world
        .query::<(&Fighter, &Opponent)>()
        .iter()
        .filter_map(|(entity, (_, opponent))| {
            let x = world.get::<&Fighter>(opponent.0).ok()?.position.x;
            Some((entity, x))
        })
        .collect();

    for (entity, opponent_x) in pairs {
        let Ok(mut fighter) = world.get::<&mut Fighter>(entity) else {
            continue;
        };
        if can_turn(&fighter.activity) && fighter.position.x != opponent_x {
            fighter.facing = Facing::toward(fighter.position.x, opponent_x);
        }
    }
}

/// Attacks, dashes and the guard lock the facing in place.
fn can_turn(activity: &Activity) -> bool {
    matches!(
        activity,
        Activity::Idle
            | Activity::Walking
            | Activity::Airborne { .. }
            | Activity::Summoning
            | Activity::HitStun { guarding: false }
    )
}
