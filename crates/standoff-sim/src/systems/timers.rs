//! Timer system: cooldowns, guard window, hit-stun expiry, passive meter, combo window.

use hecs::World;

use standoff_core::archetype::Archetype;

use crate::engine::StageConfig;
use crate::fighter::{ArchetypeRef, ComboState, Fighter};

pub fn run(world: &mut World, stage: &StageConfig) {
    for (_entity, (fighter, archetype)) in world.query_mut::<(&mut Fighter, &ArchetypeRef)>() {
        tick_fighter(fighter, &archetype.0, stage);
    }
}

pub fn tick_fighter(fighter: &mut Fighter, archetype: &Archetype, stage: &StageConfig) {
    let timers = &mut fighter.timers;
    timers.dash_cooldown = timers.dash_cooldown.saturating_sub(1);
    timers.combo_cooldown = timers.combo_cooldown.saturating_sub(1);
    timers.block_timer = timers.block_timer.saturating_sub(1);
    for cooldown in &mut timers.attack_cooldown {
        *cooldown = cooldown.saturating_sub(1);
    }

    if fighter.timers.hit_cooldown > 0 {
        fighter.timers.hit_cooldown -= 1;
        if fighter.timers.hit_cooldown == 0 {
            fighter.recover(archetype, stage);
        }
    }

    if fighter.stand.is_none() {
        fighter.gain_meter(archetype, archetype.meter.passive_gain);
    }

    if fighter.timers.combo_timer > 0 {
        fighter.timers.combo_timer -= 1;
        if fighter.timers.combo_timer == 0 {
            fighter.combo = ComboState::default();
        }
    }
}
