//! Combat system: hit detection and resolution.
//!
//! Both fighters are checked against the state at the start of the pass and
//! only then resolved, so two attacks landing on the same tick trade.

use hecs::{Entity, World};
use tracing::{debug, info};

use standoff_core::archetype::Archetype;
use standoff_core::enums::{AttackForm, PlayerSlot};
use standoff_core::events::CombatEvent;

use crate::engine::StageConfig;
use crate::fighter::{Activity, ArchetypeRef, Fighter};
use crate::systems::locomotion::clamp_to_stage;

/// A hit found during detection, waiting to be applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitCheck {
    pub form: AttackForm,
    pub damage: i32,
    /// Signed push along the attacker's frozen facing.
    pub knockback: f64,
}

/// Whether the attacker's current attack connects with the defender this tick.
pub fn resolve_hit(
    attacker: &Fighter,
    archetype: &Archetype,
    defender: &Fighter,
    defender_archetype: &Archetype,
) -> Option<HitCheck> {
    let attack = attacker.attack_state()?;
    let frame = match attack.form {
        AttackForm::Owner => {
            if attack.landed {
                return None;
            }
            attacker.frame
        }
        AttackForm::Stand => {
            let stand = attacker.stand.as_ref()?;
            match stand.attack {
                Some(stand_attack) if !stand_attack.landed => stand.frame,
                _ => return None,
            }
        }
    };
    let spec = archetype.attack(attack.form, attack.slot);
    if !spec.active.contains(frame) || defender.timers.hit_cooldown > 0 {
        return None;
    }
    let hitbox = spec.hitbox_at(attacker.position, attack.facing);
    let hurtbox = defender_archetype.hurtbox_at(defender.position);
    if !hitbox.overlaps(&hurtbox) {
        return None;
    }
    Some(HitCheck {
        form: attack.form,
        damage: spec.damage,
        knockback: spec.knockback * attack.facing.sign(),
    })
}

pub fn run(
    world: &mut World,
    fighters: &[Entity; 2],
    stage: &StageConfig,
    events: &mut Vec<CombatEvent>,
) {
    let mut hits: Vec<(usize, HitCheck)> = Vec::with_capacity(2);
    for (index, &attacker) in fighters.iter().enumerate() {
        let defender = fighters[1 - index];
        let check = {
            let (Ok(a), Ok(a_arch), Ok(d), Ok(d_arch)) = (
                world.get::<&Fighter>(attacker),
                world.get::<&ArchetypeRef>(attacker),
                world.get::<&Fighter>(defender),
                world.get::<&ArchetypeRef>(defender),
            ) else {
                continue;
            };
            resolve_hit(&a, &a_arch.0, &d, &d_arch.0)
        };
        if let Some(check) = check {
            hits.push((index, check));
        }
    }

    for (index, check) in hits {
        apply_hit(world, fighters[index], fighters[1 - index], check, stage, events);
    }
}

fn apply_hit(
    world: &mut World,
    attacker: Entity,
    defender: Entity,
    check: HitCheck,
    stage: &StageConfig,
    events: &mut Vec<CombatEvent>,
) {
    let (attacker_slot, combo) = {
        let Ok(mut fighter) = world.get::<&mut Fighter>(attacker) else {
            return;
        };
        match check.form {
            AttackForm::Owner => {
                if let Activity::Attacking(attack) = &mut fighter.activity {
                    attack.landed = true;
                }
            }
            AttackForm::Stand => {
                if let Some(stand_attack) = fighter.stand.as_mut().and_then(|s| s.attack.as_mut())
                {
                    stand_attack.landed = true;
                }
            }
        }
        fighter.combo.connected = true;
        (fighter.slot, fighter.combo.counter)
    };

    let Ok(archetype) = world.get::<&ArchetypeRef>(defender).map(|a| a.0.clone()) else {
        return;
    };
    let Ok(mut fighter) = world.get::<&mut Fighter>(defender) else {
        return;
    };
    let Some(outcome) = fighter.take_damage(&archetype, check.damage, check.knockback) else {
        return;
    };
    clamp_to_stage(&mut fighter, &archetype, stage);
    let defender_slot: PlayerSlot = fighter.slot;

    events.push(CombatEvent::Hit {
        attacker: attacker_slot,
        defender: defender_slot,
        damage: outcome.damage,
        form: check.form,
    });
    if outcome.guarded {
        events.push(CombatEvent::Block {
            defender: defender_slot,
        });
    }
    if outcome.stand_broken {
        events.push(CombatEvent::StandDismissed {
            fighter: defender_slot,
            forced: true,
        });
        info!(slot = ?defender_slot, "stand broken");
    }
    if combo > 1 {
        events.push(CombatEvent::Combo {
            fighter: attacker_slot,
            count: combo,
        });
    }
    debug!(
        attacker = ?attacker_slot,
        defender = ?defender_slot,
        damage = outcome.damage,
        guarded = outcome.guarded,
        health = fighter.health,
        "hit resolved"
    );
}
