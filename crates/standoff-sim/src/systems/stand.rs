//! Stand system: every summoned Stand follows its owner, mirrors the owner's
//! movement, and plays out its summon and attack clips.

use hecs::World;

use standoff_core::archetype::Archetype;
use standoff_core::enums::{AttackForm, StandAction};

use crate::animation::{advance, Gate, Step};
use crate::engine::StageConfig;
use crate::fighter::{ArchetypeRef, AttackState, Fighter};
use crate::stand::Stand;

pub fn run(world: &mut World, stage: &StageConfig) {
    for (_entity, (fighter, archetype)) in world.query_mut::<(&mut Fighter, &ArchetypeRef)>() {
        update(fighter, &archetype.0, stage);
    }
}

pub fn update(fighter: &mut Fighter, archetype: &Archetype, stage: &StageConfig) {
    let owner_action = fighter.action;
    let guarding = fighter.is_guarding();
    let gate = Gate {
        jump_loop: archetype.stand.jump_loop,
        airborne: stage.is_airborne(fighter.position.y),
        grounded: fighter.is_grounded(stage),
        ..Gate::default()
    };
    let profile = &archetype.stand;
    let Some(stand) = fighter.stand.as_mut() else {
        return;
    };
    stand.follow(profile, fighter.position, fighter.facing);

    let mut attack_ended = false;
    if let Some(attack) = stand.attack.as_mut() {
        attack.timer = attack.timer.saturating_sub(1);
        if attack.timer == 0 {
            stand.end_attack(profile);
            attack_ended = true;
        }
    }

    if !stand.summoning && !stand.is_attacking() {
        let mirrored = Stand::mirror_action(owner_action, guarding);
        if !stand.set_action(profile, mirrored) {
            stand.set_action(profile, StandAction::Idle);
        }
    }

    if let Some(clip) = profile.clip(stand.action) {
        let step = advance(
            clip,
            stand.action.playback(),
            &mut stand.frame,
            &mut stand.hold,
            &gate,
        );
        if step == Step::Complete {
            if stand.action == StandAction::Summon {
                stand.summoning = false;
                stand.set_action(profile, StandAction::Idle);
            } else if stand.action.is_attack() && stand.is_attacking() {
                stand.end_attack(profile);
                attack_ended = true;
            }
        }
    }

    // The owner's stance lasts exactly as long as the Stand's attack.
    let stand_stance = matches!(
        fighter.attack_state(),
        Some(AttackState {
            form: AttackForm::Stand,
            ..
        })
    );
    if attack_ended && stand_stance {
        fighter.go_idle(archetype);
    }
}
