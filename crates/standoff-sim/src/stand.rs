//! The Stand: a companion owned by a fighter while summoned.
//!
//! A Stand has no body of its own. Its position is re-derived from the owner
//! every tick, and it only decides which of its clips to show and whether its
//! attack is still live.

use serde::{Deserialize, Serialize};

use standoff_core::archetype::StandProfile;
use standoff_core::enums::{ActionKind, AttackSlot, StandAction};
use standoff_core::types::{Facing, Vec2};

/// A Stand attack in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandAttack {
    pub slot: AttackSlot,
    /// Ticks left before the attack ends even if the clip has not finished.
    pub timer: u32,
    /// Set once the attack has connected.
    pub landed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stand {
    pub position: Vec2,
    pub facing: Facing,
    pub action: StandAction,
    pub frame: u16,
    pub hold: u16,
    pub summoning: bool,
    pub attack: Option<StandAttack>,
}

impl Stand {
    /// A freshly summoned Stand playing its entrance.
    pub fn summon(profile: &StandProfile, owner_position: Vec2, owner_facing: Facing) -> Self {
        let mut stand = Self {
            position: owner_position,
            facing: owner_facing,
            action: StandAction::Idle,
            frame: 0,
            hold: 0,
            summoning: false,
            attack: None,
        };
        stand.follow(profile, owner_position, owner_facing);
        if stand.set_action(profile, StandAction::Summon) {
            stand.summoning = true;
        } else {
            stand.set_action(profile, StandAction::Idle);
        }
        stand
    }

    /// Place the Stand relative to its owner.
    pub fn follow(&mut self, profile: &StandProfile, owner_position: Vec2, owner_facing: Facing) {
        self.position = Vec2::new(
            owner_position.x + profile.offset.x * owner_facing.sign(),
            owner_position.y + profile.offset.y,
        );
        self.facing = owner_facing;
    }

    /// Switch clips. Re-requesting the current clip keeps its cursor.
    pub fn set_action(&mut self, profile: &StandProfile, action: StandAction) -> bool {
        let Some(clip) = profile.clip(action) else {
            return false;
        };
        if action != self.action {
            self.action = action;
            self.frame = clip.frames.start;
            self.hold = 0;
        }
        true
    }

    pub fn start_attack(&mut self, profile: &StandProfile, slot: AttackSlot) {
        let action = StandAction::attack(slot);
        let timer = profile.clip(action).map_or(0, |clip| clip.duration_ticks());
        self.summoning = false;
        // Restart even when the same slot is thrown twice in a row.
        self.action = StandAction::Idle;
        self.set_action(profile, action);
        self.attack = Some(StandAttack {
            slot,
            timer,
            landed: false,
        });
    }

    /// Drop the current attack and return to idle.
    pub fn end_attack(&mut self, profile: &StandProfile) {
        self.attack = None;
        self.set_action(profile, StandAction::Idle);
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.is_some()
    }

    /// Clip that mirrors what the owner is doing.
    pub fn mirror_action(owner_action: ActionKind, guarding: bool) -> StandAction {
        if guarding {
            return StandAction::Block;
        }
        match owner_action {
            ActionKind::WalkForward => StandAction::MoveForward,
            ActionKind::WalkBackward => StandAction::MoveBackward,
            ActionKind::Jump => StandAction::Jump,
            ActionKind::DashForward => StandAction::DashForward,
            ActionKind::DashBackward => StandAction::DashBackward,
            _ => StandAction::Idle,
        }
    }
}
