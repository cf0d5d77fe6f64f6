//! Compiled archetype: the immutable per-character definition the simulation reads.
//!
//! Archetypes are authored as data (see `standoff-roster`) with string-keyed
//! action tables. Compilation turns those into the enum-keyed tables below, so a
//! missing or misspelled action is a load-time error instead of a runtime lookup miss.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{ActionKind, AttackForm, AttackSlot, StandAction};
use crate::types::{Aabb, Facing, FrameRange, Vec2};

/// Frame range plus playback speed (ticks per frame) for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionClip {
    pub frames: FrameRange,
    pub speed: u16,
}

impl ActionClip {
    /// Ticks needed to play every frame once.
    pub fn duration_ticks(&self) -> u32 {
        self.frames.len() * u32::from(self.speed)
    }
}

/// Damage and geometry of one attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackSpec {
    pub damage: i32,
    pub knockback: f64,
    /// Hitbox width and height.
    pub hitbox: Vec2,
    /// Hitbox center relative to the attacker, x measured along its facing.
    pub offset: Vec2,
    /// Frames during which the hitbox is live.
    pub active: FrameRange,
}

impl AttackSpec {
    /// Hitbox in stage space for an attacker at `origin` facing `facing`.
    pub fn hitbox_at(&self, origin: Vec2, facing: Facing) -> Aabb {
        let center = Vec2::new(
            origin.x + self.offset.x * facing.sign(),
            origin.y + self.offset.y,
        );
        Aabb::from_center(center, self.hitbox)
    }
}

/// Locomotion constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementStats {
    pub move_speed: f64,
    pub jump_speed: f64,
    pub dash_speed: f64,
    pub dash_distance: f64,
    pub dash_cooldown: u32,
}

/// Stand-meter economy constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeterStats {
    pub max: f64,
    pub summon_cost: f64,
    pub block_drain: f64,
    pub block_drain_no_stand: f64,
    pub damage_drain: f64,
    pub damage_drain_no_stand: f64,
    pub gain_on_hit: f64,
    pub gain_on_block: f64,
    pub gain_on_attack: f64,
    pub passive_gain: f64,
}

/// The companion summoned by a fighter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandProfile {
    pub display_name: String,
    pub clips: BTreeMap<StandAction, ActionClip>,
    pub jump_loop: Option<FrameRange>,
    /// Position relative to the owner, x measured along the owner's facing.
    pub offset: Vec2,
}

impl StandProfile {
    pub fn clip(&self, action: StandAction) -> Option<&ActionClip> {
        self.clips.get(&action)
    }
}

/// Immutable character definition shared by every fighter of that type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub id: String,
    pub display_name: String,
    pub max_health: i32,
    /// Fixed damage-receiving box, centered on the fighter.
    pub hurtbox: Vec2,
    pub clips: BTreeMap<ActionKind, ActionClip>,
    pub attacks: [AttackSpec; 3],
    pub stand_attacks: [AttackSpec; 3],
    pub movement: MovementStats,
    pub meter: MeterStats,
    pub jump_loop: Option<FrameRange>,
    /// Frame the crouch animation freezes on while held.
    pub crouch_freeze_frame: u16,
    /// Combo window in ticks.
    pub combo_window: u32,
    pub stand: StandProfile,
}

impl Archetype {
    pub fn clip(&self, action: ActionKind) -> Option<&ActionClip> {
        self.clips.get(&action)
    }

    pub fn has_action(&self, action: ActionKind) -> bool {
        self.clips.contains_key(&action)
    }

    pub fn attack(&self, form: AttackForm, slot: AttackSlot) -> &AttackSpec {
        match form {
            AttackForm::Owner => &self.attacks[slot.index()],
            AttackForm::Stand => &self.stand_attacks[slot.index()],
        }
    }

    /// Hurtbox in stage space for a fighter centered at `position`.
    pub fn hurtbox_at(&self, position: Vec2) -> Aabb {
        Aabb::from_center(position, self.hurtbox)
    }

    pub fn half_width(&self) -> f64 {
        self.hurtbox.x * 0.5
    }

    pub fn half_height(&self) -> f64 {
        self.hurtbox.y * 0.5
    }
}
