//! Authored archetype definitions and their compilation into [`Archetype`].
//!
//! Definitions mirror the data files: action tables keyed by name, frames as
//! `(start, end)` tuples. `compile` resolves every name against the closed
//! action enums and checks the frame data, so a fighter built from a compiled
//! archetype never meets a missing action at runtime.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use standoff_core::archetype::{
    ActionClip, Archetype, AttackSpec, MeterStats, MovementStats, StandProfile,
};
use standoff_core::enums::{ActionKind, AttackSlot, StandAction};
use standoff_core::error::{ConfigError, Result};
use standoff_core::types::{FrameRange, Vec2};

/// `((first_frame, last_frame), ticks_per_frame)`
pub type ClipDef = ((u16, u16), u16);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeDef {
    pub id: String,
    pub display_name: String,
    pub health: i32,
    pub hurtbox: (f64, f64),
    pub actions: BTreeMap<String, ClipDef>,
    #[serde(default)]
    pub jump_loop: Option<(u16, u16)>,
    #[serde(default)]
    pub crouch_freeze_frame: Option<u16>,
    pub combo_window: u32,
    pub movement: MovementDef,
    pub meter: MeterDef,
    pub attacks: BTreeMap<String, AttackDef>,
    pub stand: StandDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementDef {
    pub move_speed: f64,
    pub jump_speed: f64,
    pub dash_speed: f64,
    pub dash_distance: f64,
    pub dash_cooldown: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterDef {
    pub max: f64,
    pub summon_cost: f64,
    pub block_drain: f64,
    pub block_drain_no_stand: f64,
    #[serde(default)]
    pub damage_drain: f64,
    #[serde(default)]
    pub damage_drain_no_stand: f64,
    pub gain_on_hit: f64,
    pub gain_on_block: f64,
    pub gain_on_attack: f64,
    pub passive_gain: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackDef {
    pub damage: i32,
    pub knockback: f64,
    pub hitbox: (f64, f64),
    pub offset: (f64, f64),
    pub active_frames: (u16, u16),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandDef {
    pub display_name: String,
    pub actions: BTreeMap<String, ClipDef>,
    #[serde(default)]
    pub jump_loop: Option<(u16, u16)>,
    pub offset: (f64, f64),
}

impl ArchetypeDef {
    /// Validate the definition and build the runtime archetype.
    pub fn compile(&self) -> Result<Archetype> {
        let id = self.id.as_str();

        if self.health <= 0 {
            return Err(invalid(id, "health must be positive"));
        }
        if self.hurtbox.0 <= 0.0 || self.hurtbox.1 <= 0.0 {
            return Err(invalid(id, "hurtbox must have positive size"));
        }

        let clips = compile_clips(id, &self.actions, ActionKind::from_name)?;
        for action in ActionKind::ALL {
            if !action.is_optional() && !clips.contains_key(&action) {
                return Err(ConfigError::MissingAction {
                    archetype: id.to_string(),
                    action: action.name(),
                });
            }
        }

        let stand_clips = compile_clips(id, &self.stand.actions, StandAction::from_name)?;
        for action in StandAction::ALL {
            if !action.is_optional() && !stand_clips.contains_key(&action) {
                return Err(ConfigError::MissingAction {
                    archetype: id.to_string(),
                    action: action.name(),
                });
            }
        }

        for name in self.attacks.keys() {
            if attack_key_slot(name).is_none() {
                return Err(ConfigError::UnknownAction {
                    archetype: id.to_string(),
                    name: name.clone(),
                });
            }
        }

        let attacks = compile_attacks(id, &self.attacks, "owner", "attack", |slot| {
            clips[&ActionKind::attack(slot)].frames
        })?;
        let stand_attacks = compile_attacks(id, &self.attacks, "stand", "stand_attack", |slot| {
            stand_clips[&StandAction::attack(slot)].frames
        })?;

        let jump_frames = clips[&ActionKind::Jump].frames;
        let jump_loop = compile_sub_range(id, "jump_loop", self.jump_loop, jump_frames)?;
        let stand_jump_frames = stand_clips[&StandAction::Jump].frames;
        let stand_jump_loop =
            compile_sub_range(id, "stand.jump_loop", self.stand.jump_loop, stand_jump_frames)?;

        // A freeze frame outside the crouch clip falls back to its midpoint.
        let crouch = clips[&ActionKind::Crouch].frames;
        let crouch_freeze_frame = match self.crouch_freeze_frame {
            Some(frame) if crouch.contains(frame) => frame,
            _ => (crouch.start + crouch.end) / 2,
        };

        let meter = self.meter.compile(id)?;
        if self.movement.dash_speed <= 0.0 || self.movement.dash_distance < 0.0 {
            return Err(invalid(id, "dash speed must be positive"));
        }

        Ok(Archetype {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            max_health: self.health,
            hurtbox: Vec2::new(self.hurtbox.0, self.hurtbox.1),
            clips,
            attacks,
            stand_attacks,
            movement: MovementStats {
                move_speed: self.movement.move_speed,
                jump_speed: self.movement.jump_speed,
                dash_speed: self.movement.dash_speed,
                dash_distance: self.movement.dash_distance,
                dash_cooldown: self.movement.dash_cooldown,
            },
            meter,
            jump_loop,
            crouch_freeze_frame,
            combo_window: self.combo_window,
            stand: StandProfile {
                display_name: self.stand.display_name.clone(),
                clips: stand_clips,
                jump_loop: stand_jump_loop,
                offset: Vec2::new(self.stand.offset.0, self.stand.offset.1),
            },
        })
    }
}

impl MeterDef {
    fn compile(&self, id: &str) -> Result<MeterStats> {
        let values = [
            self.summon_cost,
            self.block_drain,
            self.block_drain_no_stand,
            self.damage_drain,
            self.damage_drain_no_stand,
            self.gain_on_hit,
            self.gain_on_block,
            self.gain_on_attack,
            self.passive_gain,
        ];
        if self.max <= 0.0 || values.iter().any(|v| *v < 0.0 || !v.is_finite()) {
            return Err(invalid(id, "meter values must be finite and non-negative"));
        }
        if self.summon_cost > self.max {
            return Err(invalid(id, "summon cost exceeds meter capacity"));
        }
        Ok(MeterStats {
            max: self.max,
            summon_cost: self.summon_cost,
            block_drain: self.block_drain,
            block_drain_no_stand: self.block_drain_no_stand,
            damage_drain: self.damage_drain,
            damage_drain_no_stand: self.damage_drain_no_stand,
            gain_on_hit: self.gain_on_hit,
            gain_on_block: self.gain_on_block,
            gain_on_attack: self.gain_on_attack,
            passive_gain: self.passive_gain,
        })
    }
}

fn invalid(id: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        archetype: id.to_string(),
        message: message.to_string(),
    }
}

fn compile_clips<K: Ord>(
    id: &str,
    table: &BTreeMap<String, ClipDef>,
    parse: impl Fn(&str) -> Option<K>,
) -> Result<BTreeMap<K, ActionClip>> {
    let mut clips = BTreeMap::new();
    for (name, &((start, end), speed)) in table {
        let Some(action) = parse(name) else {
            return Err(ConfigError::UnknownAction {
                archetype: id.to_string(),
                name: name.clone(),
            });
        };
        if end < start {
            return Err(ConfigError::InvalidFrameRange {
                archetype: id.to_string(),
                what: name.clone(),
                start,
                end,
            });
        }
        if speed == 0 {
            return Err(ConfigError::ZeroSpeed {
                archetype: id.to_string(),
                action: name.clone(),
            });
        }
        clips.insert(
            action,
            ActionClip {
                frames: FrameRange::new(start, end),
                speed,
            },
        );
    }
    Ok(clips)
}

/// Slot named by an attack table key such as `attack2` or `stand_attack3`.
fn attack_key_slot(name: &str) -> Option<AttackSlot> {
    let digits = name
        .strip_prefix("stand_attack")
        .or_else(|| name.strip_prefix("attack"))?;
    digits.parse::<u8>().ok().and_then(AttackSlot::from_number)
}

fn compile_attacks(
    id: &str,
    table: &BTreeMap<String, AttackDef>,
    form: &'static str,
    prefix: &str,
    clip_frames: impl Fn(AttackSlot) -> FrameRange,
) -> Result<[AttackSpec; 3]> {
    let mut specs = Vec::with_capacity(3);
    for slot in AttackSlot::ALL {
        let key = format!("{prefix}{}", slot.number());
        let def = table.get(&key).ok_or_else(|| ConfigError::MissingAttack {
            archetype: id.to_string(),
            form,
            slot,
        })?;
        let (start, end) = def.active_frames;
        let frames = clip_frames(slot);
        if end < start || !frames.contains(start) || !frames.contains(end) {
            return Err(ConfigError::InvalidFrameRange {
                archetype: id.to_string(),
                what: format!("{key}.active_frames"),
                start,
                end,
            });
        }
        if def.damage < 0 || def.hitbox.0 <= 0.0 || def.hitbox.1 <= 0.0 {
            return Err(invalid(id, &format!("{key} needs non-negative damage and a hitbox")));
        }
        specs.push(AttackSpec {
            damage: def.damage,
            knockback: def.knockback,
            hitbox: Vec2::new(def.hitbox.0, def.hitbox.1),
            offset: Vec2::new(def.offset.0, def.offset.1),
            active: FrameRange::new(start, end),
        });
    }
    Ok([specs[0], specs[1], specs[2]])
}

fn compile_sub_range(
    id: &str,
    what: &str,
    range: Option<(u16, u16)>,
    within: FrameRange,
) -> Result<Option<FrameRange>> {
    match range {
        None => Ok(None),
        Some((start, end)) if start <= end && within.contains(start) && within.contains(end) => {
            Ok(Some(FrameRange::new(start, end)))
        }
        Some((start, end)) => Err(ConfigError::InvalidFrameRange {
            archetype: id.to_string(),
            what: what.to_string(),
            start,
            end,
        }),
    }
}
