//! Fighter component: one combatant's mutable state and its transition rules.
//!
//! Ability calls (`jump`, `crouch`, `dash`, `toggle_stand`, `attack`) return
//! `false` and leave the fighter untouched when the current activity forbids
//! them. The archetype is passed in rather than stored so the component stays
//! plain serializable data; the engine keeps the shared archetype beside it in
//! an [`ArchetypeRef`].

use std::sync::Arc;

use hecs::Entity;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use standoff_core::archetype::Archetype;
use standoff_core::constants::{
    ATTACK_COOLDOWN, BLOCK_DURATION, CHIP_GUARD_FACTOR, COMBO_BREAK_COOLDOWN, GUARD_PUSH_FACTOR,
    HIT_COOLDOWN, KNOCKBACK_DURATION, MAX_COMBO,
};
use standoff_core::enums::{ActionKind, AttackForm, AttackSlot, PlayerSlot};
use standoff_core::events::CombatEvent;
use standoff_core::types::{Facing, Vec2};

use crate::engine::StageConfig;
use crate::stand::Stand;

/// Archetype shared by every fighter of that type.
#[derive(Debug, Clone)]
pub struct ArchetypeRef(pub Arc<Archetype>);

/// Handle to the other fighter. Never owns it.
#[derive(Debug, Clone, Copy)]
pub struct Opponent(pub Entity);

/// An attack in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackState {
    pub slot: AttackSlot,
    pub form: AttackForm,
    /// Facing when the attack started; the hitbox follows it, not the live facing.
    pub facing: Facing,
    /// Owner-form hit latch. Stand-form attacks latch on the Stand.
    pub landed: bool,
}

/// What the fighter is doing. Exactly one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Activity {
    #[default]
    Idle,
    Walking,
    Airborne {
        double_jump_used: bool,
    },
    /// Crouched with the guard up while the button is held.
    Crouching,
    /// Crouch released. Only `Idle` may follow, once the exit frames finish.
    CrouchRelease,
    Summoning,
    Dashing {
        target_x: f64,
    },
    Attacking(AttackState),
    /// Stunned after a hit. `guarding` keeps the crouch pose after a chip guard.
    HitStun {
        guarding: bool,
    },
    /// Intro, victory and defeat poses driven by match flow.
    Scripted,
}

/// Countdown timers, in ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timers {
    pub hit_cooldown: u32,
    pub dash_cooldown: u32,
    pub block_timer: u32,
    pub attack_cooldown: [u32; 3],
    pub combo_timer: u32,
    pub combo_cooldown: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComboState {
    /// Stage of the current chain, 0 when no window is open.
    pub counter: u8,
    /// Whether the latest attack of the chain connected.
    pub connected: bool,
}

/// Decaying horizontal push applied after a hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Knockback {
    pub velocity: f64,
    pub timer: u32,
}

/// What `take_damage` did with an incoming hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    /// Health actually removed.
    pub damage: i32,
    pub guarded: bool,
    /// The meter ran dry and took the Stand with it.
    pub stand_broken: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub slot: PlayerSlot,
    pub archetype: String,
    /// Center of the hurtbox in stage space.
    pub position: Vec2,
    /// x is the walking velocity, y the vertical velocity.
    pub velocity: Vec2,
    pub facing: Facing,
    pub health: i32,
    pub meter: f64,
    pub action: ActionKind,
    pub frame: u16,
    /// Ticks spent on the current frame.
    pub hold: u16,
    pub activity: Activity,
    pub timers: Timers,
    pub combo: ComboState,
    pub knockback: Knockback,
    pub stand: Option<Stand>,
}

impl Fighter {
    pub fn new(
        slot: PlayerSlot,
        archetype: &Archetype,
        position: Vec2,
        facing: Facing,
        meter: f64,
    ) -> Self {
        let frame = archetype
            .clip(ActionKind::Idle)
            .map_or(0, |clip| clip.frames.start);
        Self {
            slot,
            archetype: archetype.id.clone(),
            position,
            velocity: Vec2::ZERO,
            facing,
            health: archetype.max_health,
            meter: meter.clamp(0.0, archetype.meter.max),
            action: ActionKind::Idle,
            frame,
            hold: 0,
            activity: Activity::Idle,
            timers: Timers::default(),
            combo: ComboState::default(),
            knockback: Knockback::default(),
            stand: None,
        }
    }

    // --- Queries ---

    pub fn is_grounded(&self, stage: &StageConfig) -> bool {
        self.position.y <= stage.ground_level
    }

    /// Crouched with a live guard window.
    pub fn is_guarding(&self) -> bool {
        matches!(self.activity, Activity::Crouching) && self.timers.block_timer > 0
    }

    /// Holding the crouch pose, guard or chip stun.
    pub fn is_crouching(&self) -> bool {
        matches!(
            self.activity,
            Activity::Crouching | Activity::HitStun { guarding: true }
        )
    }

    pub fn attack_state(&self) -> Option<&AttackState> {
        match &self.activity {
            Activity::Attacking(attack) => Some(attack),
            _ => None,
        }
    }

    pub fn is_scripted(&self) -> bool {
        matches!(self.activity, Activity::Scripted)
    }

    pub fn can_crouch(&self, stage: &StageConfig) -> bool {
        matches!(self.activity, Activity::Idle | Activity::Walking) && self.is_grounded(stage)
    }

    // --- Actions ---

    /// Guarded action change. Scripted actions skip the activity guards; every
    /// request still needs a clip in the archetype.
    pub fn try_set_action(&mut self, archetype: &Archetype, next: ActionKind) -> bool {
        if !archetype.has_action(next) {
            trace!(slot = ?self.slot, action = next.name(), "action not in archetype");
            return false;
        }
        if next == self.action {
            return true;
        }
        if !next.is_scripted() {
            let allowed = match self.activity {
                Activity::Summoning => matches!(next, ActionKind::StandSummon | ActionKind::Idle),
                Activity::Airborne { .. } => matches!(next, ActionKind::Jump | ActionKind::Idle),
                Activity::Dashing { .. } => next.is_dash() || next == ActionKind::Idle,
                Activity::CrouchRelease => matches!(next, ActionKind::Crouch | ActionKind::Idle),
                _ => true,
            };
            if !allowed {
                trace!(
                    slot = ?self.slot,
                    from = self.action.name(),
                    to = next.name(),
                    "action change rejected"
                );
                return false;
            }
        }
        self.play(archetype, next)
    }

    /// Switch clips without guards. The same clip keeps its cursor.
    pub(crate) fn play(&mut self, archetype: &Archetype, action: ActionKind) -> bool {
        if action == self.action {
            return archetype.has_action(action);
        }
        self.restart(archetype, action)
    }

    /// Switch clips and rewind, even when the clip is already playing.
    pub(crate) fn restart(&mut self, archetype: &Archetype, action: ActionKind) -> bool {
        let Some(clip) = archetype.clip(action) else {
            return false;
        };
        self.action = action;
        self.frame = clip.frames.start;
        self.hold = 0;
        if action.is_attack_class() {
            self.velocity.x = 0.0;
        }
        true
    }

    pub(crate) fn go_idle(&mut self, archetype: &Archetype) {
        self.activity = Activity::Idle;
        self.velocity.x = 0.0;
        self.play(archetype, ActionKind::Idle);
    }

    pub(crate) fn end_dash(&mut self, archetype: &Archetype) {
        if matches!(self.activity, Activity::Dashing { .. }) {
            trace!(slot = ?self.slot, x = self.position.x, "dash finished");
            self.go_idle(archetype);
        }
    }

    /// Leave hit-stun once the hit cooldown runs out.
    pub(crate) fn recover(&mut self, archetype: &Archetype, stage: &StageConfig) {
        if !matches!(self.activity, Activity::HitStun { .. }) {
            return;
        }
        if self.is_grounded(stage) {
            // A chip-guard crouch plays out its release before idling.
            if self.action == ActionKind::Crouch {
                self.activity = Activity::CrouchRelease;
            } else {
                self.activity = Activity::Idle;
                self.play(archetype, ActionKind::Idle);
            }
        } else {
            self.activity = Activity::Airborne {
                double_jump_used: true,
            };
            self.play(archetype, ActionKind::Jump);
        }
    }

    /// Match-flow pose. Falls back to `fallback` when the archetype lacks `action`.
    pub fn enter_scripted(
        &mut self,
        archetype: &Archetype,
        action: ActionKind,
        fallback: ActionKind,
    ) -> bool {
        let action = if archetype.has_action(action) {
            action
        } else {
            fallback
        };
        if !archetype.has_action(action) {
            return false;
        }
        self.activity = Activity::Scripted;
        self.velocity.x = 0.0;
        self.restart(archetype, action)
    }

    /// Override from the flow controller. Scripted actions always win and
    /// `Idle` drops whatever the fighter was doing. Gameplay clips are refused:
    /// they only play through the ability that owns them.
    pub fn force_action(&mut self, archetype: &Archetype, action: ActionKind) -> bool {
        if action.is_scripted() {
            return self.enter_scripted(archetype, action, action);
        }
        if action != ActionKind::Idle || !archetype.has_action(action) {
            return false;
        }
        self.go_idle(archetype);
        true
    }

    // --- Meter ---

    pub fn gain_meter(&mut self, archetype: &Archetype, amount: f64) {
        self.meter = (self.meter + amount).clamp(0.0, archetype.meter.max);
    }

    /// Returns true when the drain emptied the meter.
    pub fn drain_meter(&mut self, archetype: &Archetype, amount: f64) -> bool {
        self.meter = (self.meter - amount).clamp(0.0, archetype.meter.max);
        self.meter <= 0.0
    }

    // --- Abilities ---

    /// Apply horizontal intent for this tick.
    pub fn walk(&mut self, archetype: &Archetype, direction: i8, stage: &StageConfig) {
        let speed = archetype.movement.move_speed;
        match self.activity {
            Activity::Idle | Activity::Walking if self.is_grounded(stage) => {
                if direction != 0 {
                    self.velocity.x = f64::from(direction) * speed;
                    self.activity = Activity::Walking;
                    let action = if direction == self.facing.direction() {
                        ActionKind::WalkForward
                    } else {
                        ActionKind::WalkBackward
                    };
                    self.play(archetype, action);
                } else if matches!(self.activity, Activity::Walking) {
                    self.go_idle(archetype);
                }
            }
            Activity::Airborne { .. } => self.velocity.x = f64::from(direction) * speed,
            _ => self.velocity.x = 0.0,
        }
    }

    pub fn jump(
        &mut self,
        archetype: &Archetype,
        stage: &StageConfig,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        let grounded = self.is_grounded(stage);
        let double = match self.activity {
            Activity::Idle | Activity::Walking if grounded => false,
            // Still playing the landing frames.
            Activity::Airborne { .. } if grounded => false,
            Activity::Airborne {
                double_jump_used: false,
            } if self.stand.is_some() => true,
            _ => {
                trace!(slot = ?self.slot, activity = ?self.activity, "jump rejected");
                return false;
            }
        };
        if !archetype.has_action(ActionKind::Jump) {
            return false;
        }
        self.velocity.y = archetype.movement.jump_speed;
        self.activity = Activity::Airborne {
            double_jump_used: double,
        };
        self.restart(archetype, ActionKind::Jump);
        events.push(CombatEvent::Jump {
            fighter: self.slot,
            double,
        });
        debug!(slot = ?self.slot, double, "jump");
        true
    }

    /// Enter (`enter == true`) or release the crouch guard.
    pub fn crouch(&mut self, archetype: &Archetype, enter: bool, stage: &StageConfig) -> bool {
        if enter {
            if !self.can_crouch(stage) || !archetype.has_action(ActionKind::Crouch) {
                trace!(slot = ?self.slot, activity = ?self.activity, "crouch rejected");
                return false;
            }
            self.activity = Activity::Crouching;
            self.timers.block_timer = BLOCK_DURATION;
            self.velocity.x = 0.0;
            self.play(archetype, ActionKind::Crouch)
        } else {
            // The frame cursor stays where it is; the release plays on from there.
            match self.activity {
                Activity::Crouching => {
                    self.activity = Activity::CrouchRelease;
                    self.timers.block_timer = 0;
                    true
                }
                Activity::HitStun { guarding: true } => {
                    self.activity = Activity::HitStun { guarding: false };
                    true
                }
                _ => false,
            }
        }
    }

    /// Keep the guard window open while the crouch is held.
    pub fn hold_guard(&mut self) {
        if matches!(self.activity, Activity::Crouching) {
            self.timers.block_timer = BLOCK_DURATION;
        }
    }

    /// Dash in `direction` (-1 or +1), or along the facing when `None`.
    pub fn dash(
        &mut self,
        archetype: &Archetype,
        direction: Option<i8>,
        stage: &StageConfig,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        if !matches!(self.activity, Activity::Idle | Activity::Walking)
            || !self.is_grounded(stage)
            || self.timers.dash_cooldown > 0
        {
            trace!(
                slot = ?self.slot,
                activity = ?self.activity,
                cooldown = self.timers.dash_cooldown,
                "dash rejected"
            );
            return false;
        }
        let direction = match direction {
            Some(d) if d != 0 => d.signum(),
            _ => self.facing.direction(),
        };
        let action = if direction == self.facing.direction() {
            ActionKind::DashForward
        } else {
            ActionKind::DashBackward
        };
        if !archetype.has_action(action) {
            return false;
        }
        let target = self.position.x + f64::from(direction) * archetype.movement.dash_distance;
        let target_x = stage.clamp_x(target, archetype.half_width());

        self.activity = Activity::Dashing { target_x };
        self.velocity.x = 0.0;
        self.timers.dash_cooldown = archetype.movement.dash_cooldown;
        self.play(archetype, action);
        events.push(CombatEvent::Dash { fighter: self.slot });
        debug!(slot = ?self.slot, direction, target_x, "dash");
        true
    }

    /// Summon the Stand, or send it away.
    pub fn toggle_stand(&mut self, archetype: &Archetype, events: &mut Vec<CombatEvent>) -> bool {
        let blocked = match self.activity {
            Activity::Airborne { .. }
            | Activity::Dashing { .. }
            | Activity::Crouching
            | Activity::CrouchRelease
            | Activity::HitStun { .. }
            | Activity::Scripted => true,
            Activity::Attacking(attack) => attack.form == AttackForm::Owner,
            Activity::Idle | Activity::Walking | Activity::Summoning => false,
        };
        if blocked {
            trace!(slot = ?self.slot, activity = ?self.activity, "stand toggle rejected");
            return false;
        }

        if self.dismiss_stand(archetype) {
            events.push(CombatEvent::StandDismissed {
                fighter: self.slot,
                forced: false,
            });
            debug!(slot = ?self.slot, "stand dismissed");
            return true;
        }

        let cost = archetype.meter.summon_cost;
        if self.meter < cost || !archetype.has_action(ActionKind::StandSummon) {
            debug!(slot = ?self.slot, meter = self.meter, cost, "not enough meter to summon");
            return false;
        }
        self.drain_meter(archetype, cost);
        self.stand = Some(Stand::summon(
            &archetype.stand,
            self.position,
            self.facing,
        ));
        self.activity = Activity::Summoning;
        self.velocity.x = 0.0;
        self.restart(archetype, ActionKind::StandSummon);
        events.push(CombatEvent::StandSummon { fighter: self.slot });
        debug!(slot = ?self.slot, meter = self.meter, "stand summoned");
        true
    }

    /// Remove the Stand. A Stand attack in progress ends with it.
    pub fn dismiss_stand(&mut self, archetype: &Archetype) -> bool {
        if self.stand.take().is_none() {
            return false;
        }
        if let Activity::Attacking(AttackState {
            form: AttackForm::Stand,
            ..
        }) = self.activity
        {
            self.go_idle(archetype);
        }
        true
    }

    /// Start an attack. `requested` plays unless a live combo chain picks the
    /// next stage instead.
    pub fn attack(&mut self, archetype: &Archetype, requested: AttackSlot) -> bool {
        if !matches!(self.activity, Activity::Idle | Activity::Walking) {
            trace!(slot = ?self.slot, activity = ?self.activity, "attack rejected");
            return false;
        }
        if self.timers.combo_cooldown > 0 {
            trace!(slot = ?self.slot, cooldown = self.timers.combo_cooldown, "combo penalty");
            return false;
        }

        let window_live = self.timers.combo_timer > 0 && self.combo.counter > 0;
        let chained = window_live && self.combo.connected && self.combo.counter < MAX_COMBO;
        let (counter, slot) = if chained {
            let next = self.combo.counter + 1;
            match AttackSlot::from_number(next) {
                Some(slot) => (next, slot),
                None => return false,
            }
        } else {
            (1, requested)
        };

        if self.timers.attack_cooldown[slot.index()] > 0 {
            trace!(slot = ?self.slot, attack = slot.number(), "attack on cooldown");
            return false;
        }
        let form = if self.stand.is_some() {
            AttackForm::Stand
        } else {
            AttackForm::Owner
        };
        let action = match form {
            AttackForm::Owner => ActionKind::attack(slot),
            AttackForm::Stand => ActionKind::stand_stance(slot),
        };
        if !archetype.has_action(action) {
            return false;
        }

        if window_live && !self.combo.connected {
            self.timers.combo_cooldown = COMBO_BREAK_COOLDOWN;
            debug!(slot = ?self.slot, "combo broken");
        }
        self.combo = ComboState {
            counter,
            connected: false,
        };
        self.timers.attack_cooldown[slot.index()] = ATTACK_COOLDOWN;
        self.timers.combo_timer = archetype.combo_window;
        self.gain_meter(archetype, archetype.meter.gain_on_attack);
        self.activity = Activity::Attacking(AttackState {
            slot,
            form,
            facing: self.facing,
            landed: false,
        });
        self.restart(archetype, action);
        if let Some(stand) = self.stand.as_mut() {
            stand.start_attack(&archetype.stand, slot);
        }
        debug!(
            slot = ?self.slot,
            attack = slot.number(),
            combo = counter,
            ?form,
            "attack started"
        );
        true
    }

    /// Resolve an incoming hit. `knockback` is signed in stage space.
    /// Returns `None` while the hit cooldown makes the fighter untouchable.
    pub fn take_damage(
        &mut self,
        archetype: &Archetype,
        damage: i32,
        knockback: f64,
    ) -> Option<DamageOutcome> {
        if self.timers.hit_cooldown > 0 {
            return None;
        }
        let meter = archetype.meter;
        let was_guarding = self.is_guarding();

        if was_guarding {
            if self.stand.is_some() {
                if self.meter >= meter.block_drain {
                    let emptied = self.drain_meter(archetype, meter.block_drain);
                    let stand_broken = emptied && self.dismiss_stand(archetype);
                    if !stand_broken {
                        self.gain_meter(archetype, meter.gain_on_block);
                    }
                    self.position.x += knockback * GUARD_PUSH_FACTOR;
                    debug!(slot = ?self.slot, meter = self.meter, stand_broken, "guarded");
                    return Some(DamageOutcome {
                        damage: 0,
                        guarded: true,
                        stand_broken,
                    });
                }
            } else if self.meter >= meter.block_drain_no_stand {
                self.drain_meter(archetype, meter.block_drain_no_stand);
                let reduced = (f64::from(damage) * CHIP_GUARD_FACTOR) as i32;
                self.health = (self.health - reduced).max(0);
                self.gain_meter(archetype, meter.gain_on_block);
                self.timers.hit_cooldown = HIT_COOLDOWN / 2;
                self.knockback = Knockback {
                    velocity: knockback * CHIP_GUARD_FACTOR,
                    timer: KNOCKBACK_DURATION / 2,
                };
                self.activity = Activity::HitStun { guarding: true };
                debug!(slot = ?self.slot, damage = reduced, "chip guard");
                return Some(DamageOutcome {
                    damage: reduced,
                    guarded: true,
                    stand_broken: false,
                });
            }
            debug!(slot = ?self.slot, meter = self.meter, "guard broken");
        }

        // A broken guard earns nothing for the hit.
        if !was_guarding {
            self.gain_meter(archetype, meter.gain_on_hit);
        }
        let drain = if self.stand.is_some() {
            meter.damage_drain
        } else {
            meter.damage_drain_no_stand
        };
        let stand_broken = self.drain_meter(archetype, drain) && self.dismiss_stand(archetype);
        if let Some(stand) = self.stand.as_mut() {
            if stand.is_attacking() {
                stand.end_attack(&archetype.stand);
            }
        }

        self.health = (self.health - damage).max(0);
        self.timers.hit_cooldown = HIT_COOLDOWN;
        self.timers.block_timer = 0;
        self.knockback = Knockback {
            velocity: knockback,
            timer: KNOCKBACK_DURATION,
        };
        self.velocity.x = 0.0;
        self.activity = Activity::HitStun { guarding: false };
        if archetype.has_action(ActionKind::Hit) {
            self.restart(archetype, ActionKind::Hit);
        } else if self.action != ActionKind::Jump {
            self.play(archetype, ActionKind::Idle);
        }
        debug!(slot = ?self.slot, damage, health = self.health, "hit taken");
        Some(DamageOutcome {
            damage,
            guarded: false,
            stand_broken,
        })
    }
}
