//! Inputs to the simulation: per-tick fighter intents and match-flow commands.
//!
//! Intents are already decoded by the input layer. `*_edge` fields are true only
//! on the tick the button went down, so holding a button cannot retrigger
//! single-shot actions.

use serde::{Deserialize, Serialize};

use crate::enums::{ActionKind, AttackSlot, PlayerSlot};

/// What one fighter's controls ask for during a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_held: bool,
    pub jump_edge: bool,
    pub crouch_held: bool,
    pub crouch_edge: bool,
    pub dash_edge: bool,
    pub attack_edge: [bool; 3],
    pub stand_toggle_edge: bool,
}

impl InputIntent {
    /// Horizontal direction requested: -1, 0 or +1. Opposing directions cancel.
    pub fn horizontal(&self) -> i8 {
        match (self.move_left, self.move_right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    /// First attack slot pressed this tick, if any.
    pub fn attack_pressed(&self) -> Option<AttackSlot> {
        AttackSlot::ALL
            .into_iter()
            .find(|slot| self.attack_edge[slot.index()])
    }

    /// Intent that does nothing.
    pub fn neutral() -> Self {
        Self::default()
    }

    // Builders used by scripted input sources and tests.

    pub fn walking(direction: i8) -> Self {
        Self {
            move_left: direction < 0,
            move_right: direction > 0,
            ..Self::default()
        }
    }

    pub fn jump() -> Self {
        Self {
            jump_held: true,
            jump_edge: true,
            ..Self::default()
        }
    }

    pub fn crouch_press() -> Self {
        Self {
            crouch_held: true,
            crouch_edge: true,
            ..Self::default()
        }
    }

    pub fn crouch_hold() -> Self {
        Self {
            crouch_held: true,
            ..Self::default()
        }
    }

    pub fn dash(direction: i8) -> Self {
        Self {
            dash_edge: true,
            ..Self::walking(direction)
        }
    }

    pub fn attack(slot: AttackSlot) -> Self {
        let mut intent = Self::default();
        intent.attack_edge[slot.index()] = true;
        intent
    }

    pub fn toggle_stand() -> Self {
        Self {
            stand_toggle_edge: true,
            ..Self::default()
        }
    }
}

/// Match-flow commands from the external flow controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchCommand {
    /// End the intro early and start fighting.
    SkipIntro,
    /// Suspend the fight.
    Pause,
    /// Resume a paused fight.
    Resume,
    /// Put a fighter into a scripted pose (intro, victory, defeat) regardless
    /// of its state, or back to `Idle`. Other actions are rejected.
    ForceAction { slot: PlayerSlot, action: ActionKind },
}
