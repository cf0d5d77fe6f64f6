//! Match snapshot: the complete visible state handed to rendering each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{ActionKind, MatchPhase, PlayerSlot, StandAction};
use crate::events::CombatEvent;
use crate::types::{Facing, SimTime, Vec2};

/// Everything an observer needs after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    /// Fighters in player-slot order.
    pub fighters: Vec<FighterView>,
    /// Events raised during this tick.
    pub events: Vec<CombatEvent>,
}

impl MatchSnapshot {
    pub fn fighter(&self, slot: PlayerSlot) -> Option<&FighterView> {
        self.fighters.iter().find(|f| f.slot == slot)
    }
}

/// Render-facing view of one fighter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterView {
    pub slot: PlayerSlot,
    pub archetype: String,
    pub position: Vec2,
    pub facing: Facing,
    pub health: i32,
    pub max_health: i32,
    pub stand_meter: f64,
    pub stand_meter_max: f64,
    pub action: ActionKind,
    pub frame: u16,
    pub combo_counter: u8,
    pub guarding: bool,
    pub stand: Option<StandView>,
}

/// Render-facing view of an active Stand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandView {
    pub position: Vec2,
    pub facing: Facing,
    pub action: StandAction,
    pub frame: u16,
}
