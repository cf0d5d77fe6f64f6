//! Events emitted by the simulation for stats collection and match flow.

use serde::{Deserialize, Serialize};

use crate::enums::{AttackForm, PlayerSlot};

/// Notifications produced during a tick, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// An attack connected. `damage` is the health actually removed.
    Hit {
        attacker: PlayerSlot,
        defender: PlayerSlot,
        damage: i32,
        form: AttackForm,
    },
    /// The defender guarded the hit.
    Block { defender: PlayerSlot },
    Dash { fighter: PlayerSlot },
    Jump { fighter: PlayerSlot, double: bool },
    StandSummon { fighter: PlayerSlot },
    /// The Stand went away, either by toggle or because the meter ran dry.
    StandDismissed { fighter: PlayerSlot, forced: bool },
    /// A chained attack connected; `count` is the combo stage (2 or 3).
    Combo { fighter: PlayerSlot, count: u8 },
    /// A fighter's health reached zero.
    Ko {
        winner: PlayerSlot,
        loser: PlayerSlot,
    },
}

impl CombatEvent {
    /// The fighter credited with the event.
    pub fn actor(&self) -> PlayerSlot {
        match *self {
            CombatEvent::Hit { attacker, .. } => attacker,
            CombatEvent::Block { defender } => defender,
            CombatEvent::Dash { fighter }
            | CombatEvent::Jump { fighter, .. }
            | CombatEvent::StandSummon { fighter }
            | CombatEvent::StandDismissed { fighter, .. }
            | CombatEvent::Combo { fighter, .. } => fighter,
            CombatEvent::Ko { winner, .. } => winner,
        }
    }
}
