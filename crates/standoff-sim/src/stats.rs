//! Match statistics folded from the combat event stream.

use serde::{Deserialize, Serialize};

use standoff_core::constants::{
    POINTS_PER_BLOCK, POINTS_PER_COMBO, POINTS_PER_DASH, POINTS_PER_HIT, POINTS_PER_JUMP,
    POINTS_PER_KO, POINTS_PER_STAND_SUMMON, POINTS_WIN_BONUS,
};
use standoff_core::enums::PlayerSlot;
use standoff_core::events::CombatEvent;

/// Counters and points for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hits: u32,
    pub blocks: u32,
    pub dashes: u32,
    pub jumps: u32,
    pub summons: u32,
    pub combos: u32,
    pub knockouts: u32,
    pub damage_dealt: u32,
    pub points: u32,
    pub won: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    players: [PlayerStats; 2],
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self, slot: PlayerSlot) -> &PlayerStats {
        &self.players[slot.index()]
    }

    pub fn record_all<'a>(&mut self, events: impl IntoIterator<Item = &'a CombatEvent>) {
        for event in events {
            self.record(event);
        }
    }

    pub fn record(&mut self, event: &CombatEvent) {
        let player = &mut self.players[event.actor().index()];
        match *event {
            CombatEvent::Hit { damage, .. } => {
                player.hits += 1;
                player.damage_dealt += damage.max(0) as u32;
                player.points += POINTS_PER_HIT;
            }
            CombatEvent::Block { .. } => {
                player.blocks += 1;
                player.points += POINTS_PER_BLOCK;
            }
            CombatEvent::Dash { .. } => {
                player.dashes += 1;
                player.points += POINTS_PER_DASH;
            }
            CombatEvent::Jump { .. } => {
                player.jumps += 1;
                player.points += POINTS_PER_JUMP;
            }
            CombatEvent::StandSummon { .. } => {
                player.summons += 1;
                player.points += POINTS_PER_STAND_SUMMON;
            }
            CombatEvent::Combo { .. } => {
                player.combos += 1;
                player.points += POINTS_PER_COMBO;
            }
            CombatEvent::Ko { .. } => {
                player.knockouts += 1;
                player.won = true;
                player.points += POINTS_PER_KO + POINTS_WIN_BONUS;
            }
            CombatEvent::StandDismissed { .. } => {}
        }
    }
}
