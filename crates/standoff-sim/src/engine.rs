//! Match engine: the core of the game.
//!
//! `MatchEngine` owns the hecs world holding both fighters, applies match
//! commands and per-tick input intents, runs every system in a fixed order,
//! and produces a `MatchSnapshot`. Completely headless, so a bout can be
//! replayed tick for tick in tests.

use std::collections::VecDeque;

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use standoff_core::commands::{InputIntent, MatchCommand};
use standoff_core::constants::{
    AIRBORNE_THRESHOLD, GROUND_LEVEL, INTRO_DURATION, STAGE_HEIGHT, STAGE_WIDTH,
};
use standoff_core::enums::{MatchPhase, PlayerSlot};
use standoff_core::error::{ConfigError, Result};
use standoff_core::events::CombatEvent;
use standoff_core::state::MatchSnapshot;
use standoff_core::types::SimTime;
use standoff_roster::ArchetypeCatalog;

use crate::fighter::{ArchetypeRef, Fighter};
use crate::systems;
use crate::world_setup;

/// Stage geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub width: f64,
    pub height: f64,
    /// Height of a grounded fighter's center.
    pub ground_level: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: STAGE_WIDTH,
            height: STAGE_HEIGHT,
            ground_level: GROUND_LEVEL,
        }
    }
}

impl StageConfig {
    /// Keep a center x inside the stage for a box `half_width` wide on each side.
    pub fn clamp_x(&self, x: f64, half_width: f64) -> f64 {
        x.max(half_width).min(self.width - half_width)
    }

    /// Whether a center at height `y` is high enough to loop the jump arc.
    pub fn is_airborne(&self, y: f64) -> bool {
        y > self.ground_level + AIRBORNE_THRESHOLD
    }
}

/// Configuration for starting a new match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Archetype id for player one.
    pub p1: String,
    /// Archetype id for player two.
    pub p2: String,
    pub stage: StageConfig,
    /// Intro length in ticks. Zero starts the fight immediately.
    pub intro_ticks: u32,
    /// Spawn x for each player.
    pub spawn_x: [f64; 2],
    /// Stand meter both fighters start with.
    pub starting_meter: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            p1: "jotaro".into(),
            p2: "dio".into(),
            stage: StageConfig::default(),
            intro_ticks: INTRO_DURATION,
            spawn_x: [STAGE_WIDTH * 0.25, STAGE_WIDTH * 0.75],
            starting_meter: 0.0,
        }
    }
}

/// Everything needed to resume a match exactly where it stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub intro_remaining: u32,
    /// Fighters in player-slot order.
    pub fighters: Vec<Fighter>,
    pub pending_commands: Vec<MatchCommand>,
}

/// The match engine. Owns the ECS world and all match state.
pub struct MatchEngine {
    world: World,
    /// Fighter entities in player-slot order.
    fighters: [Entity; 2],
    config: MatchConfig,
    time: SimTime,
    phase: MatchPhase,
    intro_remaining: u32,
    command_queue: VecDeque<MatchCommand>,
    events: Vec<CombatEvent>,
}

impl MatchEngine {
    /// Create a match between the archetypes named in `config`.
    pub fn new(config: MatchConfig, catalog: &ArchetypeCatalog) -> Result<Self> {
        let archetypes = [catalog.get(&config.p1)?, catalog.get(&config.p2)?];
        let mut world = World::new();
        let fighters = world_setup::spawn_fighters(&mut world, &config, archetypes);

        let mut engine = Self {
            world,
            fighters,
            intro_remaining: config.intro_ticks,
            config,
            time: SimTime::default(),
            phase: MatchPhase::Intro,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        };
        if engine.intro_remaining > 0 {
            systems::match_flow::start_intro(&mut engine.world, &engine.fighters);
        } else {
            engine.begin_fight();
        }
        info!(
            p1 = %engine.config.p1,
            p2 = %engine.config.p2,
            intro_ticks = engine.config.intro_ticks,
            "match created"
        );
        Ok(engine)
    }

    /// Rebuild an engine from a saved state. Archetypes are looked up again by
    /// the ids stored in the fighters; `config` supplies the stage.
    pub fn restore(
        mut config: MatchConfig,
        catalog: &ArchetypeCatalog,
        state: MatchState,
    ) -> Result<Self> {
        let count = state.fighters.len();
        let Ok([p1, p2]) = <[Fighter; 2]>::try_from(state.fighters) else {
            return Err(ConfigError::InvalidState(format!(
                "expected 2 fighters, found {count}"
            )));
        };
        if p1.slot != PlayerSlot::One || p2.slot != PlayerSlot::Two {
            return Err(ConfigError::InvalidState(
                "fighters are not in player-slot order".into(),
            ));
        }
        let archetypes = [catalog.get(&p1.archetype)?, catalog.get(&p2.archetype)?];
        config.p1 = p1.archetype.clone();
        config.p2 = p2.archetype.clone();

        let mut world = World::new();
        let fighters = world_setup::spawn_pair(&mut world, [p1, p2], archetypes);
        debug!(tick = state.time.tick, phase = ?state.phase, "match restored");
        Ok(Self {
            world,
            fighters,
            config,
            time: state.time,
            phase: state.phase,
            intro_remaining: state.intro_remaining,
            command_queue: state.pending_commands.into(),
            events: Vec::new(),
        })
    }

    /// Capture the full match state between ticks.
    pub fn save_state(&self) -> MatchState {
        MatchState {
            time: self.time,
            phase: self.phase,
            intro_remaining: self.intro_remaining,
            fighters: self
                .fighters
                .iter()
                .filter_map(|&entity| self.world.get::<&Fighter>(entity).ok())
                .map(|fighter| (*fighter).clone())
                .collect(),
            pending_commands: self.command_queue.iter().cloned().collect(),
        }
    }

    /// Queue a match command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: MatchCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = MatchCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the match by one tick and return the resulting snapshot.
    pub fn tick(&mut self, inputs: [InputIntent; 2]) -> MatchSnapshot {
        self.process_commands();

        match self.phase {
            MatchPhase::Paused => {}
            MatchPhase::Intro => {
                self.run_intro();
                self.time.advance();
            }
            MatchPhase::Fighting => {
                self.run_systems(&inputs);
                self.time.advance();
            }
            MatchPhase::Finished => {
                self.run_systems(&[InputIntent::neutral(); 2]);
                self.time.advance();
            }
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.fighters, self.time, self.phase, events)
    }

    /// Snapshot of the current state without advancing.
    pub fn snapshot(&self) -> MatchSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.fighters,
            self.time,
            self.phase,
            Vec::new(),
        )
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn fighter(&self, slot: PlayerSlot) -> Option<hecs::Ref<'_, Fighter>> {
        self.world.get::<&Fighter>(self.fighters[slot.index()]).ok()
    }

    /// Mutable access to a fighter for test setups.
    #[cfg(test)]
    pub(crate) fn fighter_mut(&mut self, slot: PlayerSlot) -> Option<hecs::RefMut<'_, Fighter>> {
        self.world
            .get::<&mut Fighter>(self.fighters[slot.index()])
            .ok()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single match command.
    fn handle_command(&mut self, command: MatchCommand) {
        match command {
            MatchCommand::SkipIntro => {
                if self.phase == MatchPhase::Intro {
                    self.begin_fight();
                }
            }
            MatchCommand::Pause => {
                if self.phase == MatchPhase::Fighting {
                    self.phase = MatchPhase::Paused;
                    info!(tick = self.time.tick, "match paused");
                }
            }
            MatchCommand::Resume => {
                if self.phase == MatchPhase::Paused {
                    self.phase = MatchPhase::Fighting;
                    info!(tick = self.time.tick, "match resumed");
                }
            }
            MatchCommand::ForceAction { slot, action } => {
                let entity = self.fighters[slot.index()];
                let Ok(archetype) = self.world.get::<&ArchetypeRef>(entity).map(|a| a.0.clone())
                else {
                    return;
                };
                if let Ok(mut fighter) = self.world.get::<&mut Fighter>(entity) {
                    if !fighter.force_action(&archetype, action) {
                        warn!(?slot, action = action.name(), "forced action rejected");
                    }
                }
            }
        }
    }

    fn run_intro(&mut self) {
        self.intro_remaining = self.intro_remaining.saturating_sub(1);
        systems::animation::run(&mut self.world, &self.config.stage);
        if self.intro_remaining == 0 {
            self.begin_fight();
        }
    }

    fn begin_fight(&mut self) {
        self.intro_remaining = 0;
        self.phase = MatchPhase::Fighting;
        systems::match_flow::begin_fight(&mut self.world, &self.fighters);
        info!(tick = self.time.tick, "fight");
    }

    /// Run all systems in order.
    fn run_systems(&mut self, inputs: &[InputIntent; 2]) {
        let stage = self.config.stage;
        // 1. Input intents, P1 then P2
        systems::input::run(
            &mut self.world,
            &self.fighters,
            inputs,
            &stage,
            &mut self.events,
        );
        // 2. Timers, meter regen, combo expiry
        systems::timers::run(&mut self.world, &stage);
        // 3. Knockback, walking, dashing, gravity, stage bounds
        systems::locomotion::run(&mut self.world, &stage);
        // 4. Turn toward the opponent
        systems::facing::run(&mut self.world);
        // 5. Fighter animation and clip completions
        systems::animation::run(&mut self.world, &stage);
        // 6. Stands follow, mirror, animate
        systems::stand::run(&mut self.world, &stage);
        // 7. Hit resolution
        systems::combat::run(&mut self.world, &self.fighters, &stage, &mut self.events);
        // 8. Knockout
        if self.phase == MatchPhase::Fighting
            && systems::match_flow::check_knockout(&mut self.world, &self.fighters, &mut self.events)
        {
            self.phase = MatchPhase::Finished;
        }
    }
}
