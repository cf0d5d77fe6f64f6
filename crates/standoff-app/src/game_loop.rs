//! Game loop thread: runs the match engine at 60Hz and publishes snapshots.
//!
//! The engine is moved into this thread. Commands arrive via `mpsc` channel;
//! snapshots and stats are stored in shared state for synchronous polling.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use standoff_core::commands::InputIntent;
use standoff_core::constants::TICK_RATE;
use standoff_core::enums::MatchPhase;
use standoff_sim::{MatchEngine, MatchState};

use crate::error::{AppError, Result};
use crate::state::{LoopCommand, SharedOutput};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Handle to a running game loop.
pub struct GameLoop {
    command_tx: mpsc::Sender<LoopCommand>,
    output: SharedOutput,
    thread: Option<JoinHandle<()>>,
}

impl GameLoop {
    /// Move `engine` into a new thread and start ticking.
    pub fn spawn(engine: MatchEngine) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<LoopCommand>();
        let output = SharedOutput::new();
        let thread_output = output.clone();

        let thread = std::thread::Builder::new()
            .name("standoff-game-loop".into())
            .spawn(move || run_game_loop(engine, command_rx, &thread_output))
            .map_err(AppError::Spawn)?;

        Ok(Self {
            command_tx,
            output,
            thread: Some(thread),
        })
    }

    pub fn send(&self, command: LoopCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| AppError::LoopStopped)
    }

    pub fn output(&self) -> &SharedOutput {
        &self.output
    }

    /// Ask the loop for a save and wait for it.
    pub fn save(&self) -> Result<MatchState> {
        let (tx, rx) = mpsc::channel();
        self.send(LoopCommand::Save(tx))?;
        rx.recv().map_err(|_| AppError::LoopStopped)
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.command_tx.send(LoopCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("game loop thread panicked");
            }
        }
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    mut engine: MatchEngine,
    command_rx: mpsc::Receiver<LoopCommand>,
    output: &SharedOutput,
) {
    let mut intents = [InputIntent::neutral(); 2];
    let mut next_tick_time = Instant::now();
    let mut finished_logged = false;
    info!("game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match command_rx.try_recv() {
                Ok(LoopCommand::Input { slot, intent }) => intents[slot.index()] = intent,
                Ok(LoopCommand::Match(command)) => engine.queue_command(command),
                Ok(LoopCommand::Save(reply)) => {
                    let _ = reply.send(engine.save_state());
                }
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick(intents);
        for intent in &mut intents {
            *intent = held_only(*intent);
        }

        // 3. Publish
        if let Ok(mut stats) = output.stats.lock() {
            stats.record_all(&snapshot.events);
        }
        if snapshot.phase == MatchPhase::Finished && !finished_logged {
            finished_logged = true;
            debug!(tick = snapshot.time.tick, "match finished; loop keeps running");
        }
        if let Ok(mut lock) = output.latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Keep held buttons and drop the edges that already fired.
pub fn held_only(intent: InputIntent) -> InputIntent {
    InputIntent {
        jump_edge: false,
        crouch_edge: false,
        dash_edge: false,
        attack_edge: [false; 3],
        stand_toggle_edge: false,
        ..intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use standoff_core::commands::MatchCommand;
    use standoff_core::enums::{AttackSlot, PlayerSlot};
    use standoff_roster::profiles::builtin_catalog;
    use standoff_sim::MatchConfig;

    fn fight_engine() -> MatchEngine {
        let config = MatchConfig {
            intro_ticks: 0,
            ..Default::default()
        };
        MatchEngine::new(config, &builtin_catalog().unwrap()).unwrap()
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();
        tx.send(LoopCommand::Match(MatchCommand::Pause)).unwrap();
        tx.send(LoopCommand::Input {
            slot: PlayerSlot::Two,
            intent: InputIntent::jump(),
        })
        .unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            LoopCommand::Match(MatchCommand::Pause)
        ));
        assert!(matches!(
            commands[1],
            LoopCommand::Input {
                slot: PlayerSlot::Two,
                ..
            }
        ));
        assert!(matches!(commands[2], LoopCommand::Shutdown));
    }

    #[test]
    fn test_held_only_drops_edges() {
        let mut intent = InputIntent::attack(AttackSlot::Two);
        intent.move_left = true;
        intent.crouch_held = true;
        intent.crouch_edge = true;
        let held = held_only(intent);
        assert!(held.move_left);
        assert!(held.crouch_held);
        assert!(!held.crouch_edge);
        assert_eq!(held.attack_pressed(), None);
    }

    #[test]
    fn test_tick_duration_constant() {
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_loop_publishes_and_saves() {
        let game_loop = GameLoop::spawn(fight_engine()).unwrap();
        game_loop
            .send(LoopCommand::Input {
                slot: PlayerSlot::One,
                intent: InputIntent::walking(1),
            })
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let moved = loop {
            let x = game_loop
                .output()
                .snapshot()
                .and_then(|s| s.fighter(PlayerSlot::One).map(|f| f.position.x));
            if x.is_some_and(|x| x > 200.0) {
                break true;
            }
            if Instant::now() > deadline {
                break false;
            }
            std::thread::sleep(Duration::from_millis(10));
        };
        assert!(moved, "Held input should keep walking the fighter");

        let state = game_loop.save().unwrap();
        assert_eq!(state.fighters.len(), 2);
        assert!(state.time.tick > 0);
        game_loop.shutdown();
    }

    #[test]
    fn test_send_after_shutdown_fails() {
        let mut game_loop = GameLoop::spawn(fight_engine()).unwrap();
        game_loop.stop();
        assert!(matches!(
            game_loop.send(LoopCommand::Match(MatchCommand::Pause)),
            Err(AppError::LoopStopped)
        ));
    }
}
