//! State shared between the harness and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use standoff_core::commands::{InputIntent, MatchCommand};
use standoff_core::enums::PlayerSlot;
use standoff_core::state::MatchSnapshot;
use standoff_sim::{MatchState, MatchStats};

/// Messages from the harness to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// Replace a player's intent. Edge-triggered buttons apply to one tick only.
    Input { slot: PlayerSlot, intent: InputIntent },
    /// A match-flow command to forward to the engine.
    Match(MatchCommand),
    /// Capture the match state between ticks and send it back.
    Save(mpsc::Sender<MatchState>),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Observable output of the loop, shared with the thread.
#[derive(Debug, Clone, Default)]
pub struct SharedOutput {
    /// Latest snapshot for synchronous polling.
    pub latest_snapshot: Arc<Mutex<Option<MatchSnapshot>>>,
    /// Running totals since the loop started.
    pub stats: Arc<Mutex<MatchStats>>,
}

impl SharedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<MatchSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    pub fn stats(&self) -> MatchStats {
        self.stats.lock().map(|lock| *lock).unwrap_or_default()
    }
}
