//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D vector in stage space. x grows to the right, y grows upward.
pub type Vec2 = glam::DVec2;

/// Horizontal direction a fighter is facing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1.0 when facing right, -1.0 when facing left.
    pub fn sign(self) -> f64 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Same as [`Facing::sign`] for integer directions.
    pub fn direction(self) -> i8 {
        match self {
            Facing::Right => 1,
            Facing::Left => -1,
        }
    }

    /// Facing that looks from `from_x` toward `to_x`.
    pub fn toward(from_x: f64, to_x: f64) -> Self {
        if to_x > from_x {
            Facing::Right
        } else {
            Facing::Left
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Inclusive range of animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: u16,
    pub end: u16,
}

impl FrameRange {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, frame: u16) -> bool {
        frame >= self.start && frame <= self.end
    }

    /// Number of frames in the range (both ends included).
    pub fn len(&self) -> u32 {
        u32::from(self.end.saturating_sub(self.start)) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Axis-aligned box in stage space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Aabb {
    /// Box of `size` (width, height) centered on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            left: center.x - half.x,
            right: center.x + half.x,
            bottom: center.y - half.y,
            top: center.y + half.y,
        }
    }

    /// Strict intersection test; touching edges do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.top > other.bottom
            && self.bottom < other.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.bottom + self.top) * 0.5,
        )
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
}

impl SimTime {
    /// Seconds per tick at the nominal tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Elapsed time in seconds at the nominal tick rate.
    pub fn elapsed_secs(&self) -> f64 {
        self.tick as f64 * self.dt()
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
