//! Simulation constants and tuning parameters.
//!
//! Every duration is in ticks and every speed is in stage units per tick.

/// Simulation tick rate (Hz) the tuning below was authored against.
pub const TICK_RATE: u32 = 60;

// --- Stage ---

/// Default stage width in stage units.
pub const STAGE_WIDTH: f64 = 800.0;

/// Default stage height in stage units.
pub const STAGE_HEIGHT: f64 = 600.0;

/// Default vertical position of a grounded fighter's center.
pub const GROUND_LEVEL: f64 = 150.0;

/// Height above ground beyond which a fighter counts as airborne for the jump loop.
pub const AIRBORNE_THRESHOLD: f64 = 5.0;

/// Downward acceleration per tick.
pub const GRAVITY: f64 = 0.5;

// --- Hits ---

/// Invulnerability / hit-stun window after a full hit.
pub const HIT_COOLDOWN: u32 = 30;

/// Ticks a knockback impulse keeps pushing the defender.
pub const KNOCKBACK_DURATION: u32 = 10;

/// Per-tick multiplicative decay of the knockback impulse.
pub const KNOCKBACK_DECAY: f64 = 0.8;

/// Fraction of knockback that still pushes a Stand-backed guard.
pub const GUARD_PUSH_FACTOR: f64 = 0.3;

/// Damage, knockback and hit-stun multiplier for a guard without a Stand.
pub const CHIP_GUARD_FACTOR: f64 = 0.5;

// --- Attacks ---

/// Per-slot cooldown armed when an attack starts.
pub const ATTACK_COOLDOWN: u32 = 20;

/// Penalty that blocks attacking after a combo breaks without connecting.
pub const COMBO_BREAK_COOLDOWN: u32 = 60;

/// Longest chain the combo counter can reach.
pub const MAX_COMBO: u8 = 3;

// --- Guard ---

/// Guard window armed on crouch entry and refreshed while the crouch is held.
pub const BLOCK_DURATION: u32 = 30;

// --- Match flow ---

/// Default length of the pre-fight intro.
pub const INTRO_DURATION: u32 = 200;

// --- Statistics ---

pub const POINTS_PER_HIT: u32 = 10;
pub const POINTS_PER_BLOCK: u32 = 5;
pub const POINTS_PER_DASH: u32 = 2;
pub const POINTS_PER_JUMP: u32 = 1;
pub const POINTS_PER_STAND_SUMMON: u32 = 15;
pub const POINTS_PER_COMBO: u32 = 25;
pub const POINTS_PER_KO: u32 = 100;
pub const POINTS_WIN_BONUS: u32 = 50;
