//! Sketchbook Sim - deterministic cores for a handful of canvas sketches
//!
//! Core modules:
//! - `sim`: Artillery duel (terrain, ballistics, explosions, turns)
//! - `runner`: Endless side-scroller simulation
//! - `numeric`: Fibonacci / nearest palindrome on big integers
//! - `settings`: Data-driven tunables
//! - `error`: Error types surfaced to callers

pub mod error;
pub mod numeric;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::NumericError;
pub use settings::Settings;

/// Artillery configuration constants
pub mod consts {
    /// Playfield size in pixel units
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Edge length of one terrain cell in pixel units
    pub const CELL_SIZE: f32 = 4.0;

    /// Tank footprint in cells
    pub const TANK_WIDTH: i32 = 6;
    pub const TANK_HEIGHT: i32 = 4;
    /// Barrel length in pixel units (projectile spawns at the tip)
    pub const BARREL_LENGTH: f32 = 20.0;
    /// Power-to-launch-speed factor
    pub const LAUNCH_SPEED_FACTOR: f32 = 0.2;

    /// Aim limits (degrees, -90 is straight up)
    pub const MIN_ANGLE: f32 = -180.0;
    pub const MAX_ANGLE: f32 = 0.0;
    pub const MAX_POWER: f32 = 100.0;
    pub const MAX_HEALTH: f32 = 100.0;

    /// Per-tick input step sizes for a held key
    pub const AIM_STEP: f32 = 1.0;
    pub const POWER_STEP: f32 = 0.5;

    /// Stone bounce response
    pub const STONE_RESTITUTION: f32 = 0.7;
    pub const STONE_FRICTION: f32 = 0.8;

    /// Blast radii in pixel units
    pub const BLAST_RADIUS: f32 = 40.0;
    pub const BIG_BLAST_RADIUS: f32 = 60.0;
    /// Damage bounds (centre, edge of reach)
    pub const MAX_DAMAGE: f32 = 25.0;
    pub const MIN_DAMAGE: f32 = 10.0;
    pub const BIG_MAX_DAMAGE: f32 = 40.0;
    pub const BIG_MIN_DAMAGE: f32 = 20.0;

    /// Damage to the opponent that counts as a streak hit
    pub const STREAK_HIT_DAMAGE: f32 = 20.0;
    /// Consecutive hits needed to arm a big shot
    pub const STREAK_FOR_BIG_SHOT: u32 = 3;

    /// Ticks after which a flight is forcibly ended (20 s at 60 Hz)
    pub const MAX_FLIGHT_TICKS: u32 = 1_200;
    /// A stone bounce leaving the shot slower than this counts as settling
    pub const REST_SPEED: f32 = 1.0;
    /// Settling bounces after which a shot detonates where it lies
    pub const REST_BOUNCES: u32 = 20;
}

/// Re-map `value` from one range onto another (unclamped)
#[inline]
pub fn map_range(value: f32, from_lo: f32, from_hi: f32, to_lo: f32, to_hi: f32) -> f32 {
    to_lo + (value - from_lo) / (from_hi - from_lo) * (to_hi - to_lo)
}
