//! Endless runner simulation
//!
//! A dino runs along the ground while cacti scroll in from the right and
//! the pace slowly rises. Rendering, art and day/night colors are left to
//! the caller; this module only tracks positions, timers and score.

pub mod state;
pub mod tick;

pub use state::{Dino, Obstacle, ObstacleKind, Rect, RunPhase, RunnerState};
pub use tick::{RunnerInput, tick};

/// Runner configuration constants (pixel units, one tick per frame at 60 Hz)
pub mod consts {
    pub const TICKS_PER_SECOND: u32 = 60;

    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Top of the ground strip
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - GROUND_HEIGHT;

    /// Dino sprite is 18 x 16 blocks at 3 px
    pub const DINO_X: f32 = 60.0;
    pub const DINO_WIDTH: f32 = 18.0 * 3.0;
    pub const DINO_HEIGHT: f32 = 16.0 * 3.0;
    pub const DINO_GRAVITY: f32 = 0.8;
    pub const DINO_JUMP_VELOCITY: f32 = -18.0;

    /// Cactus art block size
    pub const OBSTACLE_PIXEL: f32 = 4.0;
    /// Both hitboxes lose this much width and height
    pub const HITBOX_SHRINK: f32 = 10.0;

    /// Spawn delay at starting speed: 1500-2250 ms worth of ticks
    pub const SPAWN_TICKS_MIN: f32 = 1.5 * TICKS_PER_SECOND as f32;
    pub const SPAWN_SPREAD: f32 = 1.5;

    pub const SCORE_PER_TICK: f32 = 0.1;
    pub const DAY_CYCLE_PER_TICK: f32 = 0.0001;
}
