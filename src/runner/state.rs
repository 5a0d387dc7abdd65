//! Runner state: the dino, the cacti and the run itself

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::settings::Settings;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Title screen, waiting for the first input
    Start,
    Playing,
    GameOver,
}

/// Axis-aligned box in pixel units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Same origin, size reduced by `by` on each axis
    pub fn shrunk(&self, by: f32) -> Rect {
        Rect {
            w: self.w - by,
            h: self.h - by,
            ..*self
        }
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dino {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vel_y: f32,
    pub on_ground: bool,
}

impl Default for Dino {
    fn default() -> Self {
        Self {
            x: DINO_X,
            y: GROUND_Y - DINO_HEIGHT,
            w: DINO_WIDTH,
            h: DINO_HEIGHT,
            vel_y: 0.0,
            on_ground: true,
        }
    }
}

impl Dino {
    /// Jump, only from the ground
    pub fn jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel_y = DINO_JUMP_VELOCITY;
        self.on_ground = false;
        true
    }

    pub fn update(&mut self) {
        self.vel_y += DINO_GRAVITY;
        self.y += self.vel_y;

        let floor = GROUND_Y - self.h;
        if self.y >= floor {
            self.y = floor;
            self.vel_y = 0.0;
            self.on_ground = true;
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

/// Cactus sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Small,
    Medium,
    Large,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Small, ObstacleKind::Medium, ObstacleKind::Large];

    /// Footprint in pixel units (art is drawn at 4 px per block)
    pub fn size(self) -> (f32, f32) {
        match self {
            ObstacleKind::Small | ObstacleKind::Medium => (5.0 * OBSTACLE_PIXEL, 5.0 * OBSTACLE_PIXEL),
            ObstacleKind::Large => (6.0 * OBSTACLE_PIXEL, 5.0 * OBSTACLE_PIXEL),
        }
    }
}

/// A cactus scrolling toward the dino
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Obstacle {
    /// Spawn at the right edge, standing on the ground
    pub fn spawn(id: u32, kind: ObstacleKind) -> Self {
        let (w, h) = kind.size();
        Self {
            id,
            kind,
            x: CANVAS_WIDTH,
            y: GROUND_Y - h,
            w,
            h,
        }
    }

    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.x + self.w < 0.0
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }

    /// Forgiving hit test: both boxes shrink before overlapping
    pub fn collides_with(&self, dino: &Dino) -> bool {
        dino.bounds()
            .shrunk(HITBOX_SHRINK)
            .overlaps(&self.bounds().shrunk(HITBOX_SHRINK))
    }
}

/// Complete runner state
#[derive(Debug, Clone)]
pub struct RunnerState {
    pub seed: u64,
    rng: Pcg32,
    pub phase: RunPhase,
    pub score: f32,
    pub speed: f32,
    /// 0 is noon, 0.5 is midnight
    pub time_of_day: f32,
    pub time_ticks: u64,
    pub dino: Dino,
    /// Active obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
    /// Ticks until the next spawn
    pub next_spawn_ticks: u32,
    pub settings: Settings,
    next_id: u32,
}

impl RunnerState {
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RunPhase::Start,
            score: 0.0,
            speed: settings.runner_initial_speed,
            time_of_day: 0.0,
            time_ticks: 0,
            dino: Dino::default(),
            obstacles: Vec::new(),
            spawn_timer: 0,
            next_spawn_ticks: 0,
            settings,
            next_id: 1,
        };
        state.schedule_next_spawn();
        state
    }

    /// Start a fresh run (time of day carries over)
    pub fn reset_run(&mut self) {
        self.score = 0.0;
        self.speed = self.settings.runner_initial_speed;
        self.obstacles.clear();
        self.dino = Dino::default();
        self.schedule_next_spawn();
    }

    /// Current speed relative to the starting speed
    #[inline]
    pub fn speed_ratio(&self) -> f32 {
        self.speed / self.settings.runner_initial_speed
    }

    /// Roll the spawn delay; faster runs spawn more often
    pub fn schedule_next_spawn(&mut self) {
        self.spawn_timer = 0;
        let base: f32 = self
            .rng
            .random_range(SPAWN_TICKS_MIN..SPAWN_TICKS_MIN * SPAWN_SPREAD);
        self.next_spawn_ticks = (base / self.speed_ratio()).round().max(1.0) as u32;
    }

    pub fn spawn_obstacle(&mut self) {
        let kind = ObstacleKind::ALL[self.rng.random_range(0..ObstacleKind::ALL.len())];
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::spawn(id, kind));
    }

    /// Whole points shown on the HUD
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }

    pub fn is_night(&self) -> bool {
        (0.25..0.75).contains(&self.time_of_day)
    }
}
