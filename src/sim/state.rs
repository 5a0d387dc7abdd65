//! Match state and core simulation types
//!
//! Everything a match needs lives in [`GameState`]; there is no module-level
//! state. Resetting builds a fresh context.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::terrain::TerrainGrid;
use crate::consts::*;
use crate::settings::Settings;

/// Which side a tank (or projectile) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Turn state in which this player acts
    #[inline]
    pub fn turn(self) -> MatchState {
        match self {
            PlayerId::One => MatchState::Player1Turn,
            PlayerId::Two => MatchState::Player2Turn,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    Player1Turn,
    Player2Turn,
    /// A shot is in flight; no player input is accepted
    ProjectileAirborne,
    /// Terminal
    GameOver,
}

impl MatchState {
    /// Player whose turn it is, if any
    pub fn active_player(self) -> Option<PlayerId> {
        match self {
            MatchState::Player1Turn => Some(PlayerId::One),
            MatchState::Player2Turn => Some(PlayerId::Two),
            _ => None,
        }
    }
}

/// How a finished match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(PlayerId),
    Draw,
}

/// A player's tank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    pub player: PlayerId,
    /// Left edge (grid column)
    pub col: i32,
    /// Top edge (grid row)
    pub row: i32,
    pub width: i32,
    pub height: i32,
    /// Barrel angle in degrees, [-180, 0]
    pub angle: f32,
    /// Launch power, [0, 100]
    pub power: f32,
    /// Health, [0, starting health]
    pub health: f32,
    pub shots_left: u32,
    /// Consecutive shots that hit the opponent hard
    pub consecutive_hits: u32,
}

impl Tank {
    pub fn new(player: PlayerId, col: i32, angle: f32, settings: &Settings) -> Self {
        Self {
            player,
            col,
            row: 0,
            width: TANK_WIDTH,
            height: TANK_HEIGHT,
            angle,
            power: 50.0,
            health: settings.starting_health,
            shots_left: settings.shots_per_tank,
            consecutive_hits: 0,
        }
    }

    pub fn adjust_aim(&mut self, delta: f32) {
        self.angle = (self.angle + delta).clamp(MIN_ANGLE, MAX_ANGLE);
    }

    pub fn adjust_power(&mut self, delta: f32) {
        self.power = (self.power + delta).clamp(0.0, MAX_POWER);
    }

    /// Whether the next shot will be a big one
    #[inline]
    pub fn big_shot_ready(&self) -> bool {
        self.consecutive_hits >= STREAK_FOR_BIG_SHOT
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Centre of the tank body in pixel units
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.col as f32 + self.width as f32 / 2.0) * CELL_SIZE,
            (self.row as f32 + self.height as f32 / 2.0) * CELL_SIZE,
        )
    }

    /// Pivot of the barrel (top centre) in pixel units
    pub fn barrel_base(&self) -> Vec2 {
        Vec2::new(
            (self.col as f32 + self.width as f32 / 2.0) * CELL_SIZE,
            self.row as f32 * CELL_SIZE,
        )
    }

    /// Whether a pixel-space point lies in the tank's box (edges included)
    pub fn contains_point(&self, p: Vec2) -> bool {
        let x0 = self.col as f32 * CELL_SIZE;
        let y0 = self.row as f32 * CELL_SIZE;
        let w = self.width as f32 * CELL_SIZE;
        let h = self.height as f32 * CELL_SIZE;
        p.x >= x0 && p.x <= x0 + w && p.y >= y0 && p.y <= y0 + h
    }

    /// Take damage, never dropping below zero
    pub fn apply_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Sit the tank on the first solid cell of its column
    pub fn drop_to_ground(&mut self, terrain: &TerrainGrid) {
        match terrain.surface_row(self.col) {
            Some(surface) => self.row = surface - self.height,
            None => log::debug!("Column {} has no ground left, {:?} stays put", self.col, self.player),
        }
    }
}

/// Per-turn weather
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Horizontal acceleration per tick
    pub wind: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
}

/// Gravity treated as 1.0 G
pub const BASE_GRAVITY: f32 = 0.2;

impl Environment {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, settings: &Settings) -> Self {
        Self {
            wind: rng.random_range(settings.wind_min..settings.wind_max),
            gravity: rng.random_range(settings.gravity_min..settings.gravity_max),
        }
    }

    /// Gravity relative to the baseline
    pub fn gravity_g(&self) -> f32 {
        self.gravity / BASE_GRAVITY
    }

    /// Wind as shown to players (0 means calm)
    pub fn wind_strength(&self) -> i32 {
        if self.wind.abs() <= 0.005 {
            0
        } else {
            (self.wind * 500.0).round() as i32
        }
    }
}

/// The shot in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Gravity captured at launch
    pub gravity: Vec2,
    /// Wind captured at launch
    pub wind: f32,
    pub owner: PlayerId,
    pub big_shot: bool,
    /// Ticks spent in flight
    pub age_ticks: u32,
    /// Slow stone bounces so far
    pub settling_bounces: u32,
}

impl Projectile {
    /// Launch from the tip of a tank's barrel with the given weather
    pub fn launch(tank: &Tank, env: Environment, big_shot: bool) -> Self {
        let angle = tank.angle.to_radians();
        let dir = Vec2::new(angle.cos(), angle.sin());
        let speed = tank.power * LAUNCH_SPEED_FACTOR;

        Self {
            pos: tank.barrel_base() + dir * BARREL_LENGTH,
            vel: dir * speed,
            gravity: Vec2::new(0.0, env.gravity),
            wind: env.wind,
            owner: tank.player,
            big_shot,
            age_ticks: 0,
            settling_bounces: 0,
        }
    }
}

/// Complete match context (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Match seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub state: MatchState,
    pub terrain: TerrainGrid,
    pub tank1: Tank,
    pub tank2: Tank,
    pub projectile: Option<Projectile>,
    pub environment: Environment,
    pub settings: Settings,
}

impl GameState {
    /// Create a new match with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    /// Create a new match: terrain, tanks and weather all from `seed`
    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let cols = (FIELD_WIDTH / CELL_SIZE) as i32;
        let rows = (FIELD_HEIGHT / CELL_SIZE) as i32;
        let terrain = TerrainGrid::generate(cols, rows, settings.stone_threshold, &mut rng);
        let environment = Environment::roll(&mut rng, &settings);

        let mut tank1 = Tank::new(PlayerId::One, (cols as f32 * 0.15).floor() as i32, -45.0, &settings);
        let mut tank2 = Tank::new(PlayerId::Two, (cols as f32 * 0.85).floor() as i32, -135.0, &settings);
        tank1.drop_to_ground(&terrain);
        tank2.drop_to_ground(&terrain);

        log::info!("New match with seed {}", seed);

        Self {
            seed,
            rng,
            time_ticks: 0,
            state: MatchState::Player1Turn,
            terrain,
            tank1,
            tank2,
            projectile: None,
            environment,
            settings,
        }
    }

    pub fn tank(&self, player: PlayerId) -> &Tank {
        match player {
            PlayerId::One => &self.tank1,
            PlayerId::Two => &self.tank2,
        }
    }

    pub fn tank_mut(&mut self, player: PlayerId) -> &mut Tank {
        match player {
            PlayerId::One => &mut self.tank1,
            PlayerId::Two => &mut self.tank2,
        }
    }

    /// Roll fresh weather for the next turn
    pub fn reroll_environment(&mut self) {
        self.environment = Environment::roll(&mut self.rng, &self.settings);
    }

    /// Put both tanks back on the (possibly eroded) surface
    pub fn drop_tanks_to_ground(&mut self) {
        self.tank1.drop_to_ground(&self.terrain);
        self.tank2.drop_to_ground(&self.terrain);
    }

    /// Seed for the match that replaces this one
    pub(crate) fn next_match_seed(&mut self) -> u64 {
        self.rng.random()
    }

    /// Result once the match is over
    pub fn outcome(&self) -> Option<MatchOutcome> {
        if self.state != MatchState::GameOver {
            return None;
        }
        let (h1, h2) = (self.tank1.health, self.tank2.health);
        Some(if h1 > h2 {
            MatchOutcome::Winner(PlayerId::One)
        } else if h2 > h1 {
            MatchOutcome::Winner(PlayerId::Two)
        } else {
            MatchOutcome::Draw
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_layout() {
        let state = GameState::new(12345);
        assert_eq!(state.state, MatchState::Player1Turn);
        assert!(state.projectile.is_none());
        assert_eq!(state.tank1.col, 30);
        assert_eq!(state.tank2.col, 170);
        assert_eq!(state.tank1.shots_left, 10);
        assert_eq!(state.tank1.health, 100.0);

        // Both tanks rest directly on the surface
        for tank in [&state.tank1, &state.tank2] {
            let surface = state.terrain.surface_row(tank.col).unwrap();
            assert_eq!(tank.row + tank.height, surface);
        }
    }

    #[test]
    fn test_environment_ranges() {
        let mut state = GameState::new(7);
        for _ in 0..200 {
            state.reroll_environment();
            let env = state.environment;
            assert!((-0.02..0.02).contains(&env.wind));
            assert!((0.1..0.35).contains(&env.gravity));
        }
    }

    #[test]
    fn test_tank_clamps() {
        let settings = Settings::default();
        let mut tank = Tank::new(PlayerId::One, 10, -45.0, &settings);
        tank.adjust_aim(-500.0);
        assert_eq!(tank.angle, -180.0);
        tank.adjust_aim(500.0);
        assert_eq!(tank.angle, 0.0);
        tank.adjust_power(1000.0);
        assert_eq!(tank.power, 100.0);
        tank.adjust_power(-1000.0);
        assert_eq!(tank.power, 0.0);
        tank.apply_damage(250.0);
        assert_eq!(tank.health, 0.0);
        assert!(!tank.is_alive());
    }

    #[test]
    fn test_projectile_launch_geometry() {
        let settings = Settings::default();
        let mut tank = Tank::new(PlayerId::One, 10, -90.0, &settings);
        tank.row = 50;
        tank.power = 50.0;
        let env = Environment { wind: 0.01, gravity: 0.3 };
        let p = Projectile::launch(&tank, env, false);

        // Straight up from the top centre, barrel length away
        assert!((p.pos.x - 52.0).abs() < 1e-4);
        assert!((p.pos.y - 180.0).abs() < 1e-4);
        assert!(p.vel.x.abs() < 1e-4);
        assert!((p.vel.y + 10.0).abs() < 1e-4);
        assert_eq!(p.gravity, Vec2::new(0.0, 0.3));
        assert_eq!(p.wind, 0.01);
    }

    #[test]
    fn test_wind_strength_display() {
        assert_eq!(Environment { wind: 0.004, gravity: 0.2 }.wind_strength(), 0);
        assert_eq!(Environment { wind: -0.02, gravity: 0.2 }.wind_strength(), -10);
        assert!((Environment { wind: 0.0, gravity: 0.3 }.gravity_g() - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_outcome_only_when_over() {
        let mut state = GameState::new(1);
        assert_eq!(state.outcome(), None);
        state.state = MatchState::GameOver;
        assert_eq!(state.outcome(), Some(MatchOutcome::Draw));
        state.tank2.apply_damage(10.0);
        assert_eq!(state.outcome(), Some(MatchOutcome::Winner(PlayerId::One)));
    }
}
