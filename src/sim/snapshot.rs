//! Read-only view of a match for renderers
//!
//! Owned and serializable so it can be handed across a JS boundary or
//! written out for debugging without touching the live state.

use serde::{Deserialize, Serialize};

use super::state::{GameState, MatchOutcome, MatchState, PlayerId, Tank};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankSnapshot {
    pub player: PlayerId,
    pub col: i32,
    pub row: i32,
    pub width: i32,
    pub height: i32,
    pub angle: f32,
    pub power: f32,
    pub health: f32,
    pub shots_left: u32,
    pub consecutive_hits: u32,
    pub big_shot_ready: bool,
}

impl From<&Tank> for TankSnapshot {
    fn from(tank: &Tank) -> Self {
        Self {
            player: tank.player,
            col: tank.col,
            row: tank.row,
            width: tank.width,
            height: tank.height,
            angle: tank.angle,
            power: tank.power,
            health: tank.health,
            shots_left: tank.shots_left,
            consecutive_hits: tank.consecutive_hits,
            big_shot_ready: tank.big_shot_ready(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub x: f32,
    pub y: f32,
    pub big_shot: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub tick: u64,
    pub state: MatchState,
    pub outcome: Option<MatchOutcome>,
    pub cols: i32,
    pub rows: i32,
    /// Column-major material tags (0 air, 1 sand, 2 stone)
    pub cells: Vec<u8>,
    pub tanks: [TankSnapshot; 2],
    pub projectile: Option<ProjectileSnapshot>,
    pub wind: f32,
    pub wind_strength: i32,
    pub gravity: f32,
    pub gravity_g: f32,
}

impl GameState {
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            tick: self.time_ticks,
            state: self.state,
            outcome: self.outcome(),
            cols: self.terrain.cols(),
            rows: self.terrain.rows(),
            cells: self.terrain.cells().iter().map(|&m| m as u8).collect(),
            tanks: [
                TankSnapshot::from(&self.tank1),
                TankSnapshot::from(&self.tank2),
            ],
            projectile: self.projectile.as_ref().map(|p| ProjectileSnapshot {
                x: p.pos.x,
                y: p.pos.y,
                big_shot: p.big_shot,
            }),
            wind: self.environment.wind,
            wind_strength: self.environment.wind_strength(),
            gravity: self.environment.gravity,
            gravity_g: self.environment.gravity_g(),
        }
    }
}
