//! Explosion resolution
//!
//! Clears sand inside the blast circle, applies distance-falloff damage to
//! both tanks and keeps the shooter's hit streak up to date.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{PlayerId, Tank};
use super::terrain::{Material, TerrainGrid};
use crate::consts::*;
use crate::map_range;

/// Blast parameters for one shot type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastProfile {
    /// Radius in pixel units
    pub radius: f32,
    /// Damage at the centre
    pub max_damage: f32,
    /// Damage at the edge of reach
    pub min_damage: f32,
}

impl BlastProfile {
    pub fn for_shot(big_shot: bool) -> Self {
        if big_shot {
            Self {
                radius: BIG_BLAST_RADIUS,
                max_damage: BIG_MAX_DAMAGE,
                min_damage: BIG_MIN_DAMAGE,
            }
        } else {
            Self {
                radius: BLAST_RADIUS,
                max_damage: MAX_DAMAGE,
                min_damage: MIN_DAMAGE,
            }
        }
    }

    /// Radius in whole cells
    #[inline]
    pub fn grid_radius(&self) -> i32 {
        (self.radius / CELL_SIZE).floor() as i32
    }

    /// Furthest a tank centre can be and still take damage
    #[inline]
    pub fn reach(&self, tank_width_cells: i32) -> f32 {
        self.radius + tank_width_cells as f32 * CELL_SIZE / 2.0
    }

    /// Damage at `distance` from the blast for a tank of the given width
    pub fn damage_at(&self, distance: f32, tank_width_cells: i32) -> f32 {
        let reach = self.reach(tank_width_cells);
        if distance < reach {
            map_range(distance, 0.0, reach, self.max_damage, self.min_damage)
        } else {
            0.0
        }
    }
}

/// What an explosion did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionReport {
    /// Impact point in pixel units
    pub center: Vec2,
    pub radius: f32,
    pub big_shot: bool,
    pub damage_to_tank1: f32,
    pub damage_to_tank2: f32,
    pub cells_cleared: u32,
}

impl ExplosionReport {
    pub fn damage_to(&self, player: PlayerId) -> f32 {
        match player {
            PlayerId::One => self.damage_to_tank1,
            PlayerId::Two => self.damage_to_tank2,
        }
    }
}

/// Turn sand into air within `grid_radius` cells of `center`
///
/// Returns the number of cells cleared. Stone is never touched.
pub fn carve_crater(terrain: &mut TerrainGrid, center: Vec2, grid_radius: i32) -> u32 {
    let cx = (center.x / CELL_SIZE).floor() as i32;
    let cy = (center.y / CELL_SIZE).floor() as i32;
    let r2 = grid_radius * grid_radius;
    let mut cleared = 0;

    for i in -grid_radius..=grid_radius {
        for j in -grid_radius..=grid_radius {
            if i * i + j * j > r2 {
                continue;
            }
            let (col, row) = (cx + i, cy + j);
            if terrain.cell_at(col, row) == Some(Material::Sand) {
                terrain.set_cell(col, row, Material::Air);
                cleared += 1;
            }
        }
    }
    cleared
}

/// Damage one tank; returns the damage rolled (before the zero floor)
pub fn damage_tank(tank: &mut Tank, center: Vec2, profile: &BlastProfile) -> f32 {
    let distance = center.distance(tank.center());
    let damage = profile.damage_at(distance, tank.width);
    if damage > 0.0 {
        tank.apply_damage(damage);
    }
    damage
}

/// Update the shooter's streak after a non-big shot
pub fn update_streak(shooter: &mut Tank, damage_to_opponent: f32) {
    if damage_to_opponent >= STREAK_HIT_DAMAGE {
        shooter.consecutive_hits += 1;
        if shooter.big_shot_ready() {
            log::info!("{:?} has a big shot ready", shooter.player);
        }
    } else {
        shooter.consecutive_hits = 0;
    }
}

/// Resolve a full explosion against the terrain and both tanks
pub fn explode(
    terrain: &mut TerrainGrid,
    tank1: &mut Tank,
    tank2: &mut Tank,
    center: Vec2,
    owner: PlayerId,
    big_shot: bool,
) -> ExplosionReport {
    let profile = BlastProfile::for_shot(big_shot);
    let cells_cleared = carve_crater(terrain, center, profile.grid_radius());

    let damage_to_tank1 = damage_tank(tank1, center, &profile);
    let damage_to_tank2 = damage_tank(tank2, center, &profile);

    // Big shots already consumed the streak when fired
    if !big_shot {
        match owner {
            PlayerId::One => update_streak(tank1, damage_to_tank2),
            PlayerId::Two => update_streak(tank2, damage_to_tank1),
        }
    }

    log::debug!(
        "Explosion at ({:.1}, {:.1}) r={} cleared={} dmg=({:.1}, {:.1})",
        center.x,
        center.y,
        profile.radius,
        cells_cleared,
        damage_to_tank1,
        damage_to_tank2
    );

    ExplosionReport {
        center,
        radius: profile.radius,
        big_shot,
        damage_to_tank1,
        damage_to_tank2,
        cells_cleared,
    }
}
