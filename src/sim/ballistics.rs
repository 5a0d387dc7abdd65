//! Projectile flight and collision
//!
//! One call advances the shot by one tick. Terrain lookups are always
//! bounds-checked first; the sky above the grid is open air.

use glam::Vec2;

use super::explosion::{ExplosionReport, explode};
use super::state::{Projectile, Tank};
use super::terrain::{Material, TerrainGrid};
use crate::consts::*;

/// Result of advancing a flight by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightOutcome {
    /// Still travelling (possibly after a stone bounce)
    InFlight,
    /// Left the playfield sideways or through the bottom; no explosion
    OutOfBounds,
    /// Hit sand or a tank and exploded
    Impact(ExplosionReport),
}

impl FlightOutcome {
    /// Whether the flight is over
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FlightOutcome::InFlight)
    }
}

/// Grid cell containing a pixel-space point
#[inline]
pub fn cell_of(p: Vec2) -> (i32, i32) {
    (
        (p.x / CELL_SIZE).floor() as i32,
        (p.y / CELL_SIZE).floor() as i32,
    )
}

/// Advance a projectile by one tick
pub fn step_projectile(
    projectile: &mut Projectile,
    terrain: &mut TerrainGrid,
    tank1: &mut Tank,
    tank2: &mut Tank,
) -> FlightOutcome {
    projectile.age_ticks += 1;
    if projectile.age_ticks > MAX_FLIGHT_TICKS {
        log::warn!("Projectile exceeded {} ticks, discarding", MAX_FLIGHT_TICKS);
        return FlightOutcome::OutOfBounds;
    }

    projectile.vel += projectile.gravity;
    projectile.vel.x += projectile.wind;

    let mut next = projectile.pos + projectile.vel;
    let (col, row) = cell_of(next);

    if col < 0 || col >= terrain.cols() || next.y > FIELD_HEIGHT {
        return FlightOutcome::OutOfBounds;
    }

    match terrain.cell_at(col, row) {
        Some(Material::Stone) => {
            projectile.vel.y *= -STONE_RESTITUTION;
            projectile.vel.x *= STONE_FRICTION;
            next = projectile.pos;
            log::debug!("Bounce off stone at cell ({}, {})", col, row);
            if projectile.vel.length() < REST_SPEED {
                projectile.settling_bounces += 1;
                if projectile.settling_bounces >= REST_BOUNCES {
                    log::debug!("Projectile came to rest at {:?}", projectile.pos);
                    return impact(projectile, terrain, tank1, tank2);
                }
            }
        }
        Some(Material::Sand) => {
            return impact(projectile, terrain, tank1, tank2);
        }
        Some(Material::Air) | None => {}
    }

    if tank1.contains_point(next) || tank2.contains_point(next) {
        return impact(projectile, terrain, tank1, tank2);
    }

    projectile.pos = next;
    FlightOutcome::InFlight
}

/// Explode at the projectile's current (pre-collision) position
fn impact(
    projectile: &Projectile,
    terrain: &mut TerrainGrid,
    tank1: &mut Tank,
    tank2: &mut Tank,
) -> FlightOutcome {
    let report = explode(
        terrain,
        tank1,
        tank2,
        projectile.pos,
        projectile.owner,
        projectile.big_shot,
    );
    FlightOutcome::Impact(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::PlayerId;

    struct Rig {
        terrain: TerrainGrid,
        tank1: Tank,
        tank2: Tank,
    }

    impl Rig {
        /// 200x150 grid, sand floor from row 120, tanks parked on it
        fn new() -> Self {
            let mut terrain = TerrainGrid::empty(200, 150);
            for col in 0..200 {
                for row in 120..150 {
                    terrain.set_cell(col, row, Material::Sand);
                }
            }
            let settings = Settings::default();
            let mut tank1 = Tank::new(PlayerId::One, 30, -45.0, &settings);
            let mut tank2 = Tank::new(PlayerId::Two, 170, -135.0, &settings);
            tank1.drop_to_ground(&terrain);
            tank2.drop_to_ground(&terrain);
            Self { terrain, tank1, tank2 }
        }

        fn step(&mut self, p: &mut Projectile) -> FlightOutcome {
            step_projectile(p, &mut self.terrain, &mut self.tank1, &mut self.tank2)
        }
    }

    fn shot(pos: Vec2, vel: Vec2, gravity: f32, wind: f32) -> Projectile {
        Projectile {
            pos,
            vel,
            gravity: Vec2::new(0.0, gravity),
            wind,
            owner: PlayerId::One,
            big_shot: false,
            age_ticks: 0,
            settling_bounces: 0,
        }
    }

    #[test]
    fn test_free_flight_applies_gravity_and_wind() {
        let mut rig = Rig::new();
        let mut p = shot(Vec2::new(400.0, 100.0), Vec2::new(1.0, 0.0), 0.2, 0.01);
        assert_eq!(rig.step(&mut p), FlightOutcome::InFlight);
        assert!((p.vel.x - 1.01).abs() < 1e-6);
        assert!((p.vel.y - 0.2).abs() < 1e-6);
        assert!((p.pos.x - 401.01).abs() < 1e-4);
        assert!((p.pos.y - 100.2).abs() < 1e-4);
    }

    #[test]
    fn test_leaving_sideways_ends_flight() {
        let mut rig = Rig::new();
        let mut p = shot(Vec2::new(1.0, 100.0), Vec2::new(-5.0, 0.0), 0.2, 0.0);
        assert_eq!(rig.step(&mut p), FlightOutcome::OutOfBounds);

        let mut p = shot(Vec2::new(798.0, 100.0), Vec2::new(5.0, 0.0), 0.2, 0.0);
        assert_eq!(rig.step(&mut p), FlightOutcome::OutOfBounds);
    }

    #[test]
    fn test_above_grid_is_open_sky() {
        let mut rig = Rig::new();
        let mut p = shot(Vec2::new(400.0, -50.0), Vec2::new(0.0, -3.0), 0.2, 0.0);
        assert_eq!(rig.step(&mut p), FlightOutcome::InFlight);
        assert!(p.pos.y < -50.0);
    }

    #[test]
    fn test_sand_explodes_at_previous_position() {
        let mut rig = Rig::new();
        let start = Vec2::new(400.0, 478.0);
        let mut p = shot(start, Vec2::new(0.0, 3.0), 0.2, 0.0);
        let sand_before = rig.terrain.count(Material::Sand);
        match rig.step(&mut p) {
            FlightOutcome::Impact(report) => {
                assert_eq!(report.center, start);
                assert!(report.cells_cleared > 0);
            }
            other => panic!("expected impact, got {:?}", other),
        }
        assert!(rig.terrain.count(Material::Sand) < sand_before);
    }

    #[test]
    fn test_stone_bounces_in_place() {
        let mut rig = Rig::new();
        rig.terrain.set_cell(100, 119, Material::Stone);
        let start = Vec2::new(402.0, 474.0);
        let mut p = shot(start, Vec2::new(1.0, 2.0), 0.2, 0.0);

        assert_eq!(rig.step(&mut p), FlightOutcome::InFlight);
        assert_eq!(p.pos, start);
        assert!((p.vel.y - (-2.2 * 0.7)).abs() < 1e-5);
        assert!((p.vel.x - 0.8).abs() < 1e-5);
        assert_eq!(rig.terrain.cell_at(100, 119), Some(Material::Stone));
    }

    #[test]
    fn test_tank_hit_explodes_and_damages() {
        let mut rig = Rig::new();
        let target = rig.tank2.center();
        // One tick away from the tank body, moving horizontally into it
        let start = target - Vec2::new(14.0, 0.0);
        let mut p = shot(start, Vec2::new(3.0, -0.2), 0.2, 0.0);
        match rig.step(&mut p) {
            FlightOutcome::Impact(report) => {
                assert!(report.damage_to_tank2 > 20.0);
                assert_eq!(report.damage_to_tank1, 0.0);
            }
            other => panic!("expected impact, got {:?}", other),
        }
        assert!(rig.tank2.health < 80.0);
    }

    #[test]
    fn test_flight_always_terminates() {
        let mut rig = Rig::new();
        let mut p = shot(Vec2::new(150.0, 300.0), Vec2::new(4.0, -6.0), 0.1, 0.02);
        let mut ticks = 0;
        while !rig.step(&mut p).is_terminal() {
            ticks += 1;
            assert!(ticks < 2000, "flight did not end");
        }
    }

    #[test]
    fn test_shot_resting_on_stone_detonates() {
        let mut rig = Rig::new();
        for col in 90..110 {
            rig.terrain.set_cell(col, 119, Material::Stone);
        }
        let mut p = shot(Vec2::new(402.0, 470.0), Vec2::ZERO, 0.2, 0.0);
        let mut ticks = 0;
        let outcome = loop {
            let outcome = rig.step(&mut p);
            if outcome.is_terminal() {
                break outcome;
            }
            ticks += 1;
            assert!(ticks < 600, "resting shot never detonated");
        };
        match outcome {
            FlightOutcome::Impact(report) => {
                assert_eq!(p.settling_bounces, REST_BOUNCES);
                assert!(report.center.y < 476.0);
                assert!((report.center.x - 402.0).abs() < 1e-4);
            }
            other => panic!("expected impact, got {:?}", other),
        }
        // Stone survives the blast
        assert_eq!(rig.terrain.cell_at(100, 119), Some(Material::Stone));
    }

    #[test]
    fn test_stuck_projectile_is_discarded() {
        let mut rig = Rig::new();
        let mut p = shot(Vec2::new(400.0, 100.0), Vec2::ZERO, 0.0, 0.0);
        p.age_ticks = MAX_FLIGHT_TICKS;
        assert_eq!(rig.step(&mut p), FlightOutcome::OutOfBounds);
    }
}
