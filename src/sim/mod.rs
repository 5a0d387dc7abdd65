//! Deterministic artillery simulation
//!
//! All gameplay logic for the tank duel lives here. This module must be
//! pure and deterministic:
//! - One logical step per tick, no wall-clock time
//! - Seeded RNG only
//! - No rendering or input-device dependencies

pub mod ballistics;
pub mod explosion;
pub mod noise;
pub mod snapshot;
pub mod state;
pub mod terrain;
pub mod tick;

pub use ballistics::{FlightOutcome, step_projectile};
pub use explosion::{BlastProfile, ExplosionReport, explode};
pub use snapshot::{MatchSnapshot, ProjectileSnapshot, TankSnapshot};
pub use state::{
    BASE_GRAVITY, Environment, GameState, MatchOutcome, MatchState, PlayerId, Projectile, Tank,
};
pub use terrain::{Material, TerrainGrid};
pub use tick::{TickInput, adjust_aim, adjust_power, fire, request_reset, tick};
