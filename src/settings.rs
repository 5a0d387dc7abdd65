//! Tunable game settings
//!
//! Read from a JSON file at startup. Anything missing falls back to the
//! defaults the sketches were balanced with.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Artillery ===
    /// Shots each tank gets for the whole match
    pub shots_per_tank: u32,
    /// Starting health for both tanks
    pub starting_health: f32,
    /// Wind is rolled uniformly from [wind_min, wind_max)
    pub wind_min: f32,
    pub wind_max: f32,
    /// Gravity is rolled uniformly from [gravity_min, gravity_max)
    pub gravity_min: f32,
    pub gravity_max: f32,
    /// Noise value above which subsurface cells become stone
    pub stone_threshold: f32,

    // === Runner ===
    /// Scroll speed at the start of a run
    pub runner_initial_speed: f32,
    /// Speed added every tick
    pub runner_speed_increase: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shots_per_tank: 10,
            starting_health: 100.0,
            wind_min: -0.02,
            wind_max: 0.02,
            gravity_min: 0.1,
            gravity_max: 0.35,
            stone_threshold: 0.65,

            runner_initial_speed: 6.0,
            runner_speed_increase: 0.001,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Repair inverted or degenerate ranges so sampling never panics
    fn sanitized(mut self) -> Self {
        if !(self.wind_min < self.wind_max) {
            log::warn!(
                "Invalid wind range [{}, {}), using defaults",
                self.wind_min,
                self.wind_max
            );
            let d = Self::default();
            self.wind_min = d.wind_min;
            self.wind_max = d.wind_max;
        }
        if !(self.gravity_min < self.gravity_max) || self.gravity_min <= 0.0 {
            log::warn!(
                "Invalid gravity range [{}, {}), using defaults",
                self.gravity_min,
                self.gravity_max
            );
            let d = Self::default();
            self.gravity_min = d.gravity_min;
            self.gravity_max = d.gravity_max;
        }
        if self.shots_per_tank == 0 {
            log::warn!("shots_per_tank must be at least 1, using 1");
            self.shots_per_tank = 1;
        }
        self.starting_health = self.starting_health.clamp(1.0, crate::consts::MAX_HEALTH);
        if self.runner_initial_speed <= 0.0 {
            self.runner_initial_speed = Self::default().runner_initial_speed;
        }
        self
    }
}
