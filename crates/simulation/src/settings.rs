//! Runtime-tunable defaults for the world effect systems.
//!
//! `WorldEffectsSettings` is a plain serde resource: the app may load it from
//! a JSON file before the plugin starts, otherwise the built-in defaults apply.
//! Values here seed new systems on `init`; live systems are changed through
//! console commands instead.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// =============================================================================
// Snow
// =============================================================================

/// Initial parameters for a freshly initialized snow system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowParams {
    pub alpha: f32,
    pub min_spread: Vec3,
    pub max_spread: Vec3,
    pub min_velocity: Vec3,
    pub max_velocity: Vec3,
    /// Seconds between gusts (rescheduled uniformly in `[d, 2d]`).
    pub wind_duration: f32,
    /// Seconds of calm before the next gust is rolled.
    pub wind_low: f32,
    pub wind_min: f32,
    pub wind_max: f32,
    pub wind_size: Vec3,
    /// Horizontal pull-back rate applied when a flake leaves its velocity bounds.
    pub velocity_stabilize: f32,
}

impl Default for SnowParams {
    fn default() -> Self {
        Self {
            alpha: 0.09,
            min_spread: Vec3::new(-600.0, -600.0, -200.0),
            max_spread: Vec3::new(600.0, 600.0, 250.0),
            min_velocity: Vec3::new(-15.0, -15.0, -20.0),
            max_velocity: Vec3::new(15.0, 15.0, -70.0),
            wind_duration: 2.0,
            wind_low: 3.0,
            wind_min: 30.0,
            wind_max: 70.0,
            wind_size: Vec3::new(1000.0, 300.0, 300.0),
            velocity_stabilize: 18.0,
        }
    }
}

/// First axis on which `max` does not lie above `min`, if any.
///
/// A collapsed axis gives the occupancy grid zero-sized cells.
pub fn collapsed_axis(min: Vec3, max: Vec3) -> Option<usize> {
    (0..3).find(|&axis| max[axis] <= min[axis])
}

// =============================================================================
// Rain
// =============================================================================

/// Initial parameters for a freshly initialized rain system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainParams {
    /// Length of a rain streak in world units.
    pub rain_height: f32,
    pub alpha: f32,
    pub wind_angle: f32,
    /// Angle range, radius and depth of the camera-relative spawn cylinder.
    pub spread: Vec3,
    pub min_velocity: Vec3,
    pub max_velocity: Vec3,
}

impl Default for RainParams {
    fn default() -> Self {
        Self {
            rain_height: 5.0,
            alpha: 0.1,
            wind_angle: 1.0,
            spread: Vec3::new(std::f32::consts::TAU, 20.0, 20.0),
            min_velocity: Vec3::new(0.1, 0.1, -60.0),
            max_velocity: Vec3::new(-0.1, -0.1, -50.0),
        }
    }
}

// =============================================================================
// Resource
// =============================================================================

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldEffectsSettings {
    pub snow: SnowParams,
    pub rain: RainParams,
    /// Console commands executed once at startup, in order.
    pub startup_commands: Vec<String>,
    pub rng_seed: u64,
}

impl Default for WorldEffectsSettings {
    fn default() -> Self {
        Self {
            snow: SnowParams::default(),
            rain: RainParams::default(),
            startup_commands: Vec::new(),
            rng_seed: 42,
        }
    }
}

impl WorldEffectsSettings {
    /// Rejects values that `init` would turn into a degenerate system.
    pub fn validate(&self) -> Result<(), InvalidSetting> {
        if let Some(axis) = collapsed_axis(self.snow.min_spread, self.snow.max_spread) {
            return Err(InvalidSetting {
                field: "snow.max_spread",
                value: self.snow.max_spread[axis],
                reason: "must be greater than snow.min_spread on every axis",
            });
        }
        let spread = self.rain.spread;
        if let Some(value) = [spread.y, spread.z].into_iter().find(|v| *v <= 0.0) {
            return Err(InvalidSetting {
                field: "rain.spread",
                value,
                reason: "radius and height must be positive",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvalidSetting {
    pub field: &'static str,
    pub value: f32,
    pub reason: &'static str,
}

impl fmt::Display for InvalidSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}: {}", self.field, self.value, self.reason)
    }
}

impl std::error::Error for InvalidSetting {}
