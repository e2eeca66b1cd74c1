//! Snow system state.

use std::num::NonZeroUsize;

use bevy::prelude::*;

use crate::config::{
    SENTINEL_POSITION, SNOWCONTENTS_X_SIZE, SNOWCONTENTS_Y_SIZE, SNOWCONTENTS_Z_SIZE,
};
use crate::effects::{EffectId, EffectList};
use crate::particles::Particle;
use crate::settings::SnowParams;
use crate::wind::WindEffect;
use crate::world_query::Contents;

/// Cached world classification around the camera, `[z][y][x]`.
pub type SnowContents = [[[Contents; SNOWCONTENTS_X_SIZE]; SNOWCONTENTS_Y_SIZE]; SNOWCONTENTS_Z_SIZE];

/// Grid resolution per axis.
pub const SNOWCONTENTS_DIMS: [usize; 3] = [SNOWCONTENTS_X_SIZE, SNOWCONTENTS_Y_SIZE, SNOWCONTENTS_Z_SIZE];

#[derive(Debug, Clone)]
pub struct SnowSystem {
    pub alpha: f32,
    pub min_spread: Vec3,
    pub max_spread: Vec3,
    pub min_velocity: Vec3,
    pub max_velocity: Vec3,

    // Gust schedule
    pub wind_duration: f32,
    pub wind_low: f32,
    pub wind_min: f32,
    pub wind_max: f32,
    pub wind_size: Vec3,
    pub next_wind_gust: f32,
    pub wind_low_size: f32,
    /// The gust wind effect in the owning system's effect list.
    pub wind_gust: Option<EffectId>,

    // Drift wind (frames until the next re-roll)
    pub wind_direction: Vec3,
    pub wind_speed: Vec3,
    pub wind_change: i32,

    // Camera box and occupancy grid
    pub mins: Vec3,
    pub maxs: Vec3,
    pub contents: Box<SnowContents>,
    pub contents_size: Vec3,
    pub contents_start: Vec3,
    pub overall_contents: Contents,

    pub velocity_stabilize: f32,
}

impl SnowSystem {
    pub fn new(params: &SnowParams) -> Self {
        Self {
            alpha: params.alpha,
            min_spread: params.min_spread,
            max_spread: params.max_spread,
            min_velocity: params.min_velocity,
            max_velocity: params.max_velocity,
            wind_duration: params.wind_duration,
            wind_low: params.wind_low,
            wind_min: params.wind_min,
            wind_max: params.wind_max,
            wind_size: params.wind_size,
            next_wind_gust: 0.0,
            wind_low_size: 0.0,
            wind_gust: None,
            wind_direction: Vec3::ZERO,
            wind_speed: Vec3::ZERO,
            wind_change: 0,
            mins: Vec3::splat(SENTINEL_POSITION),
            maxs: Vec3::splat(SENTINEL_POSITION),
            contents: Box::new([[[Contents::EMPTY; SNOWCONTENTS_X_SIZE]; SNOWCONTENTS_Y_SIZE];
                SNOWCONTENTS_Z_SIZE]),
            contents_size: contents_size(params.min_spread, params.max_spread),
            contents_start: Vec3::ZERO,
            overall_contents: Contents::EMPTY,
            velocity_stabilize: params.velocity_stabilize,
        }
    }

    /// Replaces the spread box and forces a re-bucket on the next update.
    pub fn set_spread(&mut self, min_spread: Vec3, max_spread: Vec3) {
        self.min_spread = min_spread;
        self.max_spread = max_spread;
        self.contents_size = contents_size(min_spread, max_spread);
        self.mins = Vec3::splat(SENTINEL_POSITION);
        self.maxs = Vec3::splat(SENTINEL_POSITION);
    }

    /// Grid cell holding `position`, if inside the grid.
    pub fn cell_of(&self, position: Vec3) -> Option<[usize; 3]> {
        let rel = ((position - self.contents_start) / self.contents_size).floor();
        let mut cell = [0usize; 3];
        for axis in 0..3 {
            let c = rel[axis];
            if !(c >= 0.0 && c < SNOWCONTENTS_DIMS[axis] as f32) {
                return None;
            }
            cell[axis] = c as usize;
        }
        Some(cell)
    }

    pub fn contents_at(&self, [x, y, z]: [usize; 3]) -> Contents {
        self.contents[z][y][x]
    }
}

fn contents_size(min_spread: Vec3, max_spread: Vec3) -> Vec3 {
    (max_spread - min_spread)
        / Vec3::new(
            SNOWCONTENTS_X_SIZE as f32,
            SNOWCONTENTS_Y_SIZE as f32,
            SNOWCONTENTS_Z_SIZE as f32,
        )
}

/// Pieces of a snow [`EffectSystem`](crate::effect_systems::EffectSystem)
/// created by [`init_snow_system`].
pub struct SnowParts {
    pub snow: SnowSystem,
    pub particles: Vec<Particle>,
    pub effects: EffectList,
}

/// Builds the state of a new snow system with `count` parked particles and
/// its (initially disabled) gust wind.
pub fn init_snow_system(count: NonZeroUsize, params: &SnowParams) -> SnowParts {
    let mut snow = SnowSystem::new(params);
    let particles = vec![Particle::parked(); count.get()];

    let mut effects = EffectList::default();
    let mut gust = WindEffect::new(count.get(), false);
    gust.disable();
    snow.wind_gust = Some(effects.add(gust));

    SnowParts {
        snow,
        particles,
        effects,
    }
}
