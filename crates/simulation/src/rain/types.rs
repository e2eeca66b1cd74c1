use std::num::NonZeroUsize;

use bevy::prelude::*;

use crate::config::RAIN_SPAWN_HEIGHT;
use crate::effects::EffectList;
use crate::particles::{Particle, ParticleFlags};
use crate::render_backend::{TextureId, RAIN_TEXTURE};
use crate::settings::RainParams;
use crate::sim_rng::SimRng;

/// Rain drops in camera-relative cylindrical space.
///
/// A particle's `position` is `(angle, radius, height)` around the camera and
/// its `velocity` is the rate of change of those three.
#[derive(Debug, Clone)]
pub struct RainSystem {
    /// Streak length in world units.
    pub rain_height: f32,
    pub alpha: f32,
    pub wind_angle: f32,
    /// `(angle range, radius, depth below the camera)`.
    pub spread: Vec3,
    pub min_velocity: Vec3,
    pub max_velocity: Vec3,
    pub wind_direction: Vec3,
    pub new_wind_direction: Vec3,
    pub wind_change: i32,
    pub fade_alpha: f32,
    pub texture: TextureId,
}

impl RainSystem {
    pub fn new(params: &RainParams) -> Self {
        Self {
            rain_height: params.rain_height,
            alpha: params.alpha,
            wind_angle: params.wind_angle,
            spread: params.spread,
            min_velocity: params.min_velocity,
            max_velocity: params.max_velocity,
            wind_direction: Vec3::ZERO,
            new_wind_direction: Vec3::ZERO,
            wind_change: 0,
            fade_alpha: 0.0,
            texture: RAIN_TEXTURE,
        }
    }

    /// A drop at a random angle and radius, at `height`.
    pub(crate) fn spawn_drop(&self, height: f32, rng: &mut SimRng) -> Particle {
        Particle {
            position: Vec3::new(
                rng.flrand(0.0, self.spread.x),
                rng.flrand(0.0, self.spread.y),
                height,
            ),
            velocity: Vec3::new(
                rng.flrand(self.min_velocity.x, self.max_velocity.x),
                rng.flrand(self.min_velocity.y, self.max_velocity.y),
                rng.flrand(self.min_velocity.z, self.max_velocity.z),
            ),
            flags: ParticleFlags::RENDER,
        }
    }
}

pub struct RainParts {
    pub rain: RainSystem,
    pub particles: Vec<Particle>,
    pub effects: EffectList,
}

/// Builds a rain system with `count` drops scattered through the cylinder.
pub fn init_rain_system(count: NonZeroUsize, params: &RainParams, rng: &mut SimRng) -> RainParts {
    let rain = RainSystem::new(params);
    let particles = (0..count.get())
        .map(|_| {
            let height = rng.flrand(-rain.spread.z, RAIN_SPAWN_HEIGHT);
            rain.spawn_drop(height, rng)
        })
        .collect();

    RainParts {
        rain,
        particles,
        effects: EffectList::default(),
    }
}
