//! Deterministic RNG resource.
//!
//! Wraps `ChaCha8Rng` for cross-platform deterministic randomness. Every
//! particle spawn, gust roll and fog window pick draws from the same
//! `SimRng`, so identical seeds and inputs produce identical frames.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Default seed used when no explicit seed is provided.
const DEFAULT_SEED: u64 = 42;

#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl SimRng {
    /// Create a new `SimRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniform float between `min` and `max`.
    ///
    /// The bounds may be given in either order; `flrand(5.0, 1.0)` yields a
    /// value in `[1, 5]`. Several velocity ranges rely on this.
    pub fn flrand(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.0.gen::<f32>()
    }

    /// Uniform integer in the inclusive range `[min, max]`.
    pub fn irand(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.0.gen_range(min..=max)
    }

    /// Random unit vector in the horizontal (XY) plane.
    pub fn horizontal_direction(&mut self) -> Vec3 {
        loop {
            let v = Vec3::new(self.flrand(-1.0, 1.0), self.flrand(-1.0, 1.0), 0.0);
            if let Some(dir) = v.try_normalize() {
                return dir;
            }
        }
    }
}
