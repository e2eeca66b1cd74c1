use bevy::prelude::*;

use crate::config::WIND_AFFECTED_DURATION;

/// Plane `normal · p = dist`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub dist: f32,
}

impl Plane {
    /// Signed distance of `point` along the normal.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        point.dot(self.normal) - self.dist
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindEffect {
    pub point: Vec3,
    pub velocity: Vec3,
    /// Working size: x as given, y and z doubled.
    pub size: Vec3,
    pub planes: [Plane; 3],
    pub max_distance: [f32; 3],
    pub num_planes: usize,
    /// Cool-down frames granted to a particle pushed right at the source plane.
    pub affected_duration: i32,
    /// Remaining cool-down per particle; same length as the owning pool.
    pub affected_particles: Vec<i32>,
    pub is_global: bool,
    pub is_enabled: bool,
}

impl WindEffect {
    pub fn new(particle_count: usize, is_global: bool) -> Self {
        Self {
            point: Vec3::ZERO,
            velocity: Vec3::ZERO,
            size: Vec3::ZERO,
            planes: [Plane::default(); 3],
            max_distance: [0.0; 3],
            num_planes: 0,
            affected_duration: WIND_AFFECTED_DURATION,
            affected_particles: vec![0; particle_count],
            is_global,
            is_enabled: true,
        }
    }

    pub fn enable(&mut self) {
        self.is_enabled = true;
    }

    pub fn disable(&mut self) {
        self.is_enabled = false;
    }

    /// Velocity of a global (constant) wind; the box is left untouched.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }
}
