use bevy::prelude::*;

use crate::config::{WIND_CULL_DISTANCE, WIND_PLANE_MIN_DISTANCE};
use crate::frame::FrameContext;
use crate::particles::Particle;

use super::types::{Plane, WindEffect};

impl WindEffect {
    /// Rebuilds the bounding planes from a gust origin, velocity and size.
    pub fn update_params(&mut self, point: Vec3, velocity: Vec3, size: Vec3) {
        self.point = point;
        self.velocity = velocity;
        self.size = Vec3::new(size.x, size.y * 2.0, size.z * 2.0);

        let n0 = velocity.try_normalize().unwrap_or(Vec3::X);
        let d0 = point.dot(n0);

        let n1 = (point - n0 * d0)
            .try_normalize()
            .unwrap_or_else(|| n0.any_orthonormal_vector());

        let n2 = n0.cross(n1).normalize_or_zero();

        self.planes = [
            Plane {
                normal: n0,
                dist: d0,
            },
            Plane {
                normal: n1,
                dist: point.dot(n1),
            },
            Plane {
                normal: n2,
                dist: point.dot(n2),
            },
        ];
        self.max_distance = self.size.to_array();
        for (plane, extent) in self.planes.iter_mut().zip(self.max_distance) {
            plane.dist -= extent / 2.0;
        }
        self.num_planes = 3;
    }

    /// Whether `position` lies inside the gust box. Returns the distance to
    /// the source plane when it does.
    pub fn contains(&self, position: Vec3) -> Option<f32> {
        let mut source_distance = 0.0;
        for (i, plane) in self.planes[..self.num_planes].iter().enumerate() {
            let d = plane.distance_to(position);
            if !(WIND_PLANE_MIN_DISTANCE..=self.max_distance[i]).contains(&d) {
                return None;
            }
            if i == 0 {
                source_distance = d;
            }
        }
        Some(source_distance)
    }

    pub fn update(&mut self, particles: &mut [Particle], frame: &FrameContext<'_>) {
        if !self.is_enabled {
            return;
        }
        if !self.is_global && frame.view.origin.distance(self.point) > WIND_CULL_DISTANCE {
            return;
        }

        debug_assert_eq!(self.affected_particles.len(), particles.len());

        let push = self.velocity * frame.elapsed;
        let mut affected_particles = std::mem::take(&mut self.affected_particles);
        for (particle, counter) in particles.iter_mut().zip(affected_particles.iter_mut()) {
            if *counter > 0 {
                *counter -= 1;
                continue;
            }

            let source_distance = if self.is_global {
                0.0
            } else {
                match self.contains(particle.position) {
                    Some(d) => d,
                    None => continue,
                }
            };

            let falloff = if self.max_distance[0] > 0.0 {
                source_distance / self.max_distance[0]
            } else {
                0.0
            };
            *counter = (self.affected_duration as f32 * (1.0 - falloff)) as i32;
            particle.velocity += push;
        }
        self.affected_particles = affected_particles;
    }
}
