//! Per-frame snow simulation and rendering.

use bevy::prelude::*;

use crate::config::{
    REBUCKET_THRESHOLD, SNOW_VELOCITY_JITTER, WIND_CHANGE_MAX_FRAMES, WIND_CHANGE_MIN_FRAMES,
    WIND_DRIFT_SPEED,
};
use crate::effects::{Effect, EffectList};
use crate::frame::{FrameContext, RenderContext};
use crate::misty_fog::update_fog_wind_direction;
use crate::particles::{Particle, ParticleFlags};
use crate::render_backend::{PointStyle, StateBits};
use crate::sim_rng::SimRng;
use crate::world_query::Contents;

use super::types::SnowSystem;

/// Horizontal and vertical reach of a freshly rolled gust around the camera.
const GUST_OFFSET: Vec3 = Vec3::new(100.0, 100.0, 50.0);

const SNOW_TINT: f32 = 0.8;

impl SnowSystem {
    /// Runs one frame of the snow simulation.
    ///
    /// `is_rendering` is the owning system's flag: it decides whether owned
    /// effects run this frame and is rewritten by the visibility gate.
    pub fn update(
        &mut self,
        particles: &mut [Particle],
        effects: &mut EffectList,
        is_rendering: &mut bool,
        frame: &mut FrameContext<'_>,
    ) {
        self.update_drift_wind(effects, frame.rng);

        if *is_rendering {
            effects.update_all(particles, frame);
        }

        self.update_wind_gust(effects, frame);

        let mins = frame.view.origin + self.min_spread;
        let maxs = frame.view.origin + self.max_spread;
        self.rebucket(particles, mins, maxs, frame);

        if !self.overall_contents.contains(Contents::OUTSIDE) {
            *is_rendering = false;
            return;
        }
        *is_rendering = true;

        self.integrate(particles, mins, maxs, frame.elapsed, frame.rng);
    }

    fn update_drift_wind(&mut self, effects: &mut EffectList, rng: &mut SimRng) {
        self.wind_change -= 1;
        if self.wind_change >= 0 {
            return;
        }
        self.wind_direction = rng.horizontal_direction();
        self.wind_speed = self.wind_direction * WIND_DRIFT_SPEED;
        self.wind_change = rng.irand(WIND_CHANGE_MIN_FRAMES, WIND_CHANGE_MAX_FRAMES);
        update_fog_wind_direction(effects, self.wind_speed);
    }

    fn update_wind_gust(&mut self, effects: &mut EffectList, frame: &mut FrameContext<'_>) {
        let Some(gust) = self
            .wind_gust
            .and_then(|id| effects.get_mut(id))
            .and_then(Effect::as_wind_mut)
        else {
            return;
        };

        self.next_wind_gust -= frame.elapsed;
        if self.next_wind_gust < 0.0 {
            gust.disable();
        }
        if self.next_wind_gust >= self.wind_low_size {
            return;
        }

        let rng = &mut *frame.rng;
        let velocity = rng.horizontal_direction() * rng.flrand(self.wind_min, self.wind_max);
        let point = frame.view.origin
            + Vec3::new(
                rng.flrand(-GUST_OFFSET.x, GUST_OFFSET.x),
                rng.flrand(-GUST_OFFSET.y, GUST_OFFSET.y),
                rng.flrand(-GUST_OFFSET.z, GUST_OFFSET.z),
            );
        gust.update_params(point, velocity, self.wind_size);
        gust.enable();

        self.next_wind_gust = rng.flrand(self.wind_duration, self.wind_duration * 2.0);
        self.wind_low_size = -rng.flrand(self.wind_low, self.wind_low * 3.0);
    }

    // -------------------------------------------------------------------------
    // Occupancy grid
    // -------------------------------------------------------------------------

    /// Re-samples the occupancy grid and refills the newly exposed part of
    /// the camera box once the box has moved past the threshold.
    fn rebucket(
        &mut self,
        particles: &mut [Particle],
        mins: Vec3,
        maxs: Vec3,
        frame: &mut FrameContext<'_>,
    ) {
        let moved = mins - self.mins;
        if moved.abs().max_element() <= REBUCKET_THRESHOLD {
            return;
        }

        let extent = maxs - mins;
        let mut start = mins;
        let mut difference = extent;
        for axis in 0..3 {
            let (from, to) = if moved[axis] > 0.0 {
                (self.maxs[axis].max(mins[axis]), maxs[axis])
            } else if moved[axis] < 0.0 {
                (mins[axis], self.mins[axis].min(maxs[axis]))
            } else {
                (mins[axis], maxs[axis])
            };
            if to > from {
                start[axis] = from;
                difference[axis] = (to - from).min(extent[axis]);
            }
        }

        self.contents_start = (mins / self.contents_size).floor() * self.contents_size;
        self.overall_contents = Contents::EMPTY;
        for (z, plane) in self.contents.iter_mut().enumerate() {
            for (y, row) in plane.iter_mut().enumerate() {
                for (x, cell) in row.iter_mut().enumerate() {
                    let center = self.contents_start
                        + (Vec3::new(x as f32, y as f32, z as f32) + 0.5) * self.contents_size;
                    *cell = frame.world.point_contents(center);
                    self.overall_contents |= *cell;
                }
            }
        }

        let rng = &mut *frame.rng;
        for particle in particles.iter_mut() {
            let mut repositioned = false;
            for axis in 0..3 {
                let p = particle.position[axis];
                if p < mins[axis] || p > maxs[axis] {
                    particle.position[axis] = start[axis] + rng.flrand(0.0, difference[axis]);
                    repositioned = true;
                }
            }
            if repositioned {
                self.reset_fall_velocity(particle, rng);
            }
        }

        self.mins = mins;
        self.maxs = maxs;
    }

    // -------------------------------------------------------------------------
    // Integration
    // -------------------------------------------------------------------------

    /// `mins`/`maxs` is this frame's camera box, which may have drifted from
    /// the cached box by up to the re-bucket threshold.
    fn integrate(
        &self,
        particles: &mut [Particle],
        mins: Vec3,
        maxs: Vec3,
        elapsed: f32,
        rng: &mut SimRng,
    ) {
        let pull = self.velocity_stabilize * elapsed;
        for particle in particles.iter_mut() {
            for axis in 0..2 {
                let v = &mut particle.velocity[axis];
                if *v < self.min_velocity[axis] {
                    *v += pull;
                } else if *v > self.max_velocity[axis] {
                    *v -= pull;
                } else {
                    *v += rng.flrand(-SNOW_VELOCITY_JITTER, SNOW_VELOCITY_JITTER);
                }
            }
            // Flat per-frame rate, not scaled by elapsed.
            if particle.velocity.z > self.min_velocity.z {
                particle.velocity.z -= self.velocity_stabilize * 2.0;
            }

            particle.position += particle.velocity * elapsed;

            match self.cell_of(particle.position) {
                Some(cell) => {
                    let outside = self.contents_at(cell).contains(Contents::OUTSIDE);
                    particle.flags.set(ParticleFlags::RENDER, outside);
                }
                None => {
                    wrap(particle, mins, maxs, rng);
                    self.reset_fall_velocity(particle, rng);
                    particle.flags.remove(ParticleFlags::RENDER);
                }
            }
        }
    }

    fn reset_fall_velocity(&self, particle: &mut Particle, rng: &mut SimRng) {
        particle.velocity = Vec3::new(
            0.0,
            0.0,
            rng.flrand(self.max_velocity.z, self.min_velocity.z),
        );
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    pub fn render(
        &self,
        particles: &[Particle],
        effects: &EffectList,
        is_rendering: bool,
        ctx: &mut RenderContext<'_>,
    ) {
        if !is_rendering {
            return;
        }
        effects.render_all(ctx);

        let points: Vec<Vec3> = particles
            .iter()
            .filter(|p| p.is_rendering())
            .map(|p| p.position)
            .collect();
        if points.is_empty() {
            return;
        }

        ctx.backend.bind_texture(None);
        ctx.backend.set_state(StateBits::ALPHA);
        ctx.backend.draw_points(
            &points,
            Vec4::new(SNOW_TINT, SNOW_TINT, SNOW_TINT, self.alpha),
            &PointStyle::default(),
        );
    }
}

/// Re-places a flake that left the occupancy grid inside the box: x and y
/// are rolled fresh, z wraps across the box height.
fn wrap(particle: &mut Particle, mins: Vec3, maxs: Vec3, rng: &mut SimRng) {
    particle.position.x = rng.flrand(mins.x, maxs.x);
    particle.position.y = rng.flrand(mins.y, maxs.y);

    let height = maxs.z - mins.z;
    let z = &mut particle.position.z;
    if *z < mins.z {
        *z += height;
    } else if *z > maxs.z {
        *z -= height;
    }
    if *z < mins.z || *z > maxs.z {
        *z = rng.flrand(mins.z, maxs.z);
    }
}
