use bevy::prelude::*;

use crate::config::{
    RAIN_LEAN_SCALE, RAIN_SPAWN_HEIGHT, RAIN_STREAK_HALF_WIDTH, RAIN_WIND_EASE,
    WIND_CHANGE_MAX_FRAMES, WIND_CHANGE_MIN_FRAMES, WIND_DRIFT_SPEED,
};
use crate::effects::EffectList;
use crate::frame::{FrameContext, RenderContext};
use crate::misty_fog::update_fog_wind_direction;
use crate::particles::Particle;
use crate::render_backend::StateBits;

use super::types::RainSystem;

impl RainSystem {
    pub fn update(
        &mut self,
        particles: &mut [Particle],
        effects: &mut EffectList,
        is_rendering: &mut bool,
        frame: &mut FrameContext<'_>,
    ) {
        self.wind_change -= 1;
        if self.wind_change < 0 {
            self.new_wind_direction = frame.rng.horizontal_direction();
            self.wind_change = frame
                .rng
                .irand(WIND_CHANGE_MIN_FRAMES, WIND_CHANGE_MAX_FRAMES);
            update_fog_wind_direction(effects, self.new_wind_direction * WIND_DRIFT_SPEED);
        }
        self.wind_direction += (self.new_wind_direction - self.wind_direction) * RAIN_WIND_EASE;

        let open_air = frame
            .world
            .point_contents(frame.view.origin)
            .is_open_air();
        if open_air {
            self.fade_alpha = (self.fade_alpha + frame.elapsed / 2.0).min(1.0);
        } else {
            self.fade_alpha = (self.fade_alpha - frame.elapsed / 2.0).max(0.0);
            if self.fade_alpha <= 0.0 {
                *is_rendering = false;
                return;
            }
        }
        *is_rendering = true;

        effects.update_all(particles, frame);

        let elapsed = frame.elapsed;
        for particle in particles.iter_mut() {
            particle.position += particle.velocity * elapsed;
            particle.position.x = particle.position.x.rem_euclid(self.spread.x);

            let radius = &mut particle.position.y;
            if *radius < 0.0 {
                *radius = -*radius;
                particle.velocity.y = -particle.velocity.y;
            } else if *radius > self.spread.y {
                *radius = 2.0 * self.spread.y - *radius;
                particle.velocity.y = -particle.velocity.y;
            }
            *radius = radius.clamp(0.0, self.spread.y);

            if particle.position.z < -self.spread.z {
                *particle = self.spawn_drop(RAIN_SPAWN_HEIGHT, frame.rng);
            }
        }
    }

    /// Direction the streaks lean in, pointing down.
    pub fn lean(&self) -> Vec3 {
        let tilt = self.wind_direction.truncate() * self.wind_angle * RAIN_LEAN_SCALE;
        tilt.extend(-1.0).normalize()
    }

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

        let alpha = (self.alpha * self.fade_alpha * 255.0).clamp(0.0, 255.0) as u8;
        let color = [255, 255, 255, alpha];
        let lean = self.lean();
        let origin = ctx.view.origin;

        ctx.quick_sprite.start_batch(
            ctx.backend,
            Some(self.texture),
            StateBits::ALPHA.union(StateBits::NO_DEPTH_WRITE),
            0,
        );
        for particle in particles.iter().filter(|p| p.is_rendering()) {
            let [angle, radius, height] = particle.position.to_array();
            let head = origin + Vec3::new(angle.cos() * radius, angle.sin() * radius, height);
            let tail = head - lean * self.rain_height;

            let side = lean
                .cross(origin - head)
                .try_normalize()
                .unwrap_or(ctx.view.right)
                * RAIN_STREAK_HALF_WIDTH;

            ctx.quick_sprite
                .add_sprite(ctx.backend, [head - side, head + side, tail + side, tail - side], color);
        }
        ctx.quick_sprite.end_batch(ctx.backend);

        effects.render_all(ctx);
    }
}
