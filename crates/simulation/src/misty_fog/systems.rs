use bevy::prelude::*;

use crate::commands::parse::{parse_nonzero, Tokens};
use crate::commands::CommandError;
use crate::config::{MISTYFOG_ALPHA_RAMP, MISTYFOG_ALPHA_STEP, MISTYFOG_HEIGHT, MISTYFOG_WIDTH};
use crate::effects::{Effect, EffectId, EffectList};
use crate::frame::{FrameContext, RenderContext};
use crate::images::{fog_image_path, ImageLoader};
use crate::render_backend::{DrawSpace, StateBits};
use crate::sim_rng::SimRng;
use crate::view::ViewParams;

use super::types::{FogImage, MistyFogEffect};

const DENSITY_USAGE: &str = "fog density <density> (default 0.30)";

// =============================================================================
// Image slot lifecycle
// =============================================================================

impl FogImage {
    /// Advances the alpha ramp and the window drift by one update.
    ///
    /// Returns true when a stable, visible window has drifted out of its size
    /// bounds and should hand over to its buddy.
    pub fn advance(&mut self, view: &ViewParams) -> bool {
        if !self.is_rendering {
            return false;
        }

        if self.alpha_fade {
            self.alpha += self.alpha_direction * MISTYFOG_ALPHA_RAMP;
            if self.alpha <= 0.0 {
                self.alpha = 0.0;
                self.alpha_fade = false;
                self.is_rendering = false;
                return false;
            }
            if self.alpha >= 1.0 {
                self.alpha = 1.0;
                self.alpha_fade = false;
            }
        }

        let forward = self.wind_transform.dot(view.forward) / self.speed;
        let right = self.wind_transform.dot(view.right) / self.speed;

        self.texture_coords[0][0] += right - forward;
        self.texture_coords[0][1] -= forward;
        self.texture_coords[1][0] += right + forward;
        self.texture_coords[1][1] += forward;

        !self.alpha_fade && self.out_of_bounds()
    }

    fn start_fade_out(&mut self) {
        self.alpha_fade = true;
        self.alpha_direction = -MISTYFOG_ALPHA_STEP;
    }

    fn recycle(&mut self, view: &ViewParams, rng: &mut SimRng) {
        self.create_texture_coords(view, rng);
        self.alpha = 0.0;
        self.alpha_direction = MISTYFOG_ALPHA_STEP;
        self.alpha_fade = true;
        self.is_rendering = true;
    }
}

// =============================================================================
// Effect update / render / command
// =============================================================================

impl MistyFogEffect {
    pub fn update(&mut self, frame: &mut FrameContext<'_>) {
        let open_air = frame
            .world
            .point_contents(frame.view.origin)
            .is_open_air();

        if open_air {
            self.fade_alpha = (self.fade_alpha + frame.elapsed / 2.0).min(1.0);
        } else {
            self.fade_alpha = (self.fade_alpha - frame.elapsed / 2.0).max(0.0);
            if self.fade_alpha <= 0.0 {
                return;
            }
        }

        for pair in self.images.iter_mut() {
            for slot in 0..pair.len() {
                if !pair[slot].advance(&frame.view) {
                    continue;
                }
                let buddy = 1 - slot;
                // The buddy must finish its own fade-out before it can take over.
                if pair[buddy].is_rendering {
                    continue;
                }
                pair[slot].start_fade_out();
                pair[buddy].recycle(&frame.view, frame.rng);
            }
        }

        self.update_textures();
    }

    /// Rebuilds the grid alpha from every visible image slot.
    pub fn update_textures(&mut self) {
        for color in self.colors.iter_mut().flatten() {
            color.w = 0.0;
        }

        for image in self.images.iter().flatten() {
            if !image.is_rendering {
                continue;
            }

            let alpha = image.alpha * self.alpha * (1.0 / 255.0) * self.fade_alpha;
            let x_step = image.width() / MISTYFOG_WIDTH as f32;
            let y_step = image.height() / MISTYFOG_HEIGHT as f32;
            let [u0, v0] = image.texture_coords[0];

            for (y, row) in self.colors.iter_mut().enumerate() {
                let v = v0 + y as f32 * y_step;
                for (x, color) in row.iter_mut().enumerate() {
                    let u = u0 + x as f32 * x_step;
                    color.w += self.texture.sample_red(u, v) as f32 * alpha;
                }
            }
        }
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        if self.fade_alpha <= 0.0 {
            return;
        }
        ctx.backend.bind_texture(None);
        ctx.backend.set_state(StateBits::ALPHA.union(StateBits::NO_DEPTH_WRITE));
        ctx.backend.draw_indexed_quads(
            DrawSpace::Overlay,
            self.verts.as_flattened(),
            self.colors.as_flattened(),
            self.indices.as_flattened().as_flattened(),
        );
    }

    /// Handles `fog density <value>`.
    pub fn command(&mut self, text: &str) -> Result<bool, CommandError> {
        let mut tokens = Tokens::new(text);
        let is_fog = tokens
            .next_token()
            .is_some_and(|t| t.eq_ignore_ascii_case("fog"));
        if !is_fog {
            return Ok(false);
        }
        let is_density = tokens
            .next_token()
            .is_some_and(|t| t.eq_ignore_ascii_case("density"));
        if !is_density {
            return Ok(false);
        }

        self.alpha =
            parse_nonzero(&mut tokens, "density").map_err(|e| e.with_usage(DENSITY_USAGE))?;
        Ok(true)
    }
}

// =============================================================================
// Construction helpers
// =============================================================================

/// Loads `gfx/world/fog{index}.png` and appends a new fog effect.
pub fn add_misty_fog_effect(
    effects: &mut EffectList,
    index: u32,
    images: &dyn ImageLoader,
    view: &ViewParams,
    rng: &mut SimRng,
) -> Result<EffectId, CommandError> {
    let texture = images.load_image(&fog_image_path(index))?;
    Ok(effects.add(MistyFogEffect::new(texture, view, rng)))
}

/// Pushes a drift vector into every fog effect in the list.
pub fn update_fog_wind_direction(effects: &mut EffectList, wind: Vec3) {
    let mut current = effects.find(Effect::FOG);
    while let Some(id) = current {
        if let Some(fog) = effects.get_mut(id).and_then(Effect::as_fog_mut) {
            fog.set_wind_direction(wind);
        }
        current = effects.next_of_same_kind(id);
    }
}
