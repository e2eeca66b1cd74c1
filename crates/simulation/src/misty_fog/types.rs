use bevy::prelude::*;

use crate::config::{
    MISTYFOG_DEFAULT_DENSITY, MISTYFOG_DEPTH, MISTYFOG_EXTENT, MISTYFOG_HEIGHT,
    MISTYFOG_NUM_IMAGES, MISTYFOG_NUM_PAIRED_IMAGES, MISTYFOG_WIDTH,
};
use crate::images::FogTexture;
use crate::sim_rng::SimRng;
use crate::view::ViewParams;

// =============================================================================
// Fog image slot
// =============================================================================

/// One drifting window into the fog texture.
#[derive(Debug, Clone, PartialEq)]
pub struct FogImage {
    /// `[min, max]` corners of the window in texture space, `[u, v]` each.
    pub texture_coords: [[f32; 2]; 2],
    pub alpha: f32,
    pub alpha_direction: f32,
    pub alpha_fade: bool,
    pub is_rendering: bool,
    /// Divisor applied to wind components when drifting the window.
    pub speed: f32,
    pub current_size: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Random spread added to the picked window size.
    pub size: f32,
    pub wind_transform: Vec3,
}

impl Default for FogImage {
    fn default() -> Self {
        Self {
            texture_coords: [[0.0; 2]; 2],
            alpha: 1.0,
            alpha_direction: 0.0,
            alpha_fade: false,
            is_rendering: false,
            speed: 0.0,
            current_size: 0.0,
            min_size: 0.15,
            max_size: 0.3,
            size: 0.1,
            wind_transform: Vec3::ZERO,
        }
    }
}

impl FogImage {
    pub fn width(&self) -> f32 {
        self.texture_coords[1][0] - self.texture_coords[0][0]
    }

    pub fn height(&self) -> f32 {
        self.texture_coords[1][1] - self.texture_coords[0][1]
    }

    /// Whether the window has drifted outside `[min_size, max_size]`.
    pub fn out_of_bounds(&self) -> bool {
        let ok = |s: f32| s >= self.min_size && s <= self.max_size;
        !(ok(self.width()) && ok(self.height()))
    }

    /// Picks a new drift speed and a fresh window. The window starts small
    /// when the wind blows away from the viewer and large when toward it, so
    /// the drift has room to grow or shrink.
    pub fn create_texture_coords(&mut self, view: &ViewParams, rng: &mut SimRng) {
        self.speed = (800.0 + rng.flrand(0.0, 1.0) * 2000.0) / 4.0;

        let forward = self.wind_transform.dot(view.forward);
        self.current_size = if forward > 0.5 {
            self.min_size + rng.flrand(0.0, 1.0) * self.size
        } else if forward < -0.5 {
            self.max_size - rng.flrand(0.0, 1.0) * self.size
        } else {
            self.min_size * 1.5 + rng.flrand(0.0, 1.0) * self.size
        };

        let x_start = (1.0 - self.current_size - 0.4) * rng.flrand(0.0, 1.0) + 0.2;
        let y_start = (1.0 - self.current_size - 0.4) * rng.flrand(0.0, 1.0) + 0.2;
        self.texture_coords = [
            [x_start, y_start],
            [x_start + self.current_size, y_start + self.current_size],
        ];
    }
}

// =============================================================================
// Effect
// =============================================================================

#[derive(Debug, Clone)]
pub struct MistyFogEffect {
    /// `[pair][buddy]`.
    pub images: [[FogImage; MISTYFOG_NUM_PAIRED_IMAGES]; MISTYFOG_NUM_IMAGES],
    pub texture: FogTexture,
    /// Density multiplier.
    pub alpha: f32,
    /// Visibility fade driven by whether the camera is in open air.
    pub fade_alpha: f32,
    pub verts: [[Vec3; MISTYFOG_WIDTH]; MISTYFOG_HEIGHT],
    pub colors: [[Vec4; MISTYFOG_WIDTH]; MISTYFOG_HEIGHT],
    pub indices: [[[u32; 4]; MISTYFOG_WIDTH - 1]; MISTYFOG_HEIGHT - 1],
}

impl MistyFogEffect {
    pub fn new(texture: FogTexture, view: &ViewParams, rng: &mut SimRng) -> Self {
        let mut images: [[FogImage; MISTYFOG_NUM_PAIRED_IMAGES]; MISTYFOG_NUM_IMAGES] =
            Default::default();
        for pair in images.iter_mut() {
            let main = FogImage {
                size: 0.05 * 2.0,
                min_size: 0.05 * 3.0,
                max_size: 0.15 * 2.0,
                alpha: 1.0,
                ..FogImage::default()
            };
            pair[1] = main.clone();
            pair[0] = FogImage {
                is_rendering: true,
                ..main
            };
            pair[0].create_texture_coords(view, rng);
            pair[1].create_texture_coords(view, rng);
        }

        let x_step = MISTYFOG_EXTENT * 2.0 / (MISTYFOG_WIDTH - 1) as f32;
        let y_step = MISTYFOG_EXTENT * 2.0 / (MISTYFOG_HEIGHT - 1) as f32;
        let jitter_x = x_step / 16.0;
        let jitter_y = y_step / 16.0;

        let mut verts = [[Vec3::ZERO; MISTYFOG_WIDTH]; MISTYFOG_HEIGHT];
        let mut indices = [[[0u32; 4]; MISTYFOG_WIDTH - 1]; MISTYFOG_HEIGHT - 1];
        for (y, row) in verts.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = Vec3::new(
                    -MISTYFOG_EXTENT + x as f32 * x_step + rng.flrand(-jitter_x, jitter_x),
                    MISTYFOG_EXTENT - y as f32 * y_step + rng.flrand(-jitter_y, jitter_y),
                    MISTYFOG_DEPTH,
                );
            }
        }
        let w = MISTYFOG_WIDTH as u32;
        for (y, row) in indices.iter_mut().enumerate() {
            for (x, quad) in row.iter_mut().enumerate() {
                let (x, y) = (x as u32, y as u32);
                *quad = [y * w + x, y * w + x + 1, (y + 1) * w + x + 1, (y + 1) * w + x];
            }
        }

        Self {
            images,
            texture,
            alpha: MISTYFOG_DEFAULT_DENSITY,
            fade_alpha: 0.0,
            verts,
            colors: [[Vec4::new(1.0, 1.0, 1.0, 0.0); MISTYFOG_WIDTH]; MISTYFOG_HEIGHT],
            indices,
        }
    }

    /// Sets the drift vector of every image slot.
    pub fn set_wind_direction(&mut self, wind: Vec3) {
        for image in self.images.iter_mut().flatten() {
            image.wind_transform = wind;
        }
    }
}
