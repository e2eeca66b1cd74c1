//! Fog image loading.
//!
//! Misty fog samples the red channel of a tiled RGBA texture on the CPU, so
//! images are plain pixel buffers rather than GPU handles. The loader is a
//! trait so tests and the demo can supply images without asset files.

use std::collections::HashMap;
use std::fmt;

use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

// =============================================================================
// Texture data
// =============================================================================

/// RGBA8 pixels, row-major, `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct FogTexture {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl FogTexture {
    pub fn new(pixels: Vec<u8>, width: usize, height: usize) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::Malformed {
                path: String::new(),
                reason: format!("empty image {width}x{height}"),
            });
        }
        if pixels.len() != width * height * 4 {
            return Err(ImageError::Malformed {
                path: String::new(),
                reason: format!(
                    "expected {} bytes for {width}x{height} RGBA, got {}",
                    width * height * 4,
                    pixels.len()
                ),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Single-color texture.
    pub fn solid(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            pixels: rgba.repeat(width * height),
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Red channel at normalized `(u, v)`, wrapping outside `[0, 1)`.
    pub fn sample_red(&self, u: f32, v: f32) -> u8 {
        let tx = ((u * self.width as f32).floor() as i64).rem_euclid(self.width as i64) as usize;
        let ty = ((v * self.height as f32).floor() as i64).rem_euclid(self.height as i64) as usize;
        self.pixels[(ty * self.width + tx) * 4]
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    NotFound(String),
    Malformed { path: String, reason: String },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::NotFound(path) => write!(f, "could not load image \"{path}\""),
            ImageError::Malformed { path, reason } => {
                write!(f, "malformed image \"{path}\": {reason}")
            }
        }
    }
}

impl std::error::Error for ImageError {}

// =============================================================================
// Loaders
// =============================================================================

pub trait ImageLoader {
    fn load_image(&self, path: &str) -> Result<FogTexture, ImageError>;
}

/// Path of the fog image with the given index.
pub fn fog_image_path(index: u32) -> String {
    format!("gfx/world/fog{index}.png")
}

/// Images registered up front by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryImages {
    images: HashMap<String, FogTexture>,
}

impl MemoryImages {
    pub fn insert(&mut self, path: impl Into<String>, texture: FogTexture) {
        self.images.insert(path.into(), texture);
    }

    pub fn with(mut self, path: impl Into<String>, texture: FogTexture) -> Self {
        self.insert(path, texture);
        self
    }
}

impl ImageLoader for MemoryImages {
    fn load_image(&self, path: &str) -> Result<FogTexture, ImageError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| ImageError::NotFound(path.to_string()))
    }
}

/// Generates `gfx/world/fog{n}.png` as tileable fBm noise seeded by `n`.
#[derive(Debug, Clone)]
pub struct ProceduralFogImages {
    pub size: usize,
    pub frequency: f32,
}

impl Default for ProceduralFogImages {
    fn default() -> Self {
        Self {
            size: 64,
            frequency: 0.08,
        }
    }
}

impl ProceduralFogImages {
    fn generate(&self, seed: i32) -> FogTexture {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(self.frequency));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(4));

        let n = self.size.max(1);
        let s = n as f32;
        let mut pixels = Vec::with_capacity(n * n * 4);
        for y in 0..n {
            for x in 0..n {
                let (fx, fy) = (x as f32, y as f32);
                // Blend the four periodic copies so opposite edges match.
                let a = noise.get_noise_2d(fx, fy);
                let b = noise.get_noise_2d(fx - s, fy);
                let c = noise.get_noise_2d(fx, fy - s);
                let d = noise.get_noise_2d(fx - s, fy - s);
                let wx = fx / s;
                let wy = fy / s;
                let raw = a * (1.0 - wx) * (1.0 - wy)
                    + b * wx * (1.0 - wy)
                    + c * (1.0 - wx) * wy
                    + d * wx * wy;
                let value = (((raw + 1.0) * 0.5).clamp(0.0, 1.0) * 255.0) as u8;
                pixels.extend_from_slice(&[value, value, value, 255]);
            }
        }
        FogTexture {
            pixels,
            width: n,
            height: n,
        }
    }
}

impl ImageLoader for ProceduralFogImages {
    fn load_image(&self, path: &str) -> Result<FogTexture, ImageError> {
        let index = path
            .strip_prefix("gfx/world/fog")
            .and_then(|rest| rest.strip_suffix(".png"))
            .and_then(|digits| digits.parse::<i32>().ok())
            .ok_or_else(|| ImageError::NotFound(path.to_string()))?;
        Ok(self.generate(index))
    }
}

/// Resource holding the loader used by console commands.
#[derive(Resource)]
pub struct FogImageSource(pub Box<dyn ImageLoader + Send + Sync>);

impl Default for FogImageSource {
    fn default() -> Self {
        Self(Box::new(ProceduralFogImages::default()))
    }
}

impl ImageLoader for FogImageSource {
    fn load_image(&self, path: &str) -> Result<FogTexture, ImageError> {
        self.0.load_image(path)
    }
}
