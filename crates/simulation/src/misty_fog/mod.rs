//! Misty fog: a camera-attached grid of quads whose alpha is sampled from a
//! drifting window into a tiled noise texture.
//!
//! Two pairs of image slots are blended. Within a pair one slot is visible
//! while its buddy waits; when the visible window drifts out of its size
//! bounds it fades out and the buddy fades in with a fresh window.

mod systems;
#[cfg(test)]
mod tests;
mod types;

pub use systems::{add_misty_fog_effect, update_fog_wind_direction};
pub use types::{FogImage, MistyFogEffect};
