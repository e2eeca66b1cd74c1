//! Rain: streak quads in a cylinder around the camera.
//!
//! Drops are simulated as `(angle, radius, height)` relative to the camera,
//! so the cylinder follows the viewer without re-bucketing. Streaks lean with
//! a slowly easing wind and fade out while the camera is under a roof or in
//! water. All streaks of a frame go through one quick-sprite batch.

mod commands;
mod systems;
mod types;

pub use types::{init_rain_system, RainParts, RainSystem};
