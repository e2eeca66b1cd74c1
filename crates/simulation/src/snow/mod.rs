//! Snow: a camera-following box of point flakes.
//!
//! The box around the camera is split into a coarse occupancy grid sampled
//! from the world oracle. The grid is refreshed only once the camera has moved
//! far enough, and flakes are drawn only where their cell is open to the sky.
//! Each system owns a gust wind that is re-armed near the camera on a random
//! schedule, plus any extra winds or fog added through console commands.

mod commands;
mod systems;
mod types;

pub use types::{init_snow_system, SnowContents, SnowParts, SnowSystem, SNOWCONTENTS_DIMS};
