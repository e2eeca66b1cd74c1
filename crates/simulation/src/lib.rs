//! Weather and atmospheric effects: snow, rain, wind gusts and misty fog.
//!
//! Engine-agnostic core plus a Bevy plugin. Drawing goes through the
//! [`RenderBackend`](render_backend::RenderBackend) trait and world geometry
//! through [`WorldQuery`](world_query::WorldQuery), so the simulation runs
//! headless in tests.

pub mod commands;
pub mod config;
pub mod effect_systems;
pub mod effects;
pub mod frame;
pub mod images;
pub mod misty_fog;
pub mod particles;
pub mod plugin;
pub mod quick_sprite;
pub mod rain;
pub mod render_backend;
pub mod settings;
pub mod sim_rng;
pub mod snow;
pub mod view;
pub mod wind;
pub mod world_query;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use commands::{execute_command, CommandContext, CommandError, CommandOutcome};
pub use effect_systems::{EffectSystem, WorldEffects};
pub use plugin::{WorldEffectCommand, WorldEffectsPlugin, WorldEffectsSet};
pub use settings::{InvalidSetting, WorldEffectsSettings};
