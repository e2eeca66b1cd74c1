//! Registry of running weather systems.
//!
//! [`WorldEffects`] is the single context every entry point goes through:
//! console commands look systems up by name, and the frame driver walks the
//! registry once per frame with [`WorldEffects::advance_and_render_all`].

mod types;
mod world;

pub use types::{EffectSystem, SystemKind};
pub use world::WorldEffects;
