//! Per-frame context handed to every update and render call.

use crate::quick_sprite::QuickSprite;
use crate::render_backend::RenderBackend;
use crate::sim_rng::SimRng;
use crate::view::ViewParams;
use crate::world_query::WorldQuery;

/// Everything an update step may read or consume.
pub struct FrameContext<'a> {
    /// Seconds since the previous frame.
    pub elapsed: f32,
    pub view: ViewParams,
    pub world: &'a dyn WorldQuery,
    pub rng: &'a mut SimRng,
}

/// Everything a render step draws through.
pub struct RenderContext<'a> {
    pub view: ViewParams,
    pub backend: &'a mut dyn RenderBackend,
    pub quick_sprite: &'a mut QuickSprite,
}
