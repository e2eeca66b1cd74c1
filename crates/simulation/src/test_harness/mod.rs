//! # TestWorld: headless test harness for the weather systems
//!
//! Two layers:
//!
//! - [`frame_at`] and [`render_ctx`] build the per-frame contexts directly,
//!   for unit tests that drive a single effect or system by hand.
//! - [`TestWorld`] wraps a `bevy::app::App` with `MinimalPlugins` and
//!   [`WorldEffectsPlugin`], so tests can issue console commands through the
//!   event queue and step frames without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;

use crate::effect_systems::WorldEffects;
use crate::frame::{FrameContext, RenderContext};
use crate::images::FogImageSource;
use crate::plugin::{WorldEffectCommand, WorldEffectsPlugin};
use crate::quick_sprite::QuickSprite;
use crate::render_backend::{RecordingBackend, RenderBackend};
use crate::settings::WorldEffectsSettings;
use crate::sim_rng::SimRng;
use crate::view::ViewParams;
use crate::world_query::{WorldQuery, WorldQueryOracle};

// ---------------------------------------------------------------------------
// Context builders
// ---------------------------------------------------------------------------

/// Update context with the default orientation at `origin`.
pub fn frame_at<'a>(
    elapsed: f32,
    origin: Vec3,
    world: &'a dyn WorldQuery,
    rng: &'a mut SimRng,
) -> FrameContext<'a> {
    FrameContext {
        elapsed,
        view: ViewParams::at(origin),
        world,
        rng,
    }
}

/// Render context with the default view.
pub fn render_ctx<'a>(
    backend: &'a mut dyn RenderBackend,
    quick_sprite: &'a mut QuickSprite,
) -> RenderContext<'a> {
    RenderContext {
        view: ViewParams::default(),
        backend,
        quick_sprite,
    }
}

// ---------------------------------------------------------------------------
// TestWorld
// ---------------------------------------------------------------------------

/// A headless Bevy App running [`WorldEffectsPlugin`].
pub struct TestWorld {
    app: App,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Default settings, open sky everywhere, procedural fog images.
    pub fn new() -> Self {
        Self::with_settings(WorldEffectsSettings::default())
    }

    pub fn with_settings(settings: WorldEffectsSettings) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        // Inserted first so the plugin's init_resource keeps it.
        app.insert_resource(settings);
        app.add_plugins(WorldEffectsPlugin);
        // Run Startup so the seed and startup commands are applied.
        app.update();
        Self { app }
    }

    pub fn with_oracle(mut self, oracle: impl WorldQuery + Send + Sync + 'static) -> Self {
        self.app.insert_resource(WorldQueryOracle::new(oracle));
        self
    }

    pub fn with_images(mut self, images: FogImageSource) -> Self {
        self.app.insert_resource(images);
        self
    }

    /// Queues a console line; it is applied on the next [`tick`](Self::tick).
    pub fn command(&mut self, line: &str) -> &mut Self {
        self.app
            .world_mut()
            .send_event(WorldEffectCommand::new(line));
        self
    }

    pub fn tick(&mut self, frames: u32) -> &mut Self {
        for _ in 0..frames {
            self.app.update();
        }
        self
    }

    pub fn effects(&self) -> &WorldEffects {
        self.app.world().resource::<WorldEffects>()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    /// Runs one simulation frame with the camera at `origin` and returns
    /// everything it drew.
    pub fn advance(&mut self, elapsed: f32, origin: Vec3) -> RecordingBackend {
        let mut backend = RecordingBackend::default();
        let world = self.app.world_mut();
        world.resource_scope(|world, mut effects: Mut<WorldEffects>| {
            world.resource_scope(|world, mut rng: Mut<SimRng>| {
                let oracle = world.resource::<WorldQueryOracle>();
                effects.set_view(ViewParams::at(origin));
                effects.advance_and_render_all(elapsed, oracle, &mut *rng, &mut backend);
            });
        });
        backend
    }

    pub fn app(&mut self) -> &mut App {
        &mut self.app
    }
}
