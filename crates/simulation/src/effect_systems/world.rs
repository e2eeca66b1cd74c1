use bevy::prelude::*;

use crate::config::RAIN_WIND_SPEED_SCALE;
use crate::frame::{FrameContext, RenderContext};
use crate::quick_sprite::QuickSprite;
use crate::render_backend::RenderBackend;
use crate::sim_rng::SimRng;
use crate::view::ViewParams;
use crate::world_query::WorldQuery;

use super::types::EffectSystem;

/// Every live weather system, in creation order, plus the state they share
/// while rendering.
#[derive(Resource, Debug, Default)]
pub struct WorldEffects {
    systems: Vec<EffectSystem>,
    pub view: ViewParams,
    pub quick_sprite: QuickSprite,
}

impl WorldEffects {
    pub fn systems(&self) -> &[EffectSystem] {
        &self.systems
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn find_system(&self, name: &str) -> Option<&EffectSystem> {
        self.systems
            .iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn find_system_mut(&mut self, name: &str) -> Option<&mut EffectSystem> {
        self.systems
            .iter_mut()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    /// Appends a system. At most one system per name may be registered.
    pub fn add_system(&mut self, system: impl Into<EffectSystem>) {
        let system = system.into();
        debug_assert!(
            self.find_system(system.name()).is_none(),
            "{} system registered twice",
            system.name()
        );
        self.systems.push(system);
    }

    /// Unlinks a system. Its effects and particles are dropped with it.
    pub fn remove_system(&mut self, name: &str) -> Option<EffectSystem> {
        let index = self
            .systems
            .iter()
            .position(|s| s.name().eq_ignore_ascii_case(name))?;
        Some(self.systems.remove(index))
    }

    pub fn set_view(&mut self, view: ViewParams) {
        self.view = view;
    }

    /// Updates then renders each system in registration order.
    pub fn advance_and_render_all(
        &mut self,
        elapsed: f32,
        world: &dyn WorldQuery,
        rng: &mut SimRng,
        backend: &mut dyn RenderBackend,
    ) {
        let view = self.view;
        for system in self.systems.iter_mut() {
            let mut frame = FrameContext {
                elapsed,
                view,
                world,
                rng: &mut *rng,
            };
            system.update(&mut frame);

            let mut ctx = RenderContext {
                view,
                backend: &mut *backend,
                quick_sprite: &mut self.quick_sprite,
            };
            system.render(&mut ctx);
        }
    }

    /// Rain wind speed, for ambient foliage sway.
    pub fn query_wind_speed(&self) -> Option<f32> {
        self.find_system(EffectSystem::RAIN)
            .and_then(EffectSystem::as_rain)
            .map(|rain| rain.wind_angle * RAIN_WIND_SPEED_SCALE)
    }

    /// Current drift direction, preferring rain over snow.
    pub fn query_wind_direction(&self) -> Option<Vec3> {
        if let Some(rain) = self.find_system(EffectSystem::RAIN).and_then(EffectSystem::as_rain) {
            return Some(rain.wind_direction);
        }
        self.find_system(EffectSystem::SNOW)
            .and_then(EffectSystem::as_snow)
            .map(|snow| snow.wind_direction)
    }

    pub fn any_system_rendering(&self) -> bool {
        self.systems.iter().any(|s| s.is_rendering)
    }
}
