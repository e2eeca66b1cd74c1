use bevy::prelude::*;

use simulation::world_query::WorldQueryOracle;
use simulation::WorldEffectsSet;

pub mod camera;
pub mod coords;
pub mod effects_render;
pub mod gizmo_backend;
pub mod scene;

use scene::ShelterWorld;

/// Draws the weather systems with gizmos and provides the demo camera and
/// scene. Add after [`simulation::WorldEffectsPlugin`].
pub struct WorldEffectsRenderPlugin;

impl Plugin for WorldEffectsRenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(WorldQueryOracle::new(ShelterWorld::default()))
            .add_systems(Startup, (camera::setup_camera, scene::spawn_scene))
            .add_systems(
                Update,
                (
                    camera::camera_pan_keyboard,
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::apply_orbit_camera,
                )
                    .chain()
                    .before(WorldEffectsSet::Simulate),
            )
            .add_systems(
                Update,
                effects_render::weather_hotkeys.before(WorldEffectsSet::Commands),
            )
            .add_systems(
                Update,
                (
                    effects_render::sync_effects_view,
                    effects_render::advance_and_draw_world_effects,
                )
                    .chain()
                    .in_set(WorldEffectsSet::Simulate),
            );
    }
}
