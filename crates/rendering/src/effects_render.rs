//! Per-frame driver: camera → view sync, then advance and draw every weather
//! system through the gizmo backend.

use bevy::prelude::*;

use simulation::effect_systems::WorldEffects;
use simulation::plugin::WorldEffectCommand;
use simulation::sim_rng::SimRng;
use simulation::view::ViewParams;
use simulation::world_query::WorldQueryOracle;

use crate::coords::from_bevy;
use crate::gizmo_backend::GizmoBackend;

/// Number keys mapped to console lines for the demo.
pub const WEATHER_HOTKEYS: &[(KeyCode, &str)] = &[
    (KeyCode::Digit1, "snow init 2000"),
    (KeyCode::Digit2, "rain init 1000"),
    (KeyCode::Digit3, "snow fog"),
    (KeyCode::Digit4, "rain fog"),
    (KeyCode::Digit5, "snow remove"),
    (KeyCode::Digit6, "rain remove"),
];

/// View parameters in simulation space for a Bevy camera transform.
pub fn view_from_transform(transform: &Transform) -> ViewParams {
    ViewParams {
        origin: from_bevy(transform.translation),
        forward: from_bevy(transform.forward().as_vec3()),
        right: from_bevy(transform.right().as_vec3()),
        up: from_bevy(transform.up().as_vec3()),
    }
}

pub fn sync_effects_view(
    camera: Query<&Transform, With<Camera3d>>,
    mut effects: ResMut<WorldEffects>,
) {
    let Ok(transform) = camera.get_single() else {
        return;
    };
    effects.set_view(view_from_transform(transform));
}

pub fn advance_and_draw_world_effects(
    time: Res<Time>,
    camera: Query<&Transform, With<Camera3d>>,
    mut effects: ResMut<WorldEffects>,
    mut rng: ResMut<SimRng>,
    oracle: Res<WorldQueryOracle>,
    mut gizmos: Gizmos,
) {
    let elapsed = time.delta_secs();
    if elapsed <= 0.0 || effects.is_empty() {
        return;
    }
    let Ok(transform) = camera.get_single() else {
        return;
    };

    let mut backend = GizmoBackend::new(&mut gizmos, GlobalTransform::from(*transform));
    effects.advance_and_render_all(elapsed, &*oracle, &mut *rng, &mut backend);
}

pub fn weather_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: EventWriter<WorldEffectCommand>,
) {
    for (key, line) in WEATHER_HOTKEYS {
        if keys.just_pressed(*key) {
            commands.send(WorldEffectCommand::new(*line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_looks_along_sim_y() {
        let view = view_from_transform(&Transform::default());
        assert_eq!(view.origin, Vec3::ZERO);
        assert!((view.forward - Vec3::Y).length() < 1e-6);
        assert!((view.right - Vec3::X).length() < 1e-6);
        assert!((view.up - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_camera_height_becomes_sim_z() {
        let transform =
            Transform::from_xyz(3.0, 10.0, -4.0).looking_at(Vec3::new(3.0, 10.0, -20.0), Vec3::Y);
        let view = view_from_transform(&transform);
        assert_eq!(view.origin, Vec3::new(3.0, 4.0, 10.0));
        assert!((view.forward - Vec3::Y).length() < 1e-5);
        assert!(view.right.cross(view.forward).dot(view.up) > 0.99);
    }

    #[test]
    fn test_hotkeys_parse_as_console_lines() {
        for (_, line) in WEATHER_HOTKEYS {
            let name = line.split_whitespace().next();
            assert!(matches!(name, Some("snow") | Some("rain")), "{line}");
        }
    }
}
