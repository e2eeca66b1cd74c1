use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

const PAN_SPEED: f32 = 60.0;
const ZOOM_SPEED: f32 = 0.15;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 600.0;
const MIN_PITCH: f32 = -30.0 * std::f32::consts::PI / 180.0; // looking up into the snowfall
const MAX_PITCH: f32 = 80.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
/// Keeps the focus inside the demo scene.
const FOCUS_LIMIT: f32 = 400.0;

/// Orbital camera model: camera orbits around a focus point on the ground.
///
/// All values are in Bevy space (Y up). The weather systems follow the
/// camera eye, not the focus.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Ground point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians (clamped between MIN_PITCH and MAX_PITCH)
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::new(0.0, 2.0, 0.0),
            yaw: 0.6,
            pitch: 15.0_f32.to_radians(),
            distance: 40.0,
        }
    }
}

#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

pub fn setup_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    let (pos, look_at) = orbit_to_transform(&orbit);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(pos).looking_at(look_at, Vec3::Y),
    ));
    commands.insert_resource(orbit);
    commands.init_resource::<CameraOrbitDrag>();
}

fn clamp_focus(focus: &mut Vec3) {
    focus.x = focus.x.clamp(-FOCUS_LIMIT, FOCUS_LIMIT);
    focus.z = focus.z.clamp(-FOCUS_LIMIT, FOCUS_LIMIT);
}

/// Camera position and look-at target for the orbit state.
pub fn orbit_to_transform(orbit: &OrbitCamera) -> (Vec3, Vec3) {
    // Spherical to cartesian offset from focus
    let x = orbit.distance * orbit.pitch.cos() * orbit.yaw.sin();
    let y = orbit.distance * orbit.pitch.sin();
    let z = orbit.distance * orbit.pitch.cos() * orbit.yaw.cos();
    let pos = orbit.focus + Vec3::new(x, y, z);
    (pos, orbit.focus)
}

/// System: apply OrbitCamera state to the actual camera Transform each frame.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let (pos, look_at) = orbit_to_transform(&orbit);
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(pos).looking_at(look_at, Vec3::Y);
}

/// WASD/Arrow keys: pan focus along ground plane (direction relative to current yaw).
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }

    if dir != Vec2::ZERO {
        let delta = PAN_SPEED * time.delta_secs();
        pan_focus(&mut orbit, dir.normalize() * delta);
    }
}

/// Moves the focus by a screen-relative offset, rotated by the current yaw.
pub fn pan_focus(orbit: &mut OrbitCamera, offset: Vec2) {
    let cos_yaw = orbit.yaw.cos();
    let sin_yaw = orbit.yaw.sin();
    orbit.focus.x += offset.x * cos_yaw + offset.y * sin_yaw;
    orbit.focus.z += -offset.x * sin_yaw + offset.y * cos_yaw;
    clamp_focus(&mut orbit.focus);
}

/// Right-mouse drag: orbit (horizontal = yaw, vertical = pitch).
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drag: ResMut<CameraOrbitDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Right) {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }

    if buttons.just_released(MouseButton::Right) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            orbit.yaw += delta.x * ORBIT_SENSITIVITY;
            orbit.pitch = (orbit.pitch - delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
            drag.last_pos = pos;
        }
    }
}

/// Scroll wheel: zoom (change distance).
pub fn camera_zoom(mut scroll_evts: EventReader<MouseWheel>, mut orbit: ResMut<OrbitCamera>) {
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        let factor = 1.0 - dy * ZOOM_SPEED;
        orbit.distance = (orbit.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}
