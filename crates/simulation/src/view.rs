use bevy::prelude::*;

/// Camera parameters the effect systems read each frame.
///
/// World space is Z up. `forward`, `right` and `up` form an orthonormal basis
/// and drive fog drift direction and rain streak orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    pub origin: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            forward: Vec3::X,
            right: Vec3::NEG_Y,
            up: Vec3::Z,
        }
    }
}

impl ViewParams {
    pub fn at(origin: Vec3) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }
}
