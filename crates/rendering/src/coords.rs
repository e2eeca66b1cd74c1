//! Conversions between simulation space (Z up) and Bevy space (Y up).
//!
//! Simulation `(x, y, z)` maps to Bevy `(x, z, -y)`, a rotation about X, so
//! handedness and lengths are preserved.

use bevy::prelude::*;

pub fn to_bevy(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, -v.y)
}

pub fn from_bevy(v: Vec3) -> Vec3 {
    Vec3::new(v.x, -v.z, v.y)
}
