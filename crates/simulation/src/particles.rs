use bevy::prelude::*;

use crate::config::SENTINEL_POSITION;

/// Per-particle flag bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParticleFlags(pub u32);

impl ParticleFlags {
    /// Eligible for this frame's draw pass.
    pub const RENDER: ParticleFlags = ParticleFlags(1);

    pub fn contains(self, other: ParticleFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: ParticleFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: ParticleFlags) {
        self.0 &= !other.0;
    }

    pub fn set(&mut self, other: ParticleFlags, on: bool) {
        if on {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub flags: ParticleFlags,
}

impl Particle {
    /// Particle parked at the sentinel position, at rest, not rendering.
    pub fn parked() -> Self {
        Self {
            position: Vec3::splat(SENTINEL_POSITION),
            ..Self::default()
        }
    }

    pub fn is_rendering(&self) -> bool {
        self.flags.contains(ParticleFlags::RENDER)
    }
}
