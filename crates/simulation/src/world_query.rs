//! Point-containment oracle.
//!
//! The effect systems never look at level geometry directly. They ask a
//! [`WorldQuery`] what a point in space contains and react to two bits:
//! `OUTSIDE` (open sky above) and `WATER`.

use std::ops::{BitOr, BitOrAssign};

use bevy::prelude::*;

/// Bitmask describing what occupies a point in the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Contents(pub u32);

impl Contents {
    pub const EMPTY: Contents = Contents(0);
    pub const SOLID: Contents = Contents(1);
    pub const WATER: Contents = Contents(1 << 5);
    pub const OUTSIDE: Contents = Contents(1 << 16);

    pub fn contains(self, other: Contents) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    /// "Outside and not water": the condition fog and rain fade in on.
    pub fn is_open_air(self) -> bool {
        self.contains(Contents::OUTSIDE) && !self.contains(Contents::WATER)
    }
}

impl BitOr for Contents {
    type Output = Contents;

    fn bitor(self, rhs: Contents) -> Contents {
        Contents(self.0 | rhs.0)
    }
}

impl BitOrAssign for Contents {
    fn bitor_assign(&mut self, rhs: Contents) {
        self.0 |= rhs.0;
    }
}

/// Classifies points in world space (Z up).
pub trait WorldQuery {
    fn point_contents(&self, point: Vec3) -> Contents;
}

impl<F> WorldQuery for F
where
    F: Fn(Vec3) -> Contents,
{
    fn point_contents(&self, point: Vec3) -> Contents {
        self(point)
    }
}

/// A world with nothing in it: every point is outside.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSky;

impl WorldQuery for OpenSky {
    fn point_contents(&self, _point: Vec3) -> Contents {
        Contents::OUTSIDE
    }
}

/// Resource holding the oracle the plugin's systems consult.
#[derive(Resource)]
pub struct WorldQueryOracle(pub Box<dyn WorldQuery + Send + Sync>);

impl Default for WorldQueryOracle {
    fn default() -> Self {
        Self(Box::new(OpenSky))
    }
}

impl WorldQueryOracle {
    pub fn new(query: impl WorldQuery + Send + Sync + 'static) -> Self {
        Self(Box::new(query))
    }
}

impl WorldQuery for WorldQueryOracle {
    fn point_contents(&self, point: Vec3) -> Contents {
        self.0.point_contents(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_bits() {
        let c = Contents::OUTSIDE | Contents::WATER;
        assert!(c.contains(Contents::OUTSIDE));
        assert!(c.contains(Contents::WATER));
        assert!(!c.is_open_air());
        assert!(Contents::OUTSIDE.is_open_air());
        assert!(!Contents::EMPTY.contains(Contents::EMPTY));
    }

    #[test]
    fn test_closure_oracle() {
        let indoor_below_zero = |p: Vec3| {
            if p.z < 0.0 {
                Contents::SOLID
            } else {
                Contents::OUTSIDE
            }
        };
        assert_eq!(
            indoor_below_zero.point_contents(Vec3::new(0.0, 0.0, -1.0)),
            Contents::SOLID
        );
        let oracle = WorldQueryOracle::new(indoor_below_zero);
        assert!(oracle.point_contents(Vec3::Z).is_open_air());
    }
}
