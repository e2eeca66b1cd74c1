//! Wind-gust effect: a box-shaped force field that nudges particle velocities.
//!
//! The box is described by three planes derived from the gust origin and
//! direction. A particle inside the box gets pushed once, then cools down for
//! a number of frames that shrinks the farther it was from the source plane.
//! Global winds skip the box test and the camera cull.

mod systems;
mod types;

pub use types::{Plane, WindEffect};
