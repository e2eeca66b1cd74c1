//! Compile-time constants shared by the world effect systems.
//!
//! Tunable per-system defaults (spreads, velocities, gust schedule) live in
//! [`crate::settings::WorldEffectsSettings`] instead; everything here is a
//! structural dimension or a fixed behavioral constant.

// =============================================================================
// Snow occupancy grid
// =============================================================================

pub const SNOWCONTENTS_X_SIZE: usize = 16;
pub const SNOWCONTENTS_Y_SIZE: usize = 16;
pub const SNOWCONTENTS_Z_SIZE: usize = 8;

/// Minimum drift (world units, any axis) of the camera box before the
/// occupancy grid is resampled and particles are re-bucketed.
pub const REBUCKET_THRESHOLD: f32 = 25.0;

/// Position used for freshly allocated particles and for the cached box of a
/// system that has never been updated. Far enough away that the first update
/// always re-buckets.
pub const SENTINEL_POSITION: f32 = 99999.0;

/// Random horizontal velocity jitter applied to in-bounds snowflakes.
pub const SNOW_VELOCITY_JITTER: f32 = 1.4;

// =============================================================================
// Drift wind (feeds fog texture drift)
// =============================================================================

pub const WIND_CHANGE_MIN_FRAMES: i32 = 200;
pub const WIND_CHANGE_MAX_FRAMES: i32 = 450;

/// Scale applied to the unit drift direction to obtain the fog drift speed.
pub const WIND_DRIFT_SPEED: f32 = 0.025;

/// Fraction of the remaining difference rain closes toward its new wind
/// direction each frame.
pub const RAIN_WIND_EASE: f32 = 0.01;

// =============================================================================
// Wind gust effect
// =============================================================================

/// Non-global winds farther than this from the camera are skipped entirely.
pub const WIND_CULL_DISTANCE: f32 = 300.0;

/// Particles closer than this to any bounding plane are not affected.
pub const WIND_PLANE_MIN_DISTANCE: f32 = 0.01;

/// Frames a particle keeps cooling down after being pushed at the source plane.
pub const WIND_AFFECTED_DURATION: i32 = 30;

// =============================================================================
// Misty fog
// =============================================================================

pub const MISTYFOG_WIDTH: usize = 30;
pub const MISTYFOG_HEIGHT: usize = 30;
pub const MISTYFOG_NUM_IMAGES: usize = 2;
pub const MISTYFOG_NUM_PAIRED_IMAGES: usize = 2;

/// Half-width of the overlay quad grid in overlay units.
pub const MISTYFOG_EXTENT: f32 = 10.0;

/// Overlay depth of the fog grid.
pub const MISTYFOG_DEPTH: f32 = -10.0;

/// Per-update alpha change of a fading fog image is `direction * RAMP`.
pub const MISTYFOG_ALPHA_STEP: f32 = 0.025;
pub const MISTYFOG_ALPHA_RAMP: f32 = 0.4;

pub const MISTYFOG_DEFAULT_DENSITY: f32 = 0.3;

/// Fog image index used by the snow and rain `fog` commands.
pub const SNOW_FOG_IMAGE: u32 = 1;
pub const RAIN_FOG_IMAGE: u32 = 2;

// =============================================================================
// Quick sprite
// =============================================================================

pub const QUICK_SPRITE_MAX_VERTEXES: usize = 1000;

// =============================================================================
// Rain
// =============================================================================

/// Height (camera-relative) at which rain drops respawn.
pub const RAIN_SPAWN_HEIGHT: f32 = 40.0;

/// Scale from rain wind angle to the reported wind speed.
pub const RAIN_WIND_SPEED_SCALE: f32 = 75.0;

/// Horizontal lean applied per unit of `wind_direction * wind_angle`.
pub const RAIN_LEAN_SCALE: f32 = 0.25;

/// Half-width of a rain streak quad.
pub const RAIN_STREAK_HALF_WIDTH: f32 = 0.05;
