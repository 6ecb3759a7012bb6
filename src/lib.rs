//! Grindline - a side-view skateboard locomotion engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, rails, player state machine, tricks)
//! - `tuning`: Data-driven physics constants
//! - `score`: Event sink that keeps a running score
//!
//! Coordinates are screen-space: `+x` is right and `+y` is DOWN. Gravity is
//! therefore positive, jump impulses are negative and surface normals point
//! toward negative `y`.

pub mod score;
pub mod sim;
pub mod tuning;

pub use score::ScoreTally;
pub use tuning::{GrindSnapPolicy, Tuning};

use glam::DVec2;

/// Engine configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f64 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame time the fixed-step driver will accumulate
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Shortest segment/rail length treated as non-degenerate
    pub const MIN_SEGMENT_LENGTH: f64 = 1e-6;

    /// Gravity (pixels/s², +y is down)
    pub const GRAVITY: f64 = 1400.0;
    /// Vertical velocity set by a jump
    pub const JUMP_IMPULSE: f64 = -520.0;
    /// Horizontal push acceleration
    pub const PUSH_ACCEL: f64 = 600.0;
    /// Acceleration when pushing against the direction of travel
    pub const BRAKE_ACCEL: f64 = 900.0;
    pub const CROUCH_ACCEL_SCALE: f64 = 0.5;
    pub const AIR_CONTROL: f64 = 0.6;
    pub const MAX_SPEED: f64 = 900.0;

    /// Exponential decay rates (1/s)
    pub const GROUND_FRICTION: f64 = 0.4;
    pub const AIR_DRAG: f64 = 0.05;
    pub const GRIND_FRICTION: f64 = 0.3;

    /// Scales the downhill pull from the terrain normal
    pub const SLOPE_ASSIST: f64 = 1.0;
    /// How far the surface may drop away before a grounded player goes airborne
    pub const GROUND_STICK: f64 = 6.0;

    /// Forgiveness windows (seconds)
    pub const COYOTE_TIME: f64 = 0.1;
    pub const JUMP_BUFFER: f64 = 0.12;

    /// Largest dt a single update will integrate
    pub const MAX_DT: f64 = 0.05;

    /// Rail grinding
    pub const SNAP_DISTANCE: f64 = 20.0;
    pub const SNAP_VERTICAL_TOLERANCE: f64 = 12.0;
    pub const MIN_GRIND_SPEED: f64 = 150.0;
    /// Vertical boost when rolling off the end of a rail
    pub const GRIND_POP: f64 = -120.0;
    /// Seconds after leaving a rail during which no rail can be snapped
    pub const RAIL_COOLDOWN: f64 = 0.25;
    pub const GRIND_POINTS_PER_SEC: f64 = 100.0;

    /// Tricks
    pub const TRICK_DURATION: f64 = 0.65;
    /// Manual air rotation rate (radians/s at full input)
    pub const AIR_SPIN_RATE: f64 = 6.0;

    /// Into-surface speed above which a landing counts as hard
    pub const HARD_LANDING_SPEED: f64 = 700.0;

    /// Player bounding box (width, height)
    pub const PLAYER_WIDTH: f64 = 24.0;
    pub const PLAYER_HEIGHT: f64 = 40.0;

    /// Default collectible
    pub const COIN_SIZE: f64 = 30.0;
    pub const COIN_POINTS: u32 = 10;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    if !angle.is_finite() {
        return 0.0;
    }
    angle = angle.rem_euclid(2.0 * PI);
    if angle >= PI {
        angle -= 2.0 * PI;
    }
    angle
}

/// Angle of a direction vector (radians, screen-space)
#[inline]
pub fn angle_of(dir: DVec2) -> f64 {
    dir.y.atan2(dir.x)
}
