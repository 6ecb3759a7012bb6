//! Data-driven physics tuning
//!
//! Every constant the locomotion engine uses lives here so designers can
//! override any subset from JSON. Missing fields fall back to `consts`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// When the engine is allowed to attach the player to a nearby rail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GrindSnapPolicy {
    /// Snap whenever airborne and close enough to a rail
    #[default]
    Proximity,
    /// Snap only while crouch is held (airborne or just touching down)
    CrouchHeld,
}

impl GrindSnapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrindSnapPolicy::Proximity => "Proximity",
            GrindSnapPolicy::CrouchHeld => "CrouchHeld",
        }
    }
}

/// Physics constants for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Forces ===
    pub gravity: f64,
    pub jump_impulse: f64,
    pub push_accel: f64,
    pub brake_accel: f64,
    pub crouch_accel_scale: f64,
    /// Fraction of push acceleration available in the air
    pub air_control: f64,
    pub max_speed: f64,

    // === Friction / drag (exponential decay rates, 1/s) ===
    pub ground_friction: f64,
    pub air_drag: f64,
    pub slope_assist: f64,
    pub ground_stick: f64,

    // === Forgiveness ===
    pub coyote_time: f64,
    pub jump_buffer: f64,
    pub max_dt: f64,

    // === Grinding ===
    pub snap_policy: GrindSnapPolicy,
    pub snap_distance: f64,
    pub snap_vertical_tolerance: f64,
    pub min_grind_speed: f64,
    pub grind_friction: f64,
    pub grind_pop: f64,
    pub rail_cooldown: f64,
    pub grind_points_per_sec: f64,

    // === Tricks / landing ===
    pub trick_duration: f64,
    pub air_spin_rate: f64,
    pub hard_landing_speed: f64,

    /// Player bounding box (width, height)
    pub player_size: DVec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            push_accel: PUSH_ACCEL,
            brake_accel: BRAKE_ACCEL,
            crouch_accel_scale: CROUCH_ACCEL_SCALE,
            air_control: AIR_CONTROL,
            max_speed: MAX_SPEED,

            ground_friction: GROUND_FRICTION,
            air_drag: AIR_DRAG,
            slope_assist: SLOPE_ASSIST,
            ground_stick: GROUND_STICK,

            coyote_time: COYOTE_TIME,
            jump_buffer: JUMP_BUFFER,
            max_dt: MAX_DT,

            snap_policy: GrindSnapPolicy::Proximity,
            snap_distance: SNAP_DISTANCE,
            snap_vertical_tolerance: SNAP_VERTICAL_TOLERANCE,
            min_grind_speed: MIN_GRIND_SPEED,
            grind_friction: GRIND_FRICTION,
            grind_pop: GRIND_POP,
            rail_cooldown: RAIL_COOLDOWN,
            grind_points_per_sec: GRIND_POINTS_PER_SEC,

            trick_duration: TRICK_DURATION,
            air_spin_rate: AIR_SPIN_RATE,
            hard_landing_speed: HARD_LANDING_SPEED,

            player_size: DVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse tuning from JSON, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning ({} snap policy)", tuning.snap_policy.as_str());
                tuning
            }
            Err(err) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", err);
                Self::default()
            }
        }
    }

    /// Spin rate for tricks that rotate the board once over their duration
    pub fn trick_spin_rate(&self) -> f64 {
        std::f64::consts::TAU / self.trick_duration.max(f64::EPSILON)
    }
}
