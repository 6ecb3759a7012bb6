//! Player state and locomotion state machine types
//!
//! The player is the only mutable actor. Terrain and rails are read-only
//! while a tick runs.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collectible::Aabb;
use super::trick::TrickState;

/// Progress along a rail, owned by the player (rails are shared)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrindState {
    /// Index into the level's rail list
    pub rail: usize,
    /// Rail parameter, always within [0, 1] between ticks
    pub t: f64,
    /// Seconds spent on this rail
    pub elapsed: f64,
}

/// Core locomotion state. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LocomotionState {
    /// Rolling on terrain
    Grounded,
    /// Free fall (jumping, launched off a ramp, rolled off a rail end)
    Airborne,
    /// Constrained to a rail
    Grinding(GrindState),
}

impl LocomotionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocomotionState::Grounded => "Grounded",
            LocomotionState::Airborne => "Airborne",
            LocomotionState::Grinding(_) => "Grinding",
        }
    }
}

/// The skater
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Feet position (board contact point)
    pub position: DVec2,
    pub velocity: DVec2,
    /// Board angle (radians, screen-space)
    pub board_angle: f64,
    pub angular_velocity: f64,
    pub state: LocomotionState,
    /// Only `Some` while airborne
    pub trick: Option<TrickState>,
    /// Remaining grace time for a late jump after leaving the ground
    pub coyote_time: f64,
    /// Remaining time an early jump press stays queued
    pub jump_buffer: f64,
    /// Seconds since last leaving a surface
    pub airtime: f64,
    /// Remaining time during which `last_rail` cannot be snapped again
    pub rail_cooldown: f64,
    /// Rail most recently left
    pub last_rail: Option<usize>,
    /// +1 facing right, -1 facing left
    pub facing: f64,
}

impl Player {
    pub fn new(spawn: DVec2) -> Self {
        Self {
            position: spawn,
            velocity: DVec2::ZERO,
            board_angle: 0.0,
            angular_velocity: 0.0,
            state: LocomotionState::Airborne,
            trick: None,
            coyote_time: 0.0,
            jump_buffer: 0.0,
            airtime: 0.0,
            rail_cooldown: 0.0,
            last_rail: None,
            facing: 1.0,
        }
    }

    /// Reset every field in place (respawn keeps the same player)
    pub fn respawn(&mut self, spawn: DVec2) {
        *self = Self::new(spawn);
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        matches!(self.state, LocomotionState::Grounded)
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        matches!(self.state, LocomotionState::Airborne)
    }

    #[inline]
    pub fn is_grinding(&self) -> bool {
        matches!(self.state, LocomotionState::Grinding(_))
    }

    pub fn grind(&self) -> Option<&GrindState> {
        match &self.state {
            LocomotionState::Grinding(grind) => Some(grind),
            _ => None,
        }
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Bounding box: feet at `position`, extending up by the height
    pub fn aabb(&self, size: DVec2) -> Aabb {
        let center = self.position - DVec2::new(0.0, size.y * 0.5);
        Aabb::from_center(center, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::trick::TrickKind;

    #[test]
    fn test_new_player_is_airborne_at_spawn() {
        let player = Player::new(DVec2::new(40.0, 50.0));
        assert!(player.is_airborne());
        assert!(player.trick.is_none());
        assert_eq!(player.position, DVec2::new(40.0, 50.0));
        assert_eq!(player.facing, 1.0);
    }

    #[test]
    fn test_respawn_resets_in_place() {
        let mut player = Player::new(DVec2::ZERO);
        player.velocity = DVec2::new(300.0, -20.0);
        player.state = LocomotionState::Grinding(GrindState {
            rail: 2,
            t: 0.4,
            elapsed: 1.0,
        });
        player.trick = Some(TrickState::new(TrickKind::Kickflip));
        player.facing = -1.0;

        player.respawn(DVec2::new(10.0, 10.0));
        assert!(player.is_airborne());
        assert!(player.grind().is_none());
        assert!(player.trick.is_none());
        assert_eq!(player.velocity, DVec2::ZERO);
        assert_eq!(player.facing, 1.0);
    }

    #[test]
    fn test_aabb_sits_above_feet() {
        let mut player = Player::new(DVec2::new(100.0, 100.0));
        player.position = DVec2::new(100.0, 100.0);
        let bounds = player.aabb(DVec2::new(24.0, 40.0));
        assert_eq!(bounds.max.y, 100.0);
        assert_eq!(bounds.min.y, 60.0);
        assert_eq!(bounds.min.x, 88.0);
    }
}
