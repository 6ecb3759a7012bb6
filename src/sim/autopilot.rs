//! Idle/demo mode input
//!
//! Plays the game with seeded randomness: keeps pushing, tucks on downhill
//! sections, jumps every so often and throws a trick after take-off.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Player;
use super::terrain::Terrain;
use super::tick::InputSnapshot;
use super::trick::TrickKind;

/// Speed above which the autopilot stops pushing
const CRUISE_SPEED: f64 = 450.0;
/// Slope angle (radians) that counts as downhill
const TUCK_SLOPE: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Seconds on a surface before the next jump
    jump_timer: f64,
    /// Seconds after take-off before the queued trick
    trick_delay: Option<f64>,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let jump_timer = rng.random_range(0.8..2.5);
        Self {
            rng,
            jump_timer,
            trick_delay: None,
        }
    }

    /// Decide this tick's input
    pub fn next_input(&mut self, player: &Player, terrain: &Terrain, dt: f64) -> InputSnapshot {
        let mut input = InputSnapshot {
            right: player.velocity.x < CRUISE_SPEED,
            ..Default::default()
        };

        if player.is_grounded() {
            input.crouch = terrain.slope_angle_at(player.position.x) > TUCK_SLOPE;
        }

        if player.is_grounded() || player.is_grinding() {
            self.jump_timer -= dt;
            if self.jump_timer <= 0.0 {
                input.jump = true;
                self.jump_timer = self.rng.random_range(0.8..2.5);
                self.trick_delay = if self.rng.random_bool(0.7) {
                    Some(self.rng.random_range(0.05..0.15))
                } else {
                    None
                };
            }
        } else if let Some(delay) = self.trick_delay.as_mut() {
            *delay -= dt;
            if *delay <= 0.0 {
                let kind = TrickKind::ALL[self.rng.random_range(0..TrickKind::ALL.len())];
                input.trick = Some(kind);
                self.trick_delay = None;
            }
        }

        input
    }
}
