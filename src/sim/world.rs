//! Fixed-timestep driver
//!
//! Owns a level and its player and turns variable frame times into a whole
//! number of `SIM_DT` updates.

use super::events::EventSink;
use super::level::Level;
use super::state::Player;
use super::tick::{InputSnapshot, update};
use crate::consts::*;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct World {
    pub level: Level,
    pub player: Player,
    pub tuning: Tuning,
    /// Unsimulated frame time carried to the next frame
    accumulator: f64,
    /// Fixed steps simulated so far
    pub ticks: u64,
}

impl World {
    pub fn new(level: Level, tuning: Tuning) -> Self {
        let player = Player::new(level.spawn);
        Self {
            level,
            player,
            tuning,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Run exactly one fixed step
    pub fn step(&mut self, input: &InputSnapshot, events: &mut dyn EventSink) {
        update(
            &mut self.player,
            &self.level.terrain,
            &self.level.rails,
            &mut self.level.coins,
            input,
            SIM_DT,
            &self.tuning,
            events,
        );
        self.ticks += 1;
    }

    /// Feed one rendered frame's worth of time. Returns the number of steps run.
    ///
    /// Edge-triggered input (jump, trick) reaches only the first step so a
    /// single press is never applied twice.
    pub fn advance(&mut self, frame_dt: f64, input: &InputSnapshot, events: &mut dyn EventSink) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        let mut input = *input;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(&input, events);
            self.accumulator -= SIM_DT;
            substeps += 1;
            input = input.held_only();
        }

        // Drop time we could not catch up on instead of spiralling
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator %= SIM_DT;
        }

        substeps
    }

    /// Put the player back at the spawn point and restore the coins
    pub fn respawn(&mut self) {
        self.player.respawn(self.level.spawn);
        self.level.reset_coins();
        self.accumulator = 0.0;
        log::info!("Respawned at ({:.0}, {:.0})", self.level.spawn.x, self.level.spawn.y);
    }

    /// Seconds of simulated time
    pub fn elapsed(&self) -> f64 {
        self.ticks as f64 * SIM_DT
    }
}
