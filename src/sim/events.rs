//! Outbound gameplay notifications
//!
//! The engine reports what happened through an `EventSink` passed into each
//! update. Sinks are fire-and-forget: nothing they return feeds back into
//! the simulation.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Receiver for gameplay events
pub trait EventSink {
    /// A trick (or grind) was landed for `points`
    fn on_trick(&mut self, name: &str, points: u32);

    /// A coin was picked up at `at`
    fn on_coin_collected(&mut self, points: u32, at: DVec2);

    /// The player hit the ground hard enough to be worth an effect
    fn on_hard_landing(&mut self, _at: DVec2, _impact_speed: f64) {}

    /// A trick was still in progress when the player touched down
    fn on_trick_failed(&mut self, _name: &str) {}
}

/// Recorded form of every `EventSink` callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Trick { name: String, points: u32 },
    TrickFailed { name: String },
    CoinCollected { points: u32, at: DVec2 },
    HardLanding { at: DVec2, impact_speed: f64 },
}

impl EventSink for Vec<GameEvent> {
    fn on_trick(&mut self, name: &str, points: u32) {
        self.push(GameEvent::Trick {
            name: name.to_string(),
            points,
        });
    }

    fn on_coin_collected(&mut self, points: u32, at: DVec2) {
        self.push(GameEvent::CoinCollected { points, at });
    }

    fn on_hard_landing(&mut self, at: DVec2, impact_speed: f64) {
        self.push(GameEvent::HardLanding { at, impact_speed });
    }

    fn on_trick_failed(&mut self, name: &str) {
        self.push(GameEvent::TrickFailed {
            name: name.to_string(),
        });
    }
}

/// Forwards every event to two sinks
pub struct Tee<'a, A: EventSink, B: EventSink>(pub &'a mut A, pub &'a mut B);

impl<A: EventSink, B: EventSink> EventSink for Tee<'_, A, B> {
    fn on_trick(&mut self, name: &str, points: u32) {
        self.0.on_trick(name, points);
        self.1.on_trick(name, points);
    }

    fn on_coin_collected(&mut self, points: u32, at: DVec2) {
        self.0.on_coin_collected(points, at);
        self.1.on_coin_collected(points, at);
    }

    fn on_hard_landing(&mut self, at: DVec2, impact_speed: f64) {
        self.0.on_hard_landing(at, impact_speed);
        self.1.on_hard_landing(at, impact_speed);
    }

    fn on_trick_failed(&mut self, name: &str) {
        self.0.on_trick_failed(name);
        self.1.on_trick_failed(name);
    }
}
