//! Run scoring
//!
//! `ScoreTally` is an event sink that keeps the running score for a session
//! and a short list of the best tricks landed.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::sim::EventSink;

/// Maximum number of best tricks to keep
pub const MAX_BEST_TRICKS: usize = 5;

/// A landed trick worth remembering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickEntry {
    pub name: String,
    pub points: u32,
}

/// Running totals for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreTally {
    pub score: u64,
    pub coins: u32,
    pub tricks_landed: u32,
    pub tricks_failed: u32,
    pub hard_landings: u32,
    /// Best tricks, sorted by points (descending)
    pub best_tricks: Vec<TrickEntry>,
}

impl ScoreTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a trick would make the best-tricks list
    pub fn qualifies(&self, points: u32) -> bool {
        if points == 0 {
            return false;
        }
        if self.best_tricks.len() < MAX_BEST_TRICKS {
            return true;
        }
        self.best_tricks.last().map(|e| points > e.points).unwrap_or(true)
    }

    /// Highest-scoring trick so far
    pub fn best_trick(&self) -> Option<&TrickEntry> {
        self.best_tricks.first()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn record_trick(&mut self, name: &str, points: u32) {
        if !self.qualifies(points) {
            return;
        }
        let entry = TrickEntry {
            name: name.to_string(),
            points,
        };
        // Ties keep the earlier trick first
        let pos = self.best_tricks.iter().position(|e| points > e.points);
        match pos {
            Some(i) => self.best_tricks.insert(i, entry),
            None => self.best_tricks.push(entry),
        }
        self.best_tricks.truncate(MAX_BEST_TRICKS);
    }
}

impl EventSink for ScoreTally {
    fn on_trick(&mut self, name: &str, points: u32) {
        self.score += u64::from(points);
        self.tricks_landed += 1;
        self.record_trick(name, points);
    }

    fn on_coin_collected(&mut self, points: u32, _at: DVec2) {
        self.score += u64::from(points);
        self.coins += 1;
    }

    fn on_hard_landing(&mut self, _at: DVec2, _impact_speed: f64) {
        self.hard_landings += 1;
    }

    fn on_trick_failed(&mut self, _name: &str) {
        self.tricks_failed += 1;
    }
}
