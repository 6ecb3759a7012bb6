//! Level data: terrain, rails, coins and a spawn point
//!
//! Levels are built elsewhere (editor, generator, JSON file) and handed to
//! the simulation fully formed.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collectible::Coin;
use super::rail::Rail;
use super::terrain::Terrain;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub terrain: Terrain,
    #[serde(default)]
    pub rails: Vec<Rail>,
    #[serde(default)]
    pub coins: Vec<Coin>,
    /// Where the player appears (feet position)
    pub spawn: DVec2,
}

impl Level {
    pub fn new(terrain: Terrain, rails: Vec<Rail>, coins: Vec<Coin>, spawn: DVec2) -> Self {
        Self {
            terrain,
            rails,
            coins,
            spawn,
        }
    }

    /// Parse a level from JSON
    ///
    /// ```json
    /// {
    ///   "terrain": [[[0, 100], [1000, 100]]],
    ///   "rails": [[[500, 90], [700, 90]]],
    ///   "coins": [{ "position": [300, 80] }],
    ///   "spawn": [50, 90]
    /// }
    /// ```
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let level: Level = serde_json::from_str(json)?;
        log::info!(
            "Loaded level: {} segments, {} rails, {} coins",
            level.terrain.segments().len(),
            level.rails.len(),
            level.coins.len()
        );
        Ok(level)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Put every coin back
    pub fn reset_coins(&mut self) {
        for coin in &mut self.coins {
            coin.collected = false;
        }
    }

    pub fn coins_remaining(&self) -> usize {
        self.coins.iter().filter(|c| !c.collected).count()
    }

    /// Built-in course: run-in, downhill, kicker, a rail section and a final drop
    pub fn demo() -> Self {
        let terrain = Terrain::from_points(&[
            DVec2::new(-200.0, 300.0),
            DVec2::new(400.0, 300.0),
            DVec2::new(900.0, 450.0),
            DVec2::new(1300.0, 450.0),
            DVec2::new(1400.0, 400.0),
            DVec2::new(1500.0, 470.0),
            DVec2::new(2400.0, 470.0),
            DVec2::new(3000.0, 600.0),
            DVec2::new(4000.0, 600.0),
        ]);

        let rails = vec![
            Rail::new(DVec2::new(1700.0, 430.0), DVec2::new(2000.0, 430.0)),
            Rail::new(DVec2::new(2450.0, 450.0), DVec2::new(2750.0, 515.0)),
        ];

        let coins = vec![
            Coin::new(DVec2::new(300.0, 270.0)),
            Coin::new(DVec2::new(700.0, 370.0)),
            Coin::new(DVec2::new(1000.0, 430.0)),
            Coin::new(DVec2::new(1850.0, 400.0)).with_points(50),
            Coin::new(DVec2::new(3400.0, 580.0)),
        ];

        Self::new(terrain, rails, coins, DVec2::new(0.0, 290.0))
    }
}
