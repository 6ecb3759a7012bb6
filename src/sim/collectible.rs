//! Collectibles and axis-aligned boxes

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{COIN_POINTS, COIN_SIZE};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    pub fn from_center(center: DVec2, size: DVec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

fn default_points() -> u32 {
    COIN_POINTS
}

fn default_size() -> DVec2 {
    DVec2::splat(COIN_SIZE)
}

/// A pickup. `collected` only ever goes from false to true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Center of the coin
    pub position: DVec2,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(default = "default_size")]
    pub size: DVec2,
    #[serde(default)]
    pub collected: bool,
}

impl Coin {
    pub fn new(position: DVec2) -> Self {
        Self {
            position,
            points: COIN_POINTS,
            size: default_size(),
            collected: false,
        }
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }

    /// Mark collected if `bounds` overlaps. Returns true only on the first pickup.
    pub fn try_collect(&mut self, bounds: &Aabb) -> bool {
        if self.collected || !self.aabb().intersects(bounds) {
            return false;
        }
        self.collected = true;
        true
    }
}
