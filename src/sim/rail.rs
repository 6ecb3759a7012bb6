//! Grind rail geometry
//!
//! A rail is a plain line segment. It carries no grind progress of its own;
//! the player keeps the parameter so several grinds can share one rail.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_SEGMENT_LENGTH;

/// A grindable line segment, stored with `start.x <= end.x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[DVec2; 2]", into = "[DVec2; 2]")]
pub struct Rail {
    pub start: DVec2,
    pub end: DVec2,
}

impl Rail {
    pub fn new(a: DVec2, b: DVec2) -> Self {
        let (start, end) = if a.x <= b.x { (a, b) } else { (b, a) };
        Self { start, end }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    /// Clamped projection parameter of `p` onto the rail, in [0, 1]
    pub fn param_at(&self, p: DVec2) -> f64 {
        let line = self.end - self.start;
        let len_sq = line.length_squared();
        if len_sq < MIN_SEGMENT_LENGTH * MIN_SEGMENT_LENGTH {
            return 0.0;
        }
        ((p - self.start).dot(line) / len_sq).clamp(0.0, 1.0)
    }

    /// Point on the rail at parameter `t`
    #[inline]
    pub fn point_at(&self, t: f64) -> DVec2 {
        self.start.lerp(self.end, t)
    }

    /// Distance from `p` to the nearest point on the rail
    pub fn distance_to_point(&self, p: DVec2) -> f64 {
        (p - self.point_at(self.param_at(p))).length()
    }

    /// Unit direction from start to end (`x >= 0`)
    pub fn tangent(&self) -> DVec2 {
        let line = self.end - self.start;
        let len = line.length();
        if len < MIN_SEGMENT_LENGTH {
            DVec2::X
        } else {
            line / len
        }
    }

    /// Angle of the rail (radians, screen-space)
    #[inline]
    pub fn angle(&self) -> f64 {
        crate::angle_of(self.tangent())
    }
}

impl From<[DVec2; 2]> for Rail {
    fn from([a, b]: [DVec2; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<Rail> for [DVec2; 2] {
    fn from(rail: Rail) -> Self {
        [rail.start, rail.end]
    }
}

/// Index of the rail closest to `p`, with its distance
pub fn nearest_rail(rails: &[Rail], p: DVec2) -> Option<(usize, f64)> {
    rails
        .iter()
        .enumerate()
        .map(|(i, rail)| (i, rail.distance_to_point(p)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
