//! Piecewise-linear terrain profile
//!
//! The ground is a height field over x made of straight segments. Queries
//! outside the covered range extend the first/last segment's line, so every
//! finite x has a finite height and a well-defined surface normal.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_SEGMENT_LENGTH;

/// Up, in screen space
const UP: DVec2 = DVec2::new(0.0, -1.0);

/// A straight piece of ground, stored with `x1 <= x2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[DVec2; 2]", into = "[DVec2; 2]")]
pub struct TerrainSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl TerrainSegment {
    /// Build a segment from two endpoints in either order
    pub fn new(a: DVec2, b: DVec2) -> Self {
        let (a, b) = if a.x <= b.x { (a, b) } else { (b, a) };
        Self {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
        }
    }

    #[inline]
    pub fn start(&self) -> DVec2 {
        DVec2::new(self.x1, self.y1)
    }

    #[inline]
    pub fn end(&self) -> DVec2 {
        DVec2::new(self.x2, self.y2)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end() - self.start()).length()
    }

    /// dy/dx, zero for vertical or degenerate segments
    pub fn slope(&self) -> f64 {
        let dx = self.x2 - self.x1;
        if dx < MIN_SEGMENT_LENGTH {
            0.0
        } else {
            (self.y2 - self.y1) / dx
        }
    }

    /// Height of the segment's line at `x` (extrapolates past the endpoints)
    #[inline]
    pub fn height_at(&self, x: f64) -> f64 {
        self.y1 + (x - self.x1) * self.slope()
    }

    /// Unit surface normal, always pointing up (away from the filled side)
    pub fn normal(&self) -> DVec2 {
        let dir = self.end() - self.start();
        let len = dir.length();
        if len < MIN_SEGMENT_LENGTH || dir.x < MIN_SEGMENT_LENGTH {
            return UP;
        }
        // dir rotated 90°; dir.x > 0 keeps the y component negative
        DVec2::new(dir.y, -dir.x) / len
    }

    /// Unit direction of travel along the surface (left to right)
    pub fn tangent(&self) -> DVec2 {
        let n = self.normal();
        DVec2::new(-n.y, n.x)
    }
}

impl From<[DVec2; 2]> for TerrainSegment {
    fn from([a, b]: [DVec2; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<TerrainSegment> for [DVec2; 2] {
    fn from(seg: TerrainSegment) -> Self {
        [seg.start(), seg.end()]
    }
}

/// The level's ground: segments sorted by ascending x
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TerrainSegment>", into = "Vec<TerrainSegment>")]
pub struct Terrain {
    segments: Vec<TerrainSegment>,
}

impl Terrain {
    pub fn new(mut segments: Vec<TerrainSegment>) -> Self {
        segments.sort_by(|a, b| a.x1.total_cmp(&b.x1));

        if segments.is_empty() {
            log::warn!("Terrain has no segments, treating it as a flat floor at y = 0");
        }
        for pair in segments.windows(2) {
            let gap = pair[1].x1 - pair[0].x2;
            if gap > MIN_SEGMENT_LENGTH {
                log::warn!("Terrain gap of {:.2} at x = {:.2}", gap, pair[0].x2);
            } else if gap < -MIN_SEGMENT_LENGTH {
                log::warn!("Terrain segments overlap by {:.2} at x = {:.2}", -gap, pair[1].x1);
            }
        }

        Self { segments }
    }

    /// Build terrain from a polyline of ground points
    pub fn from_points(points: &[DVec2]) -> Self {
        let segments = points
            .windows(2)
            .map(|pair| TerrainSegment::new(pair[0], pair[1]))
            .collect();
        Self::new(segments)
    }

    pub fn segments(&self) -> &[TerrainSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Covered x range, if any
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let first = self.segments.first()?;
        let last = self.segments.last()?;
        Some((first.x1, last.x2))
    }

    /// Segment responsible for `x`. Out-of-range x maps to the boundary segment.
    pub fn segment_at(&self, x: f64) -> Option<&TerrainSegment> {
        if self.segments.is_empty() {
            return None;
        }
        // First segment whose right edge reaches x
        let idx = self.segments.partition_point(|s| s.x2 < x);
        self.segments.get(idx).or(self.segments.last())
    }

    /// Ground height at `x`
    pub fn height_at(&self, x: f64) -> f64 {
        match self.segment_at(x) {
            Some(seg) => seg.height_at(x),
            None => 0.0,
        }
    }

    /// Unit surface normal at `x` (points up, `y <= 0`)
    pub fn normal_at(&self, x: f64) -> DVec2 {
        self.segment_at(x).map(|s| s.normal()).unwrap_or(UP)
    }

    /// Unit surface tangent at `x`, oriented toward +x
    pub fn tangent_at(&self, x: f64) -> DVec2 {
        let n = self.normal_at(x);
        DVec2::new(-n.y, n.x)
    }

    /// Surface angle at `x` (radians, positive when descending to the right)
    pub fn slope_angle_at(&self, x: f64) -> f64 {
        crate::angle_of(self.tangent_at(x))
    }
}

impl From<Vec<TerrainSegment>> for Terrain {
    fn from(segments: Vec<TerrainSegment>) -> Self {
        Self::new(segments)
    }
}

impl From<Terrain> for Vec<TerrainSegment> {
    fn from(terrain: Terrain) -> Self {
        terrain.segments
    }
}
