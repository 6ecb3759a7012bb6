//! Trick overlay
//!
//! A trick is a timed sub-state that only exists while airborne. It is
//! resolved (landed or failed) the moment the player touches a surface.

use serde::{Deserialize, Serialize};

/// Trick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrickKind {
    Kickflip,
    Heelflip,
    PopShuvit,
    ThreeSixtyFlip,
}

impl TrickKind {
    pub const ALL: [TrickKind; 4] = [
        TrickKind::Kickflip,
        TrickKind::Heelflip,
        TrickKind::PopShuvit,
        TrickKind::ThreeSixtyFlip,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TrickKind::Kickflip => "Kickflip",
            TrickKind::Heelflip => "Heelflip",
            TrickKind::PopShuvit => "Pop Shuvit",
            TrickKind::ThreeSixtyFlip => "360 Flip",
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            TrickKind::Kickflip | TrickKind::Heelflip => 100,
            TrickKind::PopShuvit => 150,
            TrickKind::ThreeSixtyFlip => 300,
        }
    }

    /// Whether the trick rotates the board in the view plane
    pub fn spins_board(&self) -> bool {
        matches!(self, TrickKind::PopShuvit | TrickKind::ThreeSixtyFlip)
    }
}

/// An in-progress trick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrickState {
    pub kind: TrickKind,
    /// Seconds into the trick, saturates at the trick duration
    pub progress: f64,
}

/// How a trick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickOutcome {
    Landed { name: &'static str, points: u32 },
    Failed { name: &'static str },
}

impl TrickState {
    pub fn new(kind: TrickKind) -> Self {
        Self {
            kind,
            progress: 0.0,
        }
    }

    /// Advance by `dt`. Returns the board rotation (radians) this step adds.
    pub fn advance(&mut self, dt: f64, duration: f64, spin_rate: f64) -> f64 {
        let before = self.progress;
        self.progress = (self.progress + dt).min(duration);
        if self.kind.spins_board() {
            (self.progress - before) * spin_rate
        } else {
            0.0
        }
    }

    #[inline]
    pub fn is_complete(&self, duration: f64) -> bool {
        self.progress >= duration
    }

    /// Fraction of the trick performed, in [0, 1]
    pub fn fraction(&self, duration: f64) -> f64 {
        if duration <= 0.0 {
            1.0
        } else {
            (self.progress / duration).clamp(0.0, 1.0)
        }
    }

    pub fn resolve(&self, duration: f64) -> TrickOutcome {
        if self.is_complete(duration) {
            TrickOutcome::Landed {
                name: self.kind.name(),
                points: self.kind.points(),
            }
        } else {
            TrickOutcome::Failed {
                name: self.kind.name(),
            }
        }
    }
}
