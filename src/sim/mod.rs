//! Deterministic simulation module
//!
//! All locomotion logic lives here. This module must be pure and deterministic:
//! - Clamped timestep only
//! - Seeded RNG only (autopilot)
//! - Terrain and rails are read-only during a tick
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collectible;
pub mod events;
pub mod level;
pub mod rail;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod trick;
pub mod world;

pub use autopilot::Autopilot;
pub use collectible::{Aabb, Coin};
pub use events::{EventSink, GameEvent, Tee};
pub use level::Level;
pub use rail::{Rail, nearest_rail};
pub use state::{GrindState, LocomotionState, Player};
pub use terrain::{Terrain, TerrainSegment};
pub use tick::{InputSnapshot, sanitize_dt, update};
pub use trick::{TrickKind, TrickOutcome, TrickState};
pub use world::World;
