//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Hit, Verdict, check_collision};
pub use obstacles::{Obstacle, ObstacleStream};
pub use physics::Actor;
pub use state::{ActorView, GameEvent, GamePhase, GameState, ObstacleView, Snapshot};
pub use tick::{TickInput, tick};
