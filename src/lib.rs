//! Flap Gap - A gravity and gap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `driver`: Fixed timestep tick driver and input command queue
//! - `config`: Game tuning and playfield validation
//! - `renderer`: Draw list generation and 2D canvas painting
//! - `ui`: HUD and overlay screen state

pub mod config;
pub mod driver;
pub mod renderer;
pub mod sim;
pub mod ui;

pub use config::{ConfigError, GameConfig, Playfield};
pub use driver::{Command, Driver};

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second of host time
    pub const SIM_HZ: f32 = 60.0;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta the driver will accumulate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Integration step in simulation units. Tuning values are per tick.
    pub const TICK_DT: f32 = 1.0;

    /// Minimum distance between a gap and the top or bottom of the playfield
    pub const GAP_MARGIN: f32 = 50.0;
    /// How far past the left edge an obstacle travels before it is retired
    pub const RETIRE_MARGIN: f32 = 50.0;

    /// Tilt in degrees per unit of vertical velocity
    pub const TILT_GAIN: f32 = 3.0;
    /// Nose-up limit (degrees)
    pub const TILT_MIN: f32 = -30.0;
    /// Nose-down limit (degrees)
    pub const TILT_MAX: f32 = 90.0;

    /// Default playfield used by headless runs
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 480.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 640.0;
}
