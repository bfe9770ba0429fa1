//! Nyan Flap - A side-scrolling gap-threading arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (obstacle track, actor, collisions, session)
//! - `tuning`: Data-driven game balance
//! - `leaderboard`: In-memory table of the best finished runs
//! - `autopilot`: Demo-mode player
//! - `audio`: Audio cue sink (backend lives with the host)

pub mod audio;
pub mod autopilot;
pub mod error;
pub mod leaderboard;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use autopilot::Autopilot;
pub use error::ConfigError;
pub use leaderboard::{Leaderboard, RunRecord};
pub use sim::{Command, GameEvent, Phase, Session, TickStatus};
pub use tuning::{CeilingPolicy, Preset, Tuning};

/// Game configuration constants (reference tuning)
pub mod consts {
    /// Downward acceleration added to the actor's velocity every tick
    pub const GRAVITY: f32 = 0.2;
    /// Velocity assigned on a flap (negative is up)
    pub const JUMP_VELOCITY: f32 = -4.0;

    /// Obstacle scroll speed at level 1 (pixels/tick)
    pub const BASE_SCROLL_SPEED: f32 = 2.0;
    /// Scroll speed added on each level-up
    pub const SPEED_INCREMENT: f32 = 0.1;
    /// Points per level
    pub const LEVEL_UP_EVERY: u32 = 10;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const GAP_HEIGHT: f32 = 250.0;
    pub const OBSTACLE_SPACING: f32 = 300.0;

    /// Actor defaults - fixed column near the left edge
    pub const ACTOR_SIZE: f32 = 40.0;
    pub const ACTOR_X: f32 = 50.0;

    /// Default world used by headless runs
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
}
