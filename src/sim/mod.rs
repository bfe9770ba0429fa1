//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `advance()` per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (obstacles oldest first)
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod collision;
pub mod geom;
pub mod state;
pub mod tick;
pub mod track;

pub use actor::{Actor, BoundsCheck};
pub use collision::{Evaluation, bonus_target_rect, evaluate, hits_bonus_target, outside_gap};
pub use geom::Rect;
pub use state::{
    GameEvent, Hud, MAX_PENDING_EVENTS, Phase, Session, TerminalCause, TickStatus, WorldSize,
};
pub use tick::{Command, ResetMode, advance, apply_command};
pub use track::{Obstacle, ObstacleTrack};
