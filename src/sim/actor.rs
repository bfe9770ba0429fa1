//! The player-controlled actor
//!
//! The actor lives in a fixed column and only moves vertically: gravity pulls
//! it down each tick, a flap overwrites its velocity.

use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::TerminalCause;
use crate::tuning::CeilingPolicy;

/// Outcome of the per-tick bounds check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsCheck {
    /// Actor is within the world
    Inside,
    /// Actor hit the ceiling and was clamped to it (non-terminal policy)
    Pinned,
    /// Actor left the world; the run ends
    Terminal(TerminalCause),
}

/// Vertical kinematic state of the actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top edge of the actor
    pub y: f32,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    /// Ticks left during which gravity is suspended after ceiling contact
    pub ceiling_lock_ticks: u32,
}

impl Actor {
    /// Actor at the vertical midpoint with zero velocity.
    ///
    /// In worlds shorter than two actors the spawn point is pulled up so the
    /// actor starts fully inside.
    pub fn spawn(world_height: f32, actor_size: f32) -> Self {
        let floor = (world_height - actor_size).max(0.0);
        Self {
            y: (world_height / 2.0).min(floor),
            vy: 0.0,
            ceiling_lock_ticks: 0,
        }
    }

    /// Flap: overwrite vertical velocity
    pub fn apply_impulse(&mut self, velocity: f32) {
        self.vy = velocity;
    }

    /// Apply one tick of gravity. Returns `false` if a ceiling lock held the
    /// actor in place instead.
    pub fn integrate(&mut self, gravity: f32) -> bool {
        if self.ceiling_lock_ticks > 0 {
            self.ceiling_lock_ticks -= 1;
            return false;
        }
        self.vy += gravity;
        self.y += self.vy;
        true
    }

    /// Enforce `0 <= y <= world_height - actor_size`.
    ///
    /// Falling below the floor is always terminal. Rising above the ceiling is
    /// clamped, then handled per `ceiling` policy.
    pub fn clamp_bounds(
        &mut self,
        world_height: f32,
        actor_size: f32,
        ceiling: CeilingPolicy,
    ) -> BoundsCheck {
        if self.y > world_height - actor_size {
            return BoundsCheck::Terminal(TerminalCause::Ground);
        }
        if self.y < 0.0 {
            self.y = 0.0;
            self.vy = 0.0;
            return match ceiling {
                CeilingPolicy::Terminal => BoundsCheck::Terminal(TerminalCause::Ceiling),
                CeilingPolicy::Slide => BoundsCheck::Pinned,
                CeilingPolicy::Lock { ticks } => {
                    self.ceiling_lock_ticks = ticks;
                    BoundsCheck::Pinned
                }
            };
        }
        BoundsCheck::Inside
    }

    #[inline]
    pub fn is_ceiling_locked(&self) -> bool {
        self.ceiling_lock_ticks > 0
    }

    /// Bounding box given the actor's fixed column and size
    pub fn rect(&self, x: f32, size: f32) -> Rect {
        Rect::new(x, self.y, size, size)
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self, size: f32) -> f32 {
        self.y + size
    }
}
