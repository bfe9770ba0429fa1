//! Collision and scoring evaluation
//!
//! Pure functions over the actor and the obstacle track. They report what
//! happened; the tick applies it. All overlap tests are strict: touching a
//! barrier edge exactly is not a hit.

use super::actor::Actor;
use super::geom::Rect;
use super::state::{TerminalCause, WorldSize};
use super::track::{Obstacle, ObstacleTrack};
use crate::tuning::{BonusRule, Tuning};

/// Result of evaluating one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// First terminal collision found, if any
    pub collision: Option<TerminalCause>,
    /// Track indices of obstacles cleared this tick and not yet scored
    pub cleared: Vec<usize>,
}

impl Evaluation {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.collision.is_some()
    }
}

/// Whether the actor's vertical span leaves the gap.
///
/// `actor_top == gap_top` or `actor_bottom == gap_bottom` is a pass.
#[inline]
pub fn outside_gap(actor_top: f32, actor_size: f32, obstacle: &Obstacle) -> bool {
    actor_top < obstacle.gap_top || actor_top + actor_size > obstacle.gap_bottom
}

/// Check the actor against every obstacle sharing its column and collect
/// obstacles it has fully passed.
///
/// Scanning stops at the first obstacle entirely to the right of the actor;
/// the track is ordered left to right so nothing behind it can interact.
pub fn evaluate(actor: &Actor, track: &ObstacleTrack, tuning: &Tuning, world: WorldSize) -> Evaluation {
    let mut eval = Evaluation::default();
    let size = tuning.actor_size;
    let width = tuning.obstacle_width;
    let actor_rect = actor.rect(tuning.actor_x, size);

    for (index, obstacle) in track.iter().enumerate() {
        if obstacle.x >= actor_rect.max.x {
            break;
        }

        if actor_rect.overlaps_x(&obstacle.column(width, world.height))
            && outside_gap(actor.y, size, obstacle)
            && eval.collision.is_none()
        {
            eval.collision = Some(TerminalCause::Obstacle);
        }

        if !obstacle.scored && obstacle.right_edge(width) < tuning.actor_x {
            eval.cleared.push(index);
        }
    }

    eval
}

/// Rectangle of the end-game target: the rule's column, restricted to a band
/// centred on the world's vertical midpoint.
pub fn bonus_target_rect(rule: &BonusRule, world: WorldSize) -> Rect {
    let mid = world.height / 2.0;
    Rect::new(
        rule.x,
        mid - rule.band_height / 2.0,
        rule.width,
        rule.band_height,
    )
}

/// Whether the actor touches the end-game target
pub fn hits_bonus_target(actor: &Actor, rule: &BonusRule, tuning: &Tuning, world: WorldSize) -> bool {
    actor
        .rect(tuning.actor_x, tuning.actor_size)
        .overlaps(&bonus_target_rect(rule, world))
}
