//! Demo-mode player
//!
//! Flaps whenever the actor sinks below a floor just above the next gap's
//! bottom edge. Good enough for attract screens and headless soak runs.

use crate::sim::{Obstacle, Session};

/// Simple gap-following controller
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// How far above the gap's bottom edge the actor's bottom should stay
    pub margin: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { margin: 30.0 }
    }
}

impl Autopilot {
    pub fn new(margin: f32) -> Self {
        Self { margin }
    }

    /// Next obstacle the actor still has to pass
    pub fn next_obstacle<'a>(&self, session: &'a Session) -> Option<&'a Obstacle> {
        let t = &session.tuning;
        session
            .obstacles()
            .find(|o| o.right_edge(t.obstacle_width) >= t.actor_x)
    }

    /// Lowest the actor's bottom edge should sink before flapping
    pub fn target_floor(&self, session: &Session) -> f32 {
        match self.next_obstacle(session) {
            Some(o) => o.gap_bottom - self.margin,
            None => session.world.height / 2.0 + session.tuning.actor_size,
        }
    }

    /// Whether to flap this tick
    pub fn decide(&self, session: &Session) -> bool {
        if !session.is_running() || session.actor.vy < 0.0 {
            return false;
        }
        session.actor.bottom(session.tuning.actor_size) > self.target_floor(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Phase, TickStatus, WorldSize};
    use crate::tuning::{GapPlacement, Tuning};

    #[test]
    fn test_idle_never_flaps() {
        let s = Session::with_seed(5);
        assert!(!Autopilot::default().decide(&s));
    }

    #[test]
    fn test_flaps_only_when_sinking_below_floor() {
        let mut s = Session::with_seed(5);
        s.request_start();
        let pilot = Autopilot::default();

        // No obstacles: floor is mid-world + actor size (340)
        s.actor.y = 310.0;
        s.actor.vy = 1.0;
        assert!(pilot.decide(&s));

        s.actor.vy = -1.0;
        assert!(!pilot.decide(&s));

        s.actor.y = 250.0;
        s.actor.vy = 1.0;
        assert!(!pilot.decide(&s));
    }

    #[test]
    fn test_clears_fixed_gaps() {
        // Margins collapse the placement range so every gap sits at 175..425
        let tuning = Tuning {
            gap_placement: GapPlacement::new(175.0, 175.0),
            ..Default::default()
        };
        let mut s = Session::new(tuning, WorldSize::new(800.0, 600.0), 42);
        s.request_start();
        let pilot = Autopilot::default();

        for _ in 0..2000 {
            if pilot.decide(&s) {
                s.request_jump();
            }
            if s.advance() == TickStatus::Halted {
                break;
            }
        }
        assert_eq!(s.phase, Phase::Running, "crashed: {:?}", s.last_cause);
        assert!(s.score >= 5, "score {}", s.score);
    }
}
