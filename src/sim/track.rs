//! Obstacle track
//!
//! A FIFO of gapped obstacles scrolling right-to-left. Insertion order is also
//! left-to-right order: the front is always the oldest, leftmost obstacle.
//! The collision evaluator relies on this to stop scanning early.

use std::collections::VecDeque;
use std::collections::vec_deque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::WorldSize;
use crate::tuning::GapPlacement;

/// A top/bottom barrier pair with a vertical opening
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Bottom edge of the top barrier
    pub gap_top: f32,
    /// Top edge of the bottom barrier (`gap_top + gap_height`)
    pub gap_bottom: f32,
    /// Whether the actor has already been credited for clearing it
    pub scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: f32, gap_height: f32) -> Self {
        Self {
            x,
            gap_top,
            gap_bottom: gap_top + gap_height,
            scored: false,
        }
    }

    #[inline]
    pub fn gap_height(&self) -> f32 {
        self.gap_bottom - self.gap_top
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Full-height column the obstacle occupies
    pub fn column(&self, width: f32, world_height: f32) -> Rect {
        Rect::new(self.x, 0.0, width, world_height)
    }

    /// Top and bottom barrier rectangles (for renderers)
    pub fn walls(&self, width: f32, world_height: f32) -> [Rect; 2] {
        [
            Rect::new(self.x, 0.0, width, self.gap_top.max(0.0)),
            Rect::new(
                self.x,
                self.gap_bottom,
                width,
                (world_height - self.gap_bottom).max(0.0),
            ),
        ]
    }
}

/// Ordered queue of live obstacles
#[derive(Debug, Clone, Default)]
pub struct ObstacleTrack {
    obstacles: VecDeque<Obstacle>,
    /// Obstacles spawned since the last clear
    spawned: u64,
}

impl ObstacleTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an obstacle at the right edge when the track is empty or the
    /// newest obstacle has scrolled past `world.width - spacing`.
    ///
    /// `gap_top` is drawn uniformly from the placement range; a degenerate
    /// range yields its lower bound. Returns the new obstacle, if any.
    pub fn spawn_if_needed<R: Rng + ?Sized>(
        &mut self,
        world: WorldSize,
        spacing: f32,
        gap_height: f32,
        placement: &GapPlacement,
        rng: &mut R,
    ) -> Option<&Obstacle> {
        let due = match self.obstacles.back() {
            None => true,
            Some(last) => last.x < world.width - spacing,
        };
        if !due {
            return None;
        }

        let (lower, upper) = placement.gap_top_range(world.height, gap_height);
        // Both ends are legal placements; equal bounds pin the gap
        let gap_top = rng.random_range(lower..=upper);

        self.obstacles
            .push_back(Obstacle::new(world.width, gap_top, gap_height));
        self.spawned += 1;
        log::debug!(
            "Spawned obstacle #{} gap {:.1}..{:.1}",
            self.spawned,
            gap_top,
            gap_top + gap_height
        );
        self.obstacles.back()
    }

    /// Scroll every obstacle left by `scroll_speed`
    pub fn advance(&mut self, scroll_speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= scroll_speed;
        }
    }

    /// Drop obstacles that have fully left the world on the left.
    /// Returns how many were removed.
    pub fn prune_expired(&mut self, obstacle_width: f32) -> usize {
        let mut removed = 0;
        while self
            .obstacles
            .front()
            .is_some_and(|o| o.right_edge(obstacle_width) < 0.0)
        {
            self.obstacles.pop_front();
            removed += 1;
        }
        removed
    }

    /// Mark the obstacle at `index` as scored. Returns `true` only on the
    /// first call for that obstacle.
    pub fn mark_scored(&mut self, index: usize) -> bool {
        match self.obstacles.get_mut(index) {
            Some(o) if !o.scored => {
                o.scored = true;
                true
            }
            _ => false,
        }
    }

    /// Append an obstacle behind the newest one.
    ///
    /// Callers must keep the track ordered left to right.
    pub fn push(&mut self, obstacle: Obstacle) {
        debug_assert!(self.obstacles.back().is_none_or(|b| b.x <= obstacle.x));
        self.obstacles.push_back(obstacle);
        self.spawned += 1;
    }

    /// Iterate oldest (leftmost) first. The iterator is `Clone`, so it can be
    /// restarted without touching the track.
    pub fn iter(&self) -> vec_deque::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    pub fn front(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    pub fn back(&self) -> Option<&Obstacle> {
        self.obstacles.back()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.spawned = 0;
    }
}

impl<'a> IntoIterator for &'a ObstacleTrack {
    type Item = &'a Obstacle;
    type IntoIter = vec_deque::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world() -> WorldSize {
        WorldSize::new(800.0, 600.0)
    }

    #[test]
    fn test_spawn_respects_spacing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut track = ObstacleTrack::new();
        let placement = GapPlacement::default();

        assert!(track
            .spawn_if_needed(world(), 300.0, 250.0, &placement, &mut rng)
            .is_some());
        // Newest is still at the right edge
        assert!(track
            .spawn_if_needed(world(), 300.0, 250.0, &placement, &mut rng)
            .is_none());

        // Exactly at the threshold is not enough (strict)
        track.advance(300.0);
        assert!(track
            .spawn_if_needed(world(), 300.0, 250.0, &placement, &mut rng)
            .is_none());

        track.advance(0.5);
        let spawned = track
            .spawn_if_needed(world(), 300.0, 250.0, &placement, &mut rng)
            .copied();
        assert_eq!(spawned.map(|o| o.x), Some(800.0));
        assert_eq!(track.len(), 2);
    }

    #[test]
    fn test_gap_within_margins() {
        let mut rng = Pcg32::seed_from_u64(7);
        let placement = GapPlacement::new(50.0, 50.0);
        for _ in 0..200 {
            let mut track = ObstacleTrack::new();
            let o = *track
                .spawn_if_needed(world(), 300.0, 250.0, &placement, &mut rng)
                .unwrap();
            assert!(o.gap_top >= 50.0 && o.gap_top <= 300.0);
            assert_eq!(o.gap_height(), 250.0);
        }
    }

    /// Always yields its largest output
    struct MaxRng;

    impl rand::RngCore for MaxRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xff);
        }
    }

    #[test]
    fn test_gap_can_sit_on_bottom_margin() {
        let placement = GapPlacement::new(50.0, 50.0);
        let mut track = ObstacleTrack::new();
        let o = *track
            .spawn_if_needed(world(), 300.0, 250.0, &placement, &mut MaxRng)
            .unwrap();
        assert!((o.gap_top - 300.0).abs() < 0.01, "gap_top = {}", o.gap_top);
    }

    #[test]
    fn test_exact_fit_pins_gap() {
        let mut rng = Pcg32::seed_from_u64(11);
        let placement = GapPlacement::new(100.0, 250.0);
        for _ in 0..20 {
            let mut track = ObstacleTrack::new();
            let o = *track
                .spawn_if_needed(world(), 300.0, 250.0, &placement, &mut rng)
                .unwrap();
            assert_eq!(o.gap_top, 100.0);
        }
    }

    #[test]
    fn test_oversized_gap_clamps_to_top() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut track = ObstacleTrack::new();
        let o = *track
            .spawn_if_needed(
                WorldSize::new(800.0, 100.0),
                300.0,
                250.0,
                &GapPlacement::new(20.0, 20.0),
                &mut rng,
            )
            .unwrap();
        assert_eq!(o.gap_top, 0.0);
        assert_eq!(o.gap_bottom, 250.0);
    }

    #[test]
    fn test_advance_and_prune() {
        let mut track = ObstacleTrack::new();
        track.push(Obstacle::new(-70.0, 100.0, 250.0));
        track.push(Obstacle::new(-60.0, 100.0, 250.0));
        track.push(Obstacle::new(200.0, 100.0, 250.0));

        // Right edge -10 is gone, right edge exactly 0 stays
        assert_eq!(track.prune_expired(60.0), 1);
        assert_eq!(track.front().map(|o| o.x), Some(-60.0));

        track.advance(2.0);
        assert_eq!(track.front().map(|o| o.x), Some(-62.0));
        assert_eq!(track.back().map(|o| o.x), Some(198.0));
        assert_eq!(track.prune_expired(60.0), 1);
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn test_mark_scored_once() {
        let mut track = ObstacleTrack::new();
        track.push(Obstacle::new(0.0, 100.0, 250.0));
        assert!(track.mark_scored(0));
        assert!(!track.mark_scored(0));
        assert!(!track.mark_scored(5));
        assert!(track.get(0).unwrap().scored);
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut track = ObstacleTrack::new();
        track.push(Obstacle::new(10.0, 100.0, 250.0));
        track.push(Obstacle::new(20.0, 100.0, 250.0));

        let it = track.iter();
        let first: Vec<f32> = it.clone().map(|o| o.x).collect();
        let second: Vec<f32> = it.map(|o| o.x).collect();
        assert_eq!(first, vec![10.0, 20.0]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_walls() {
        let o = Obstacle::new(100.0, 150.0, 250.0);
        let [top, bottom] = o.walls(60.0, 600.0);
        assert_eq!(top.height(), 150.0);
        assert_eq!(bottom.min.y, 400.0);
        assert_eq!(bottom.height(), 200.0);
    }
}
