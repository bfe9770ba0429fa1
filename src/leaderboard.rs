//! Run leaderboard
//!
//! Keeps the best finished runs for the lifetime of a session, ordered by
//! score, then level reached, then fewest ticks. Serializable so a host can
//! persist it; the core never does I/O for it.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

/// Default number of runs kept
pub const LEADERBOARD_SIZE: usize = 10;

/// Summary of one finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunRecord {
    /// Obstacles cleared
    pub score: u32,
    /// Level reached
    pub level: u32,
    /// Length of the run in ticks
    pub ticks: u64,
}

impl RunRecord {
    /// Sort key, smallest first: higher score, higher level, shorter run
    fn standing(&self) -> (Reverse<u32>, Reverse<u32>, u64) {
        (Reverse(self.score), Reverse(self.level), self.ticks)
    }
}

fn default_capacity() -> usize {
    LEADERBOARD_SIZE
}

/// Bounded, always-sorted table of runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    runs: Vec<RunRecord>,
    #[serde(default = "default_capacity")]
    capacity: usize,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::with_capacity(LEADERBOARD_SIZE)
    }
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding at most `capacity` runs (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            runs: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Index `run` would be inserted at. Equal runs keep arrival order.
    fn slot(&self, run: &RunRecord) -> usize {
        let key = run.standing();
        self.runs.partition_point(|r| r.standing() <= key)
    }

    /// 1-indexed place `run` would take, or `None` if it would not make the
    /// table. Scoreless runs never place.
    pub fn placement(&self, run: &RunRecord) -> Option<usize> {
        if run.score == 0 {
            return None;
        }
        let slot = self.slot(run);
        (slot < self.capacity).then_some(slot + 1)
    }

    /// Insert a finished run, dropping whatever falls off the bottom.
    /// Returns the place taken.
    pub fn record(&mut self, run: RunRecord) -> Option<usize> {
        let place = self.placement(&run)?;
        self.runs.insert(place - 1, run);
        self.runs.truncate(self.capacity);
        Some(place)
    }

    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    pub fn best(&self) -> Option<&RunRecord> {
        self.runs.first()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.best().map(|r| r.score)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(score: u32, level: u32, ticks: u64) -> RunRecord {
        RunRecord {
            score,
            level,
            ticks,
        }
    }

    #[test]
    fn test_scoreless_run_never_places() {
        let mut board = Leaderboard::new();
        assert_eq!(board.placement(&run(0, 1, 50)), None);
        assert_eq!(board.record(run(0, 1, 50)), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_ranks_by_score_then_level_then_ticks() {
        let mut board = Leaderboard::new();
        assert_eq!(board.record(run(5, 1, 900)), Some(1));
        assert_eq!(board.record(run(12, 2, 2000)), Some(1));
        // Same score, faster run ranks higher
        assert_eq!(board.record(run(5, 1, 700)), Some(2));
        assert_eq!(board.record(run(5, 2, 1500)), Some(2));

        let order: Vec<(u32, u32, u64)> = board
            .runs()
            .iter()
            .map(|r| (r.score, r.level, r.ticks))
            .collect();
        assert_eq!(
            order,
            vec![(12, 2, 2000), (5, 2, 1500), (5, 1, 700), (5, 1, 900)]
        );
        assert_eq!(board.top_score(), Some(12));
    }

    #[test]
    fn test_identical_runs_keep_arrival_order() {
        let mut board = Leaderboard::new();
        board.record(run(3, 1, 400));
        assert_eq!(board.record(run(3, 1, 400)), Some(2));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_full_board_drops_the_bottom() {
        let mut board = Leaderboard::with_capacity(3);
        for score in [4, 8, 6] {
            board.record(run(score, 1, 100));
        }
        assert_eq!(board.placement(&run(2, 1, 100)), None);
        assert_eq!(board.record(run(7, 1, 100)), Some(2));

        let scores: Vec<u32> = board.runs().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![8, 7, 6]);
        assert_eq!(board.capacity(), 3);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut board = Leaderboard::with_capacity(0);
        assert_eq!(board.record(run(1, 1, 10)), Some(1));
        assert_eq!(board.record(run(2, 1, 10)), Some(1));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_json_shape() {
        let mut board = Leaderboard::with_capacity(5);
        board.record(run(4, 1, 640));
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(
            json,
            r#"{"runs":[{"score":4,"level":1,"ticks":640}],"capacity":5}"#
        );

        let restored: Leaderboard = serde_json::from_str(r#"{"runs":[]}"#).unwrap();
        assert_eq!(restored.capacity(), LEADERBOARD_SIZE);
    }
}
