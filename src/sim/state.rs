//! Game state and core simulation types
//!
//! One [`Session`] owns everything that changes during play: the actor, the
//! obstacle track, progression counters and the seeded RNG. Hosts mutate it
//! only through `advance()` and the input commands in [`super::tick`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::track::{Obstacle, ObstacleTrack};
use super::tick::{self, Command, ResetMode};
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::leaderboard::Leaderboard;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Phase {
    /// Waiting for a start signal; nothing integrates
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for a reset
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalCause {
    /// Fell below the bottom of the world
    Ground,
    /// Touched the top of the world under the terminal ceiling policy
    Ceiling,
    /// Hit an obstacle barrier
    Obstacle,
    /// Reached the end-game target
    BonusTarget,
}

/// Events produced by the simulation, drained by hosts (UI, audio)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (Idle/Over -> Running)
    Started,
    /// The actor flapped
    Flapped,
    /// A new obstacle entered on the right
    ObstacleSpawned,
    /// An obstacle was cleared
    Scored { score: u32 },
    /// Level and scroll speed increased
    LevelUp { level: u32, scroll_speed: f32 },
    /// The end-game target became active
    BonusTargetActive,
    /// The run beat the previous best (emitted once per run)
    NewHighScore { high_score: u32 },
    /// The run ended
    GameOver { final_score: u32, cause: TerminalCause },
    /// Session state was reinitialized after a run
    Reset,
    /// Background music should start (Running entered)
    MusicStart,
    /// Background music should stop (Running left)
    MusicStop,
}

/// Result of one `advance()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Still running; schedule another tick
    Continue,
    /// Not running; the driver should stop ticking
    Halted,
}

/// World dimensions supplied by the host layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

impl WorldSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.width > 0.0 && self.height.is_finite() && self.height > 0.0
    }

    /// Replace each unusable dimension with the one from `fallback`
    pub fn sanitized_or(self, fallback: WorldSize) -> WorldSize {
        let pick = |name: &str, value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                log::warn!("Ignoring world {} {}, keeping {}", name, value, fallback);
                fallback
            }
        };
        WorldSize {
            width: pick("width", self.width, fallback.width),
            height: pick("height", self.height, fallback.height),
        }
    }
}

impl Default for WorldSize {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_HEIGHT)
    }
}

/// Values a HUD displays
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub scroll_speed: f32,
    pub phase: Phase,
}

/// Pending events kept between drains; older ones are dropped past this
pub const MAX_PENDING_EVENTS: usize = 256;

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Balance constants (sanitized on construction)
    pub tuning: Tuning,
    /// World size read at the start of every tick
    pub world: WorldSize,
    /// Current phase
    pub phase: Phase,
    /// Player actor
    pub actor: Actor,
    /// Live obstacles
    pub track: ObstacleTrack,
    /// Score of the current (or last) run
    pub score: u32,
    /// Best score seen during this session's lifetime
    pub high_score: u32,
    /// Current level (starts at 1)
    pub level: u32,
    /// Current obstacle scroll speed
    pub scroll_speed: f32,
    /// Ticks advanced in the current run
    pub time_ticks: u64,
    /// Cause of the last terminal transition
    pub last_cause: Option<TerminalCause>,
    /// Finished runs
    pub leaderboard: Leaderboard,
    /// Whether `NewHighScore` fired in this run
    pub(crate) record_announced: bool,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    /// Events discarded since the last drain
    pub(crate) dropped_events: usize,
}

impl Session {
    /// Create an idle session with the given tuning, world and seed
    pub fn new(tuning: Tuning, world: WorldSize, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        let world = world.sanitized_or(WorldSize::default());
        let actor = Actor::spawn(world.height, tuning.actor_size);
        let scroll_speed = tuning.base_scroll_speed;
        Self {
            seed,
            tuning,
            world,
            phase: Phase::Idle,
            actor,
            track: ObstacleTrack::new(),
            score: 0,
            high_score: 0,
            level: 1,
            scroll_speed,
            time_ticks: 0,
            last_cause: None,
            leaderboard: Leaderboard::new(),
            record_announced: false,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            dropped_events: 0,
        }
    }

    /// Idle session with reference tuning and the default world
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Tuning::default(), WorldSize::default(), seed)
    }

    /// Reinitialize actor, track and progression. `high_score` and the
    /// leaderboard are kept.
    pub fn reset_run(&mut self) {
        self.actor = Actor::spawn(self.world.height, self.tuning.actor_size);
        self.track.clear();
        self.score = 0;
        self.level = 1;
        self.scroll_speed = self.tuning.base_scroll_speed;
        self.time_ticks = 0;
        self.last_cause = None;
        self.record_announced = false;
    }

    /// Advance one tick (no-op unless Running)
    pub fn advance(&mut self) -> TickStatus {
        tick::advance(self)
    }

    /// Apply an input command. Returns `false` if it was ignored.
    pub fn handle(&mut self, command: Command) -> bool {
        tick::apply_command(self, command)
    }

    pub fn request_start(&mut self) -> bool {
        self.handle(Command::Start)
    }

    pub fn request_jump(&mut self) -> bool {
        self.handle(Command::Jump)
    }

    pub fn request_reset(&mut self, mode: ResetMode) -> bool {
        self.handle(match mode {
            ResetMode::Restart => Command::Restart,
            ResetMode::ReturnToStart => Command::ReturnToStart,
        })
    }

    /// Update world dimensions; takes effect on the next tick. Non-finite or
    /// non-positive dimensions are ignored.
    pub fn resize(&mut self, world: WorldSize) {
        let world = world.sanitized_or(self.world);
        if world != self.world {
            log::debug!("World resized to {}x{}", world.width, world.height);
            self.world = world;
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Final score, available once the run is over
    pub fn final_score(&self) -> Option<u32> {
        (self.phase == Phase::Over).then_some(self.score)
    }

    /// Obstacles for rendering, oldest first
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> + Clone + '_ {
        self.track.iter()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            high_score: self.high_score,
            level: self.level,
            scroll_speed: self.scroll_speed,
            phase: self.phase,
        }
    }

    /// Whether the end-game target is live at the current level
    pub fn bonus_active(&self) -> bool {
        self.tuning
            .bonus
            .is_some_and(|rule| self.level >= rule.trigger_level)
    }

    /// Events emitted since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events. Hosts should drain every tick; at most
    /// [`MAX_PENDING_EVENTS`] are held, newest kept.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.dropped_events = 0;
        std::mem::take(&mut self.events)
    }

    /// Events discarded since the last drain because nobody drained
    pub fn dropped_events(&self) -> usize {
        self.dropped_events
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
            if self.dropped_events == 0 {
                log::warn!(
                    "Event queue full ({} pending), dropping oldest until drained",
                    MAX_PENDING_EVENTS
                );
            }
            self.dropped_events += 1;
        }
        self.events.push(event);
    }
}
