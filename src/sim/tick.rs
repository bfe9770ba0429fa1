//! Per-tick simulation step and input handling
//!
//! Phase transitions live here and nowhere else:
//! Idle -> Running (start), Running -> Over (any terminal hit),
//! Over -> Running (restart) or Over -> Idle (return to start).

use super::actor::BoundsCheck;
use super::collision::{evaluate, hits_bonus_target};
use super::state::{GameEvent, Phase, Session, TerminalCause, TickStatus};
use crate::leaderboard::RunRecord;

/// Input commands from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a run from Idle
    Start,
    /// Flap (Running only)
    Jump,
    /// Reset after a run and immediately start the next one
    Restart,
    /// Reset after a run and go back to Idle
    ReturnToStart,
    /// Single-button control: start when idle, flap when running
    PrimaryAction,
}

/// How a finished run is reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    Restart,
    ReturnToStart,
}

/// Apply a command immediately. Commands that are not legal in the current
/// phase are ignored and return `false`.
pub fn apply_command(state: &mut Session, command: Command) -> bool {
    match (command, state.phase) {
        (Command::Start, Phase::Idle) | (Command::PrimaryAction, Phase::Idle) => {
            begin_run(state);
            true
        }
        (Command::Jump, Phase::Running) | (Command::PrimaryAction, Phase::Running) => {
            state.actor.apply_impulse(state.tuning.jump_velocity);
            state.push_event(GameEvent::Flapped);
            true
        }
        (Command::Restart, Phase::Over) => {
            reset(state);
            begin_run(state);
            true
        }
        (Command::ReturnToStart, Phase::Over) => {
            reset(state);
            state.phase = Phase::Idle;
            log::info!("Returned to start screen");
            true
        }
        _ => {
            log::trace!("Ignoring {:?} while {:?}", command, state.phase);
            false
        }
    }
}

/// Advance the session by one tick.
///
/// Order: integrate actor, check bounds, spawn/scroll/prune obstacles,
/// evaluate collisions and scoring, apply score effects, then end the run if
/// anything was terminal. A ground or ceiling hit still lets the rest of the
/// tick run, so a point cleared in the same tick counts; it takes precedence
/// over obstacle and bonus hits as the reported cause. Does nothing unless
/// Running.
pub fn advance(state: &mut Session) -> TickStatus {
    if state.phase != Phase::Running {
        return TickStatus::Halted;
    }
    state.time_ticks += 1;
    let world = state.world;

    // Actor
    state.actor.integrate(state.tuning.gravity);
    let mut cause = match state
        .actor
        .clamp_bounds(world.height, state.tuning.actor_size, state.tuning.ceiling)
    {
        BoundsCheck::Terminal(cause) => Some(cause),
        BoundsCheck::Pinned => {
            log::trace!("Actor pinned to ceiling (lock {})", state.actor.ceiling_lock_ticks);
            None
        }
        BoundsCheck::Inside => None,
    };

    // Obstacles
    let spawned = state
        .track
        .spawn_if_needed(
            world,
            state.tuning.obstacle_spacing,
            state.tuning.gap_height,
            &state.tuning.gap_placement,
            &mut state.rng,
        )
        .is_some();
    if spawned {
        state.push_event(GameEvent::ObstacleSpawned);
    }
    state.track.advance(state.scroll_speed);
    state.track.prune_expired(state.tuning.obstacle_width);

    // Collisions and scoring
    let eval = evaluate(&state.actor, &state.track, &state.tuning, world);
    for index in eval.cleared.iter().copied() {
        if state.track.mark_scored(index) {
            award_point(state);
        }
    }

    cause = cause.or(eval.collision);
    if cause.is_none() {
        if let Some(rule) = state.tuning.bonus {
            if state.level >= rule.trigger_level
                && hits_bonus_target(&state.actor, &rule, &state.tuning, world)
            {
                cause = Some(TerminalCause::BonusTarget);
            }
        }
    }

    match cause {
        Some(cause) => {
            end_run(state, cause);
            TickStatus::Halted
        }
        None => TickStatus::Continue,
    }
}

/// Shared reset routine for restart and return-to-start
fn reset(state: &mut Session) {
    state.reset_run();
    state.push_event(GameEvent::Reset);
}

fn begin_run(state: &mut Session) {
    state.reset_run();
    state.phase = Phase::Running;
    state.push_event(GameEvent::Started);
    state.push_event(GameEvent::MusicStart);
    log::info!(
        "Run started ({}x{} world, seed {})",
        state.world.width,
        state.world.height,
        state.seed
    );
}

fn end_run(state: &mut Session, cause: TerminalCause) {
    state.phase = Phase::Over;
    state.last_cause = Some(cause);
    state.high_score = state.high_score.max(state.score);

    let rank = state.leaderboard.record(RunRecord {
        score: state.score,
        level: state.level,
        ticks: state.time_ticks,
    });

    state.push_event(GameEvent::GameOver {
        final_score: state.score,
        cause,
    });
    state.push_event(GameEvent::MusicStop);
    log::info!(
        "Game over ({:?}) after {} ticks: score {}, level {}, best {}{}",
        cause,
        state.time_ticks,
        state.score,
        state.level,
        state.high_score,
        rank.map(|r| format!(", leaderboard #{}", r)).unwrap_or_default()
    );
}

/// Credit one cleared obstacle and apply progression
fn award_point(state: &mut Session) {
    state.score += 1;
    state.push_event(GameEvent::Scored { score: state.score });
    log::debug!("Score {}", state.score);

    if state.score > state.high_score {
        state.high_score = state.score;
        if !state.record_announced {
            state.record_announced = true;
            state.push_event(GameEvent::NewHighScore {
                high_score: state.high_score,
            });
        }
    }

    // Hosts may edit tuning after construction; a zero threshold means every point
    if state.score % state.tuning.level_up_every.max(1) == 0 {
        state.level += 1;
        state.scroll_speed += state.tuning.speed_increment;
        state.push_event(GameEvent::LevelUp {
            level: state.level,
            scroll_speed: state.scroll_speed,
        });
        log::info!("Level {} (scroll speed {:.2})", state.level, state.scroll_speed);

        if state
            .tuning
            .bonus
            .is_some_and(|rule| rule.trigger_level == state.level)
        {
            state.push_event(GameEvent::BonusTargetActive);
            log::info!("Bonus target active");
        }
    }
}
