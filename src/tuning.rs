//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. Hosts may load it
//! from JSON; missing fields fall back to the reference values in
//! [`crate::consts`].

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};

/// Named tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Reference constants, no gap margins, ceiling contact ends the run
    #[default]
    Standard,
    /// The original arcade feel: 50px gap margins, actor slides along the ceiling
    Classic,
    /// Ceiling contact pins the actor for a short grace period
    Sticky,
    /// Standard rules plus the end-game target
    Bonus,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Standard,
        Preset::Classic,
        Preset::Sticky,
        Preset::Bonus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Standard => "standard",
            Preset::Classic => "classic",
            Preset::Sticky => "sticky",
            Preset::Bonus => "bonus",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "default" => Ok(Preset::Standard),
            "classic" => Ok(Preset::Classic),
            "sticky" => Ok(Preset::Sticky),
            "bonus" => Ok(Preset::Bonus),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// What happens when the actor rises above the top of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CeilingPolicy {
    /// Touching the ceiling ends the run
    #[default]
    Terminal,
    /// Clamp to the ceiling and zero velocity; falling resumes next tick
    Slide,
    /// Clamp, zero velocity and suspend gravity for `ticks` ticks
    Lock { ticks: u32 },
}

impl CeilingPolicy {
    /// Map a lock duration onto a policy (`0` = terminal)
    pub fn from_lock_duration(ticks: u32) -> Self {
        if ticks == 0 {
            CeilingPolicy::Terminal
        } else {
            CeilingPolicy::Lock { ticks }
        }
    }

    /// Lock duration in ticks (0 when the policy has no lock)
    pub fn lock_duration(&self) -> u32 {
        match self {
            CeilingPolicy::Lock { ticks } => *ticks,
            _ => 0,
        }
    }
}

/// Reserved bands above and below the range a gap may be placed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GapPlacement {
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl GapPlacement {
    pub fn new(margin_top: f32, margin_bottom: f32) -> Self {
        Self {
            margin_top,
            margin_bottom,
        }
    }

    /// Range `[lower, upper]` for `gap_top`, clamped so it is never inverted
    /// or negative. A degenerate range collapses to a single value.
    pub fn gap_top_range(&self, world_height: f32, gap_height: f32) -> (f32, f32) {
        let upper = (world_height - gap_height - self.margin_bottom.max(0.0)).max(0.0);
        let lower = self.margin_top.max(0.0).min(upper);
        (lower, upper)
    }
}

/// End-game target that appears at a designated level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusRule {
    /// Level at which the target becomes active
    pub trigger_level: u32,
    /// Left edge of the target
    pub x: f32,
    /// Horizontal extent of the target
    pub width: f32,
    /// Height of the band centred on the world's vertical midpoint
    pub band_height: f32,
}

impl Default for BonusRule {
    fn default() -> Self {
        Self {
            trigger_level: 5,
            x: 400.0,
            width: OBSTACLE_WIDTH,
            band_height: 120.0,
        }
    }
}

/// Complete simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Actor ===
    pub gravity: f32,
    pub jump_velocity: f32,
    pub actor_size: f32,
    pub actor_x: f32,
    pub ceiling: CeilingPolicy,

    // === Progression ===
    pub base_scroll_speed: f32,
    pub speed_increment: f32,
    pub level_up_every: u32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub gap_height: f32,
    pub obstacle_spacing: f32,
    pub gap_placement: GapPlacement,

    /// Optional end-game target
    pub bonus: Option<BonusRule>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            actor_size: ACTOR_SIZE,
            actor_x: ACTOR_X,
            ceiling: CeilingPolicy::Terminal,

            base_scroll_speed: BASE_SCROLL_SPEED,
            speed_increment: SPEED_INCREMENT,
            level_up_every: LEVEL_UP_EVERY,

            obstacle_width: OBSTACLE_WIDTH,
            gap_height: GAP_HEIGHT,
            obstacle_spacing: OBSTACLE_SPACING,
            gap_placement: GapPlacement::default(),

            bonus: None,
        }
    }
}

impl Tuning {
    /// Create tuning from a preset (applies preset defaults)
    pub fn from_preset(preset: Preset) -> Self {
        let mut tuning = Self::default();
        tuning.apply_preset(preset);
        tuning
    }

    /// Apply a preset's rule changes on top of the current values
    pub fn apply_preset(&mut self, preset: Preset) {
        match preset {
            Preset::Standard => {}
            Preset::Classic => {
                self.gap_placement = GapPlacement::new(50.0, 50.0);
                self.ceiling = CeilingPolicy::Slide;
            }
            Preset::Sticky => {
                self.gap_placement = GapPlacement::new(50.0, 50.0);
                self.ceiling = CeilingPolicy::Lock { ticks: 30 };
            }
            Preset::Bonus => {
                self.bonus = Some(BonusRule::default());
            }
        }
    }

    /// Parse tuning from JSON and sanitize it
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Replace values the simulation cannot run with by their defaults.
    ///
    /// Never fails; each replacement is logged as a warning.
    pub fn sanitized(mut self) -> Self {
        let d = Tuning::default();

        self.gravity = finite(self.gravity, d.gravity, "gravity");
        self.jump_velocity = finite(self.jump_velocity, d.jump_velocity, "jump_velocity");
        self.actor_size = positive(self.actor_size, d.actor_size, "actor_size");
        self.actor_x = non_negative(self.actor_x, d.actor_x, "actor_x");

        self.base_scroll_speed =
            positive(self.base_scroll_speed, d.base_scroll_speed, "base_scroll_speed");
        self.speed_increment =
            non_negative(self.speed_increment, d.speed_increment, "speed_increment");
        if self.level_up_every == 0 {
            log::warn!("level_up_every must be > 0, using {}", d.level_up_every);
            self.level_up_every = d.level_up_every;
        }

        self.obstacle_width = positive(self.obstacle_width, d.obstacle_width, "obstacle_width");
        self.gap_height = non_negative(self.gap_height, d.gap_height, "gap_height");
        self.obstacle_spacing =
            positive(self.obstacle_spacing, d.obstacle_spacing, "obstacle_spacing");
        self.gap_placement.margin_top =
            non_negative(self.gap_placement.margin_top, 0.0, "gap_placement.margin_top");
        self.gap_placement.margin_bottom =
            non_negative(self.gap_placement.margin_bottom, 0.0, "gap_placement.margin_bottom");

        if let Some(bonus) = self.bonus.as_mut() {
            let bd = BonusRule::default();
            bonus.trigger_level = bonus.trigger_level.max(1);
            bonus.x = finite(bonus.x, bd.x, "bonus.x");
            bonus.width = positive(bonus.width, bd.width, "bonus.width");
            bonus.band_height = non_negative(bonus.band_height, bd.band_height, "bonus.band_height");
        }

        self
    }
}

fn finite(value: f32, fallback: f32, name: &str) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("{} is not finite, using {}", name, fallback);
        fallback
    }
}

fn positive(value: f32, fallback: f32, name: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("{} must be > 0 (got {}), using {}", name, value, fallback);
        fallback
    }
}

fn non_negative(value: f32, fallback: f32, name: &str) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("{} must be >= 0 (got {}), using {}", name, value, fallback);
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_tuning() {
        let t = Tuning::default();
        assert_eq!(t.gravity, 0.2);
        assert_eq!(t.jump_velocity, -4.0);
        assert_eq!(t.base_scroll_speed, 2.0);
        assert_eq!(t.level_up_every, 10);
        assert_eq!(t.ceiling, CeilingPolicy::Terminal);
        assert_eq!(t.gap_placement, GapPlacement::default());
        assert!(t.bonus.is_none());
    }

    #[test]
    fn test_lock_duration_mapping() {
        assert_eq!(CeilingPolicy::from_lock_duration(0), CeilingPolicy::Terminal);
        assert_eq!(
            CeilingPolicy::from_lock_duration(12),
            CeilingPolicy::Lock { ticks: 12 }
        );
        assert_eq!(CeilingPolicy::Lock { ticks: 12 }.lock_duration(), 12);
        assert_eq!(CeilingPolicy::Slide.lock_duration(), 0);
    }

    #[test]
    fn test_gap_range_with_margins() {
        let placement = GapPlacement::new(50.0, 50.0);
        assert_eq!(placement.gap_top_range(600.0, 250.0), (50.0, 250.0));
    }

    #[test]
    fn test_gap_range_degenerate_collapses() {
        // Gap taller than the world: range collapses to 0
        let placement = GapPlacement::default();
        assert_eq!(placement.gap_top_range(200.0, 250.0), (0.0, 0.0));

        // Margins eat the whole range: lower bound pulled down to upper
        let placement = GapPlacement::new(300.0, 100.0);
        let (lo, hi) = placement.gap_top_range(600.0, 250.0);
        assert_eq!(lo, hi);
        assert_eq!(hi, 250.0);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("Classic".parse::<Preset>().unwrap(), Preset::Classic);
        assert_eq!(" sticky ".parse::<Preset>().unwrap(), Preset::Sticky);
        assert!(matches!(
            "turbo".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(_))
        ));
        for preset in Preset::ALL {
            assert_eq!(preset.as_str().parse::<Preset>().unwrap(), preset);
        }
    }

    #[test]
    fn test_presets() {
        let classic = Tuning::from_preset(Preset::Classic);
        assert_eq!(classic.ceiling, CeilingPolicy::Slide);
        assert_eq!(classic.gap_placement.margin_top, 50.0);

        let sticky = Tuning::from_preset(Preset::Sticky);
        assert_eq!(sticky.ceiling.lock_duration(), 30);

        assert!(Tuning::from_preset(Preset::Bonus).bonus.is_some());
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let t = Tuning::from_json(r#"{ "gap_height": 180.0, "ceiling": { "mode": "lock", "ticks": 8 } }"#)
            .unwrap();
        assert_eq!(t.gap_height, 180.0);
        assert_eq!(t.ceiling, CeilingPolicy::Lock { ticks: 8 });
        assert_eq!(t.obstacle_width, OBSTACLE_WIDTH);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_sanitize_replaces_bad_values() {
        let t = Tuning {
            base_scroll_speed: -1.0,
            actor_size: 0.0,
            speed_increment: f32::NAN,
            level_up_every: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.base_scroll_speed, BASE_SCROLL_SPEED);
        assert_eq!(t.actor_size, ACTOR_SIZE);
        assert_eq!(t.speed_increment, SPEED_INCREMENT);
        assert_eq!(t.level_up_every, LEVEL_UP_EVERY);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
