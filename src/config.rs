//! Difficulty presets and gameplay tuning constants.
//!
//! A [`DifficultyProfile`] is picked once when a round starts and stays frozen
//! until the next start; nothing in a running round writes to it.

use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

// --- Tuning constants --------------------------------------------------------

/// Countdown period.
pub const COUNTDOWN_PERIOD_MS: u32 = 1_000;
/// Spawn interval reduction applied per caught obstacle.
pub const SPAWN_INTERVAL_STEP_MS: u32 = 80;
/// Pollution and meter increments per catch.
pub const METER_STEP: u32 = 10;
pub const METER_MAX: u32 = 100;
/// Score points per village milestone.
pub const POINTS_PER_VILLAGE: u32 = 10;

pub const DROP_SIZE_MIN: f64 = 28.0;
pub const DROP_SIZE_SPREAD: f64 = 22.0;
pub const FALL_BASE_SECS: f64 = 1.2;
pub const FALL_SPREAD_SECS: f64 = 1.2;
pub const FALL_MIN_SECS: f64 = 0.5;

pub const TOAST_MS: u32 = 1_600;
pub const HIT_FEEDBACK_MS: u32 = 500;
pub const QUALITY_FEEDBACK_MS: u32 = 520;
pub const BOOST_BADGE_MS: u32 = 750;

/// Fallback catcher width when layout reports zero (element not yet laid out).
pub const DEFAULT_CATCHER_WIDTH: f64 = 120.0;

// --- Profiles ----------------------------------------------------------------

/// Immutable per-round tuning record.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyProfile {
    pub duration_secs: u32,
    pub spawn_interval_ms: u32,
    pub clean_chance: f64,
    pub obstacle_chance: f64,
    pub min_spawn_interval_ms: u32,
    pub speed_step: f64,
}

impl DifficultyProfile {
    /// Reject profiles that would break the round invariants (zero-length
    /// rounds, probabilities outside [0,1], a floor above the start interval).
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |reason: &str| Err(GameError::InvalidProfile(reason.to_string()));
        if self.duration_secs == 0 {
            return invalid("duration must be positive");
        }
        if self.min_spawn_interval_ms == 0 {
            return invalid("minimum spawn interval must be positive");
        }
        if self.min_spawn_interval_ms > self.spawn_interval_ms {
            return invalid("minimum spawn interval exceeds the starting interval");
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&self.clean_chance) || !unit.contains(&self.obstacle_chance) {
            return invalid("probabilities must lie in [0, 1]");
        }
        if self.speed_step.is_nan() || self.speed_step < 0.0 {
            return invalid("speed step must be non-negative");
        }
        Ok(())
    }

    /// Parse a custom profile from JSON, e.g. for tuning sessions.
    #[cfg(feature = "serde_json")]
    pub fn from_json(text: &str) -> Result<Self, GameError> {
        let profile: Self =
            serde_json::from_str(text).map_err(|e| GameError::InvalidProfile(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }
}

/// Named preset selectable from the start screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

pub const EASY: DifficultyProfile = DifficultyProfile {
    duration_secs: 35,
    spawn_interval_ms: 650,
    clean_chance: 0.70,
    obstacle_chance: 0.10,
    min_spawn_interval_ms: 260,
    speed_step: 0.12,
};

pub const NORMAL: DifficultyProfile = DifficultyProfile {
    duration_secs: 30,
    spawn_interval_ms: 600,
    clean_chance: 0.65,
    obstacle_chance: 0.15,
    min_spawn_interval_ms: 250,
    speed_step: 0.15,
};

pub const HARD: DifficultyProfile = DifficultyProfile {
    duration_secs: 25,
    spawn_interval_ms: 520,
    clean_chance: 0.58,
    obstacle_chance: 0.20,
    min_spawn_interval_ms: 220,
    speed_step: 0.18,
};

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Normal, Self::Hard];

    pub fn profile(self) -> DifficultyProfile {
        match self {
            Self::Easy => EASY,
            Self::Normal => NORMAL,
            Self::Hard => HARD,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GameError::UnknownDifficulty(wanted.to_string()))
    }
}
