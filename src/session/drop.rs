//! Drop kinds and spawn rolls.

use crate::config::{
    DROP_SIZE_MIN, DROP_SIZE_SPREAD, DifficultyProfile, FALL_BASE_SECS, FALL_MIN_SECS,
    FALL_SPREAD_SECS,
};
use crate::rng::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropKind {
    Clean,
    Dirty,
    Obstacle,
}

impl DropKind {
    /// CSS class used by the page stylesheet.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
            Self::Obstacle => "obstacle",
        }
    }

    /// Obstacle check first, then clean vs dirty on a second draw.
    pub fn roll(profile: &DifficultyProfile, rng: &mut impl RandomSource) -> Self {
        if rng.next_unit() < profile.obstacle_chance {
            Self::Obstacle
        } else if rng.next_unit() < profile.clean_chance {
            Self::Clean
        } else {
            Self::Dirty
        }
    }
}

/// Everything the surface needs to place and animate one drop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropSpec {
    pub kind: DropKind,
    /// Square edge length in pixels.
    pub size: f64,
    /// Left edge, relative to the play area.
    pub x: f64,
    pub fall_secs: f64,
}

impl DropSpec {
    pub fn roll(
        profile: &DifficultyProfile,
        speed_multiplier: f64,
        play_width: f64,
        rng: &mut impl RandomSource,
    ) -> Self {
        let kind = DropKind::roll(profile, rng);
        let size = DROP_SIZE_MIN + (rng.next_unit() * DROP_SIZE_SPREAD).round();
        let x = (rng.next_unit() * (play_width - size)).round().max(0.0);
        let base = FALL_BASE_SECS + rng.next_unit() * FALL_SPREAD_SECS;
        let fall_secs = (base / speed_multiplier.max(1.0)).max(FALL_MIN_SECS);
        Self { kind, size, x, fall_secs }
    }
}
