//! Per-round bookkeeping: score, pollution, meters, speed ramp and village
//! milestones. Pure state, no collaborators, so every rule here is tested
//! without a surface.

use crate::config::{
    DifficultyProfile, METER_MAX, METER_STEP, POINTS_PER_VILLAGE, SPAWN_INTERVAL_STEP_MS,
};
use crate::surface::Hud;

use super::DropKind;

#[derive(Clone, Debug, PartialEq)]
pub struct RoundState {
    pub time_left: u32,
    pub score: u32,
    pub pollution: u32,
    pub clean_meter: u32,
    pub dirty_meter: u32,
    pub running: bool,
    pub speed_multiplier: f64,
    pub spawn_interval_ms: u32,
    pub villages: u32,
}

impl RoundState {
    pub fn new(profile: &DifficultyProfile) -> Self {
        Self {
            time_left: profile.duration_secs,
            score: 0,
            pollution: 0,
            clean_meter: 0,
            dirty_meter: 0,
            running: false,
            speed_multiplier: 1.0,
            spawn_interval_ms: profile.spawn_interval_ms,
            villages: 0,
        }
    }

    pub fn polluted(&self) -> bool {
        self.pollution >= METER_MAX
    }

    /// Apply one catch and return the village counts it reached, ascending.
    pub fn apply_catch(&mut self, kind: DropKind, profile: &DifficultyProfile) -> Vec<u32> {
        match kind {
            DropKind::Clean => {
                self.score += 1;
                self.clean_meter = bump(self.clean_meter);
            }
            DropKind::Dirty => {
                self.score = self.score.saturating_sub(1);
                self.pollution = bump(self.pollution);
                self.dirty_meter = bump(self.dirty_meter);
            }
            DropKind::Obstacle => {
                self.score = self.score.saturating_sub(2);
                self.speed_multiplier = round2(self.speed_multiplier + profile.speed_step);
                self.spawn_interval_ms = self
                    .spawn_interval_ms
                    .saturating_sub(SPAWN_INTERVAL_STEP_MS)
                    .max(profile.min_spawn_interval_ms)
                    .min(self.spawn_interval_ms);
            }
        }
        self.sync_villages()
    }

    /// Recompute `floor(score / 10)` and return each newly reached count.
    /// Never lowers the stored count when the score falls.
    pub fn sync_villages(&mut self) -> Vec<u32> {
        let reached = self.score / POINTS_PER_VILLAGE;
        if reached <= self.villages {
            return Vec::new();
        }
        let gained = (self.villages + 1..=reached).collect();
        self.villages = reached;
        gained
    }

    /// Returns `true` when the countdown has run out.
    pub fn tick_clock(&mut self) -> bool {
        self.time_left = self.time_left.saturating_sub(1);
        self.time_left == 0
    }

    pub fn hud(&self, profile: &DifficultyProfile) -> Hud {
        let total = self.clean_meter + self.dirty_meter;
        let clean_pct = if total > 0 {
            (f64::from(self.clean_meter) / f64::from(total) * 100.0).round() as u32
        } else {
            0
        };
        let dirty_pct = if total > 0 { 100 - clean_pct } else { 0 };
        let time_pct = if profile.duration_secs > 0 {
            f64::from(self.time_left) / f64::from(profile.duration_secs) * 100.0
        } else {
            0.0
        };
        Hud { score: self.score, time_pct, clean_pct, dirty_pct, pollution: self.pollution }
    }
}

fn bump(meter: u32) -> u32 {
    (meter + METER_STEP).min(METER_MAX)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn village_message(count: u32) -> String {
    let label = if count == 1 { "1 village".to_string() } else { format!("{count} villages") };
    format!("Clean water delivered to {label}! 💛")
}
