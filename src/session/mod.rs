//! Game session controller.
//!
//! Owns the frozen [`DifficultyProfile`], the [`RoundState`] and the two
//! interval handles, and is the only thing that mutates them. Collaborators
//! call in through the `on_*` methods as their events fire:
//!
//! ```text
//!   Idle ──start──▶ Running ──time 0──▶ Ended(Win)
//!     ▲               │  ▲ └─pollution 100─▶ Ended(Lose)
//!     └────menu───────┘  └──────restart──────────┘
//! ```
//!
//! Every exit from `Running` cancels both intervals. Fall completions that
//! arrive afterwards still remove their drop but leave the round untouched.

mod drop;
mod round;

pub use drop::{DropKind, DropSpec};
pub use round::{RoundState, village_message};

use std::collections::HashMap;

use crate::config::{COUNTDOWN_PERIOD_MS, Difficulty, DifficultyProfile, TOAST_MS};
use crate::rng::RandomSource;
use crate::surface::{
    Cue, DropId, Scheduler, Screen, SoundPlayer, Surface, TimerHandle, TimerKind,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Survived the countdown.
    Win,
    /// Pollution hit the ceiling.
    Lose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Ended(Outcome),
}

#[derive(Debug, Default)]
struct Timers {
    countdown: Option<TimerHandle>,
    spawn: Option<TimerHandle>,
}

pub struct GameController<S, A, T, R> {
    surface: S,
    sound: A,
    scheduler: T,
    rng: R,
    difficulty: Difficulty,
    profile: DifficultyProfile,
    state: RoundState,
    phase: Phase,
    timers: Timers,
    /// Drops spawned this round that have not finished falling.
    live: HashMap<DropId, DropKind>,
    dragging: bool,
}

impl<S, A, T, R> GameController<S, A, T, R>
where
    S: Surface,
    A: SoundPlayer,
    T: Scheduler,
    R: RandomSource,
{
    pub fn new(surface: S, sound: A, scheduler: T, rng: R) -> Self {
        let difficulty = Difficulty::default();
        let profile = difficulty.profile();
        Self {
            surface,
            sound,
            scheduler,
            rng,
            difficulty,
            profile,
            state: RoundState::new(&profile),
            phase: Phase::Idle,
            timers: Timers::default(),
            live: HashMap::new(),
            dragging: false,
        }
    }

    // --- Accessors -------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn state(&self) -> &RoundState {
        &self.state
    }
    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
    pub fn surface(&self) -> &S {
        &self.surface
    }
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
    pub fn sound(&self) -> &A {
        &self.sound
    }
    pub fn sound_mut(&mut self) -> &mut A {
        &mut self.sound
    }
    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }
    pub fn random_mut(&mut self) -> &mut R {
        &mut self.rng
    }
    pub fn live_drops(&self) -> usize {
        self.live.len()
    }
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running && self.state.running
    }

    // --- Lifecycle -------------------------------------------------------------

    /// Start a round with a freshly selected preset.
    pub fn start(&mut self, difficulty: Difficulty) {
        self.start_with_profile(difficulty, difficulty.profile());
    }

    /// Start a round with an explicit profile, e.g. one loaded from JSON.
    pub fn start_with_profile(&mut self, difficulty: Difficulty, profile: DifficultyProfile) {
        self.difficulty = difficulty;
        self.profile = profile;
        log::info!("starting round on {difficulty}: {profile:?}");
        self.restart();
    }

    /// Reset and run again with the profile frozen at the last start.
    pub fn restart(&mut self) {
        self.reset();
        self.surface.show_screen(Screen::Playing);
        self.state.running = true;
        self.phase = Phase::Running;
        self.render_hud();
        self.timers.countdown =
            Some(self.scheduler.start_interval(TimerKind::Countdown, COUNTDOWN_PERIOD_MS));
        self.timers.spawn =
            Some(self.scheduler.start_interval(TimerKind::Spawn, self.state.spawn_interval_ms));
    }

    /// Abandon whatever is going on and return to the start screen.
    pub fn show_menu(&mut self) {
        self.reset();
        self.phase = Phase::Idle;
        self.surface.show_screen(Screen::Start);
        log::info!("back to start screen");
    }

    fn reset(&mut self) {
        self.stop_timers();
        self.dragging = false;
        self.state = RoundState::new(&self.profile);
        self.live.clear();
        self.surface.clear_drops();
        self.render_hud();
    }

    fn stop_timers(&mut self) {
        if let Some(h) = self.timers.countdown.take() {
            self.scheduler.cancel(h);
        }
        if let Some(h) = self.timers.spawn.take() {
            self.scheduler.cancel(h);
        }
    }

    fn end_round(&mut self, outcome: Outcome) {
        if self.phase != Phase::Running {
            return;
        }
        self.stop_timers();
        self.state.running = false;
        self.dragging = false;
        self.phase = Phase::Ended(outcome);
        self.surface.freeze_drops();
        if outcome == Outcome::Win {
            self.surface.celebrate();
        }
        self.surface.show_screen(Screen::Summary { people: self.state.score });
        log::info!("round ended: {outcome:?} with score {}", self.state.score);
    }

    // --- Timer & animation callbacks -------------------------------------------

    pub fn on_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Countdown => self.on_countdown_tick(),
            TimerKind::Spawn => self.on_spawn_tick(),
        }
    }

    pub fn on_countdown_tick(&mut self) {
        if !self.is_running() {
            return;
        }
        let expired = self.state.tick_clock();
        self.render_hud();
        if expired {
            self.end_round(Outcome::Win);
        }
    }

    pub fn on_spawn_tick(&mut self) {
        if !self.is_running() {
            return;
        }
        let width = self.surface.play_area().width;
        let spec = DropSpec::roll(&self.profile, self.state.speed_multiplier, width, &mut self.rng);
        let Some(id) = self.surface.spawn_drop(&spec) else {
            log::warn!("{:?} drop skipped", spec.kind);
            return;
        };
        self.live.insert(id, spec.kind);
        log::trace!("spawned {id:?}: {spec:?}");
    }

    /// Resolve a drop whose fall animation just ended, then remove it.
    /// Drops left over from an earlier round are removed without effect.
    pub fn on_fall_complete(&mut self, id: DropId) {
        let kind = self.live.remove(&id);
        if let Some(kind) = kind.filter(|_| self.is_running()) {
            let caught = self
                .surface
                .drop_bounds(id)
                .is_some_and(|b| b.lands_on(&self.surface.catcher_bounds()));
            if caught {
                self.apply_catch(kind);
            }
        }
        self.surface.remove_drop(id);
        if self.is_running() && self.state.polluted() {
            self.end_round(Outcome::Lose);
        }
    }

    fn apply_catch(&mut self, kind: DropKind) {
        let new_villages = self.state.apply_catch(kind, &self.profile);
        log::debug!(
            "caught {kind:?}: score={} pollution={} speed={}",
            self.state.score,
            self.state.pollution,
            self.state.speed_multiplier
        );
        if kind == DropKind::Obstacle {
            self.restart_spawn_cadence();
        }
        self.surface.feedback(kind);
        self.sound.play(Cue::from(kind));
        for count in new_villages {
            self.surface.toast(&village_message(count), TOAST_MS);
        }
        self.render_hud();
    }

    fn restart_spawn_cadence(&mut self) {
        if let Some(h) = self.timers.spawn.take() {
            self.scheduler.cancel(h);
        }
        self.timers.spawn =
            Some(self.scheduler.start_interval(TimerKind::Spawn, self.state.spawn_interval_ms));
    }

    // --- Catcher input ---------------------------------------------------------

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Follow the pointer while dragging a running round. Returns the clamped
    /// catcher left edge (play-area relative) when it moved.
    pub fn drag_to(&mut self, pointer_x: f64) -> Option<f64> {
        if !self.dragging || !self.is_running() {
            return None;
        }
        let play = self.surface.play_area();
        let width = self.surface.catcher_bounds().width;
        let max_x = (play.width - width).max(0.0);
        let x = (pointer_x - play.left - width / 2.0).clamp(0.0, max_x);
        self.surface.set_catcher_x(x);
        Some(x)
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound.set_enabled(enabled);
    }

    fn render_hud(&mut self) {
        let hud = self.state.hud(&self.profile);
        self.surface.render_hud(&hud);
    }
}
