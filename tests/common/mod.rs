// In-memory collaborators for driving GameController without a browser.
#![allow(dead_code)]

use std::collections::BTreeMap;

use clean_drops::config::Difficulty;
use clean_drops::rng::ScriptedRandom;
use clean_drops::session::{DropKind, DropSpec, GameController};
use clean_drops::surface::{
    Cue, DropId, Hud, Rect, Scheduler, Screen, SoundPlayer, Surface, TimerHandle, TimerKind,
};

pub const PLAY: Rect = Rect { left: 0.0, top: 0.0, width: 360.0, height: 640.0 };
pub const CATCHER: Rect = Rect { left: 120.0, top: 560.0, width: 120.0, height: 60.0 };

pub struct FakeSurface {
    pub play: Rect,
    pub spawned: Vec<(DropId, DropSpec)>,
    pub alive: BTreeMap<DropId, Rect>,
    pub removed: Vec<DropId>,
    pub hud: Vec<Hud>,
    pub toasts: Vec<String>,
    pub feedback: Vec<DropKind>,
    pub screens: Vec<Screen>,
    pub catcher_x: Option<f64>,
    pub celebrations: u32,
    pub freezes: u32,
    pub clears: u32,
    /// When false, every drop lands beside the catcher.
    pub on_target: bool,
    /// When true, drop elements cannot be created.
    pub broken: bool,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self {
            play: PLAY,
            spawned: Vec::new(),
            alive: BTreeMap::new(),
            removed: Vec::new(),
            hud: Vec::new(),
            toasts: Vec::new(),
            feedback: Vec::new(),
            screens: Vec::new(),
            catcher_x: None,
            celebrations: 0,
            freezes: 0,
            clears: 0,
            on_target: true,
            broken: false,
        }
    }

    pub fn last_hud(&self) -> Hud {
        self.hud.last().copied().unwrap_or_default()
    }

    pub fn last_screen(&self) -> Option<Screen> {
        self.screens.last().copied()
    }
}

impl Surface for FakeSurface {
    fn play_area(&self) -> Rect {
        self.play
    }
    fn catcher_bounds(&self) -> Rect {
        CATCHER
    }
    fn drop_bounds(&self, id: DropId) -> Option<Rect> {
        self.alive.get(&id).copied()
    }
    fn spawn_drop(&mut self, spec: &DropSpec) -> Option<DropId> {
        if self.broken {
            return None;
        }
        let id = DropId(self.spawned.len() as u32);
        // Bounds at the end of the fall: resting on the catcher, or off to the side.
        let left = if self.on_target { CATCHER.left + 10.0 } else { 0.0 };
        let width = if self.on_target { spec.size } else { 40.0 };
        self.alive.insert(id, Rect::new(left, CATCHER.top - spec.size + 5.0, width, spec.size));
        self.spawned.push((id, *spec));
        Some(id)
    }
    fn remove_drop(&mut self, id: DropId) {
        self.alive.remove(&id);
        self.removed.push(id);
    }
    fn clear_drops(&mut self) {
        self.alive.clear();
        self.clears += 1;
    }
    fn freeze_drops(&mut self) {
        self.freezes += 1;
    }
    fn set_catcher_x(&mut self, x: f64) {
        self.catcher_x = Some(x);
    }
    fn render_hud(&mut self, hud: &Hud) {
        self.hud.push(*hud);
    }
    fn feedback(&mut self, kind: DropKind) {
        self.feedback.push(kind);
    }
    fn toast(&mut self, message: &str, _duration_ms: u32) {
        self.toasts.push(message.to_string());
    }
    fn show_screen(&mut self, screen: Screen) {
        self.screens.push(screen);
    }
    fn celebrate(&mut self) {
        self.celebrations += 1;
    }
}

pub struct FakeSound {
    pub played: Vec<Cue>,
    pub enabled: bool,
}

impl Default for FakeSound {
    fn default() -> Self {
        Self { played: Vec::new(), enabled: true }
    }
}

impl SoundPlayer for FakeSound {
    fn play(&mut self, cue: Cue) {
        if self.enabled {
            self.played.push(cue);
        }
    }
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[derive(Default)]
pub struct FakeScheduler {
    next: i32,
    pub active: BTreeMap<i32, (TimerKind, u32)>,
    pub started: Vec<(TimerKind, u32)>,
    pub cancelled: Vec<TimerHandle>,
}

impl FakeScheduler {
    pub fn period_of(&self, kind: TimerKind) -> Option<u32> {
        self.active.values().find(|(k, _)| *k == kind).map(|(_, p)| *p)
    }

    pub fn count(&self, kind: TimerKind) -> usize {
        self.active.values().filter(|(k, _)| *k == kind).count()
    }
}

impl Scheduler for FakeScheduler {
    fn start_interval(&mut self, kind: TimerKind, period_ms: u32) -> TimerHandle {
        self.next += 1;
        self.active.insert(self.next, (kind, period_ms));
        self.started.push((kind, period_ms));
        TimerHandle(self.next)
    }
    fn cancel(&mut self, handle: TimerHandle) {
        assert!(
            self.active.remove(&handle.0).is_some(),
            "timer {handle:?} cancelled twice or never started"
        );
        self.cancelled.push(handle);
    }
}

pub type TestGame = GameController<FakeSurface, FakeSound, FakeScheduler, ScriptedRandom>;

pub fn new_game() -> TestGame {
    GameController::new(
        FakeSurface::new(),
        FakeSound::default(),
        FakeScheduler::default(),
        ScriptedRandom::new(0.5),
    )
}

pub fn started(difficulty: Difficulty) -> TestGame {
    let mut game = new_game();
    game.start(difficulty);
    game
}

/// Queue the type draws that make the next spawn a `kind` drop.
pub fn queue_kind(game: &mut TestGame, kind: DropKind) {
    let rng = game.random_mut();
    match kind {
        DropKind::Obstacle => rng.push(0.0),
        DropKind::Clean => rng.extend([0.99, 0.0]),
        DropKind::Dirty => rng.extend([0.99, 0.99]),
    };
    // size, position, fall duration
    rng.extend([0.5, 0.5, 0.5]);
}

/// Spawn one `kind` drop and let its fall finish.
pub fn drop_one(game: &mut TestGame, kind: DropKind) -> DropId {
    let id = spawn(game, kind);
    game.on_fall_complete(id);
    id
}

pub fn spawn(game: &mut TestGame, kind: DropKind) -> DropId {
    queue_kind(game, kind);
    game.on_timer(TimerKind::Spawn);
    let (id, spec) = *game.surface().spawned.last().expect("spawn tick produced no drop");
    assert_eq!(spec.kind, kind);
    id
}
