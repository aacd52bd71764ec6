//! Collaborator seams between the game core and the page.
//!
//! The controller never touches DOM, audio or timer primitives directly. The
//! browser build implements these traits in [`crate::web`]; tests plug in
//! recording fakes.

use crate::session::{DropKind, DropSpec};

/// Axis-aligned rectangle in page pixels (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Catch test: `self` (a falling drop) has reached `catcher`'s top edge and
    /// the horizontal spans intersect. Touching side edges do not count.
    pub fn lands_on(&self, catcher: &Rect) -> bool {
        self.bottom() >= catcher.top && self.left < catcher.right() && self.right() > catcher.left
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DropId(pub u32);

/// Snapshot pushed to the HUD after every state change.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hud {
    pub score: u32,
    /// Remaining time as a percentage of the round duration.
    pub time_pct: f64,
    pub clean_pct: u32,
    pub dirty_pct: u32,
    pub pollution: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    Summary { people: u32 },
}

pub trait Surface {
    fn play_area(&self) -> Rect;
    fn catcher_bounds(&self) -> Rect;
    /// Current bounds of a live drop; `None` once the element is gone.
    fn drop_bounds(&self, id: DropId) -> Option<Rect>;

    /// Create the visual element and arrange for
    /// [`GameController::on_fall_complete`](crate::session::GameController::on_fall_complete)
    /// to be called once its fall animation ends. `None` when no element could
    /// be created; no completion will follow.
    fn spawn_drop(&mut self, spec: &DropSpec) -> Option<DropId>;
    fn remove_drop(&mut self, id: DropId);
    fn clear_drops(&mut self);
    /// Stop every in-flight fall animation where it is.
    fn freeze_drops(&mut self);

    /// Catcher left edge, relative to the play area's left edge.
    fn set_catcher_x(&mut self, x: f64);

    fn render_hud(&mut self, hud: &Hud);
    fn feedback(&mut self, kind: DropKind);
    fn toast(&mut self, message: &str, duration_ms: u32);
    fn show_screen(&mut self, screen: Screen);
    fn celebrate(&mut self);
}

/// Audio cue identifiers, one per drop kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Clean,
    Dirty,
    Obstacle,
}

impl Cue {
    pub const ALL: [Self; 3] = [Self::Clean, Self::Dirty, Self::Obstacle];

    pub fn asset_path(self) -> &'static str {
        match self {
            Self::Clean => "sound/clean-boing.wav",
            Self::Dirty => "sound/dirty-leak.wav",
            Self::Obstacle => "sound/obstacle-beep.mp3",
        }
    }

    pub fn volume(self) -> f64 {
        match self {
            Self::Clean => 0.55,
            Self::Dirty | Self::Obstacle => 0.60,
        }
    }
}

impl From<DropKind> for Cue {
    fn from(kind: DropKind) -> Self {
        match kind {
            DropKind::Clean => Self::Clean,
            DropKind::Dirty => Self::Dirty,
            DropKind::Obstacle => Self::Obstacle,
        }
    }
}

/// Fire-and-forget playback. Implementations log failures and never report
/// them to the caller.
pub trait SoundPlayer {
    fn play(&mut self, cue: Cue);
    fn set_enabled(&mut self, enabled: bool);
    fn is_enabled(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Countdown,
    Spawn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// Periodic callbacks. A started interval repeatedly delivers its
/// [`TimerKind`] to the controller until cancelled.
pub trait Scheduler {
    fn start_interval(&mut self, kind: TimerKind, period_ms: u32) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lands_on_requires_bottom_at_or_past_top() {
        let catcher = Rect::new(100.0, 500.0, 120.0, 80.0);
        assert!(Rect::new(120.0, 460.0, 40.0, 40.0).lands_on(&catcher));
        assert!(!Rect::new(120.0, 459.0, 40.0, 40.0).lands_on(&catcher));
    }

    #[test]
    fn lands_on_ignores_edge_contact() {
        let catcher = Rect::new(100.0, 500.0, 120.0, 80.0);
        assert!(!Rect::new(60.0, 520.0, 40.0, 40.0).lands_on(&catcher));
        assert!(!Rect::new(220.0, 520.0, 40.0, 40.0).lands_on(&catcher));
        assert!(Rect::new(61.0, 520.0, 40.0, 40.0).lands_on(&catcher));
    }
}
