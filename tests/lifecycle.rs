// Round lifecycle: start, countdown win, pollution loss, restart, menu and
// timer bookkeeping.

mod common;

use clean_drops::config::Difficulty;
use clean_drops::session::{DropKind, Outcome, Phase};
use clean_drops::surface::{Screen, TimerKind};
use common::*;

#[test]
fn new_controller_is_idle_without_timers() {
    let game = new_game();
    assert_eq!(game.phase(), Phase::Idle);
    assert!(game.scheduler().active.is_empty());
}

#[test]
fn start_freezes_profile_and_starts_both_intervals() {
    let game = started(Difficulty::Hard);
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.difficulty(), Difficulty::Hard);
    assert_eq!(game.state().time_left, 25);
    assert_eq!(game.scheduler().period_of(TimerKind::Countdown), Some(1_000));
    assert_eq!(game.scheduler().period_of(TimerKind::Spawn), Some(520));
    assert_eq!(game.surface().last_screen(), Some(Screen::Playing));
    assert_eq!(game.surface().last_hud().time_pct, 100.0);
}

#[test]
fn countdown_to_zero_wins_with_confetti() {
    let mut game = started(Difficulty::Normal);
    for _ in 0..29 {
        game.on_timer(TimerKind::Countdown);
    }
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.state().time_left, 1);
    game.on_timer(TimerKind::Countdown);
    assert_eq!(game.phase(), Phase::Ended(Outcome::Win));
    assert_eq!(game.surface().celebrations, 1);
    assert_eq!(game.surface().freezes, 1);
    assert!(game.scheduler().active.is_empty());
    assert_eq!(game.surface().last_screen(), Some(Screen::Summary { people: 0 }));
}

#[test]
fn ten_dirty_catches_lose_without_confetti() {
    let mut game = started(Difficulty::Normal);
    for i in 1..=9 {
        drop_one(&mut game, DropKind::Dirty);
        assert_eq!(game.state().pollution, i * 10);
        assert_eq!(game.phase(), Phase::Running);
    }
    drop_one(&mut game, DropKind::Dirty);
    assert_eq!(game.state().pollution, 100);
    assert_eq!(game.phase(), Phase::Ended(Outcome::Lose));
    assert_eq!(game.surface().celebrations, 0);
    assert!(game.scheduler().active.is_empty());
}

#[test]
fn ticks_after_the_round_ended_change_nothing() {
    let mut game = started(Difficulty::Normal);
    for _ in 0..10 {
        drop_one(&mut game, DropKind::Dirty);
    }
    let snapshot = game.state().clone();
    game.on_timer(TimerKind::Countdown);
    game.on_timer(TimerKind::Spawn);
    assert_eq!(game.state(), &snapshot);
    assert_eq!(game.phase(), Phase::Ended(Outcome::Lose));
    assert_eq!(game.surface().celebrations, 0);
}

#[test]
fn stale_fall_after_end_is_removed_without_effect() {
    let mut game = started(Difficulty::Normal);
    let straggler = spawn(&mut game, DropKind::Clean);
    for _ in 0..10 {
        drop_one(&mut game, DropKind::Dirty);
    }
    assert_eq!(game.phase(), Phase::Ended(Outcome::Lose));
    game.on_fall_complete(straggler);
    assert_eq!(game.state().score, 0);
    assert!(game.surface().removed.contains(&straggler));
    assert_eq!(game.live_drops(), 0);
}

#[test]
fn win_and_lose_are_exclusive() {
    let mut game = started(Difficulty::Normal);
    for _ in 0..29 {
        game.on_timer(TimerKind::Countdown);
    }
    let last = spawn(&mut game, DropKind::Dirty);
    for _ in 0..9 {
        drop_one(&mut game, DropKind::Dirty);
    }
    // the countdown runs out in the same tick as the tenth dirty landing
    game.on_timer(TimerKind::Countdown);
    game.on_fall_complete(last);
    assert_eq!(game.phase(), Phase::Ended(Outcome::Win));
    assert_eq!(game.state().pollution, 90);
}

#[test]
fn restart_resets_every_round_field() {
    let mut game = started(Difficulty::Normal);
    for _ in 0..12 {
        drop_one(&mut game, DropKind::Clean);
    }
    drop_one(&mut game, DropKind::Dirty);
    drop_one(&mut game, DropKind::Obstacle);
    game.on_timer(TimerKind::Countdown);
    assert!(game.state().villages > 0);

    game.restart();
    let s = game.state();
    assert_eq!((s.score, s.pollution, s.clean_meter, s.dirty_meter, s.villages), (0, 0, 0, 0, 0));
    assert_eq!(s.speed_multiplier, 1.0);
    assert_eq!(s.spawn_interval_ms, 600);
    assert_eq!(s.time_left, 30);
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.scheduler().count(TimerKind::Countdown), 1);
    assert_eq!(game.scheduler().count(TimerKind::Spawn), 1);
    assert_eq!(game.scheduler().period_of(TimerKind::Spawn), Some(600));
}

#[test]
fn replay_after_loss_skips_start_screen() {
    let mut game = started(Difficulty::Easy);
    for _ in 0..10 {
        drop_one(&mut game, DropKind::Dirty);
    }
    game.restart();
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.difficulty(), Difficulty::Easy);
    assert!(!game.surface().screens.iter().any(|s| *s == Screen::Start));
}

#[test]
fn menu_stops_timers_and_shows_start() {
    let mut game = started(Difficulty::Normal);
    drop_one(&mut game, DropKind::Clean);
    game.show_menu();
    assert_eq!(game.phase(), Phase::Idle);
    assert!(game.scheduler().active.is_empty());
    assert_eq!(game.state().score, 0);
    assert_eq!(game.surface().last_screen(), Some(Screen::Start));
    // from the menu after a finished round, stopping again is harmless
    game.show_menu();
    assert_eq!(game.phase(), Phase::Idle);
}

#[test]
fn profile_changes_only_at_next_start() {
    let mut game = started(Difficulty::Normal);
    game.restart();
    assert_eq!(game.profile().duration_secs, 30);
    game.start(Difficulty::Easy);
    assert_eq!(game.profile().duration_secs, 35);
    assert_eq!(game.state().spawn_interval_ms, 650);
}

#[test]
fn restart_clears_leftover_drops() {
    let mut game = started(Difficulty::Normal);
    let old = spawn(&mut game, DropKind::Clean);
    let clears = game.surface().clears;
    game.restart();
    assert_eq!(game.surface().clears, clears + 1);
    assert_eq!(game.live_drops(), 0);
    // the old animation finishing later must not score in the new round
    game.on_fall_complete(old);
    assert_eq!(game.state().score, 0);
}
