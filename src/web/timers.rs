use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::surface::{Scheduler, TimerHandle, TimerKind};

type IntervalCallback = Closure<dyn FnMut()>;

/// `setInterval`-backed scheduler.
///
/// A callback may cancel its own interval (the countdown ends the round from
/// inside its tick), so cancelled closures are parked in `retired` and only
/// dropped when the next interval starts.
#[derive(Default)]
pub struct IntervalScheduler {
    active: HashMap<i32, IntervalCallback>,
    retired: Vec<IntervalCallback>,
}

impl Scheduler for IntervalScheduler {
    fn start_interval(&mut self, kind: TimerKind, period_ms: u32) -> TimerHandle {
        self.retired.clear();
        let cb: IntervalCallback = Closure::wrap(Box::new(move || {
            super::with_game(|game| game.on_timer(kind));
        }) as Box<dyn FnMut()>);
        let Some(win) = window() else {
            log::error!("no window; {kind:?} interval not started");
            return TimerHandle(-1);
        };
        match win.set_interval_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            period_ms as i32,
        ) {
            Ok(id) => {
                log::debug!("{kind:?} every {period_ms}ms (#{id})");
                self.active.insert(id, cb);
                TimerHandle(id)
            }
            Err(e) => {
                log::error!("setInterval failed for {kind:?}: {e:?}");
                TimerHandle(-1)
            }
        }
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(win) = window() {
            win.clear_interval_with_handle(handle.0);
        }
        if let Some(cb) = self.active.remove(&handle.0) {
            self.retired.push(cb);
        }
    }
}
