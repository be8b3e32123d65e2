//! Named one-shot timers.
//!
//! Timers are cooperative: nothing preempts the event loop.  The dispatcher
//! calls [`TimerRegistry::execute_ready`] once per tick, after input
//! polling, and every timer whose deadline has passed fires then.  Ids are
//! caller-chosen strings; adding a timer under an existing id replaces it,
//! which is how the double-tap drain window gets extended while taps keep
//! arriving.
//!
//! Callbacks may return events, which the source appends to the current
//! tick's batch after all polled events.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::device::Macropad;
use crate::domain::event::Event;
use crate::domain::settings::Settings;

/// What a timer callback gets to work with when it fires.
pub struct TimerContext<'a> {
    pub device: &'a mut dyn Macropad,
    pub settings: &'a mut Settings,
}

/// A timer callback.  Returned events join the current tick's batch.
pub type TimerCallback = Box<dyn FnMut(&mut TimerContext<'_>) -> Vec<Event>>;

struct Timer {
    fire_at: Instant,
    callback: TimerCallback,
}

/// Registry of pending named timers.
pub struct TimerRegistry {
    timers: HashMap<String, Timer>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self { timers: HashMap::new() }
    }

    /// Schedules `callback` to fire once `delay` has elapsed.
    ///
    /// An existing timer under the same id is replaced, deadline and
    /// callback both.
    pub fn add(&mut self, id: impl Into<String>, delay: Duration, callback: TimerCallback) {
        self.add_at(id, Instant::now() + delay, callback);
    }

    /// Schedules `callback` against an absolute deadline.
    pub fn add_at(&mut self, id: impl Into<String>, fire_at: Instant, callback: TimerCallback) {
        let id = id.into();
        debug!("timer armed: {id:?}");
        self.timers.insert(id, Timer { fire_at, callback });
    }

    /// Cancels a timer.  Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) {
        if self.timers.remove(id).is_some() {
            debug!("timer cancelled: {id:?}");
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.timers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Fires every timer whose deadline has passed.
    pub fn execute_ready(&mut self, ctx: &mut TimerContext<'_>) -> Vec<Event> {
        self.execute_ready_at(Instant::now(), ctx)
    }

    /// Fires every timer due at `now`, taking the clock as an argument so
    /// tests can manufacture deadlines.
    ///
    /// Due timers fire in deadline order, id order breaking ties.  Each is
    /// removed from the registry before its callback runs, so a callback
    /// never observes itself as still pending.
    pub fn execute_ready_at(&mut self, now: Instant, ctx: &mut TimerContext<'_>) -> Vec<Event> {
        let mut due: Vec<(Instant, String)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.fire_at <= now)
            .map(|(id, timer)| (timer.fire_at, id.clone()))
            .collect();
        due.sort();

        let mut events = Vec::new();
        for (_, id) in due {
            if let Some(mut timer) = self.timers.remove(&id) {
                debug!("timer fired: {id:?}");
                events.extend((timer.callback)(ctx));
            }
        }
        events
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
