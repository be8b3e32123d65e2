//! Per-tick device polling and event ordering.
//!
//! Each poll reads the encoder, the encoder switch, and at most one key
//! transition, in that fixed order, then appends whatever expired timers
//! return.  The ordering is part of the engine's contract; apps may rely
//! on it within a tick.
//!
//! Key transitions are routed through the focused app's [`TapBuffer`] when
//! one is installed.  The source owns the coupling between classifier and
//! timer registry: a buffered transition (re)arms the drain timer, a
//! drained or completed sequence cancels it, and the drain callback flushes
//! the same shared buffer.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::device::Macropad;
use crate::domain::event::{Event, KeyTransition};
use crate::domain::settings::Settings;
use crate::engine::tap::{TapBuffer, TimerOp, DOUBLE_TAP_TIMEOUT, DOUBLE_TAP_TIMER_ID};
use crate::engine::timer::{TimerContext, TimerRegistry};

/// Polls the device and produces the per-tick event batch.
pub struct EventSource {
    last_encoder_position: i32,
    last_encoder_button: bool,
    tap: Option<Rc<RefCell<TapBuffer>>>,
}

impl EventSource {
    /// A source seeded with the device's current state, so the first poll
    /// reports changes rather than absolute readings.
    pub fn new(device: &mut dyn Macropad) -> Self {
        Self {
            last_encoder_position: device.encoder_position(),
            last_encoder_button: device.encoder_button_pressed(),
            tap: None,
        }
    }

    /// Replaces the double-tap tracking set.
    ///
    /// Anything buffered for the previous app is dropped along with its
    /// drain timer; key history must not leak across a focus change.  An
    /// empty set disables tracking entirely.
    pub fn track(&mut self, slots: impl IntoIterator<Item = usize>, timers: &mut TimerRegistry) {
        timers.delete(DOUBLE_TAP_TIMER_ID);
        let tracked: Vec<usize> = slots.into_iter().collect();
        if tracked.is_empty() {
            self.tap = None;
        } else {
            debug!("tracking double taps on slots {tracked:?}");
            self.tap = Some(Rc::new(RefCell::new(TapBuffer::new(tracked))));
        }
    }

    /// One tick: encoder rotation, encoder button, classified key
    /// transition, then expired-timer events.
    pub fn poll(
        &mut self,
        device: &mut dyn Macropad,
        timers: &mut TimerRegistry,
        settings: &mut Settings,
    ) -> Vec<Event> {
        let mut events = Vec::new();

        let position = device.encoder_position();
        if position != self.last_encoder_position {
            events.push(Event::EncoderRotate {
                position,
                previous_position: self.last_encoder_position,
            });
            self.last_encoder_position = position;
        }

        let pressed = device.encoder_button_pressed();
        if pressed != self.last_encoder_button {
            events.push(Event::EncoderButton { pressed });
            self.last_encoder_button = pressed;
        }

        if let Some(transition) = device.poll_key_transition() {
            events.extend(self.classify(transition, timers));
        }

        let mut ctx = TimerContext { device, settings };
        events.extend(timers.execute_ready(&mut ctx));
        events
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn classify(&mut self, transition: KeyTransition, timers: &mut TimerRegistry) -> Vec<Event> {
        let Some(buffer) = &self.tap else {
            return vec![Event::Key(transition)];
        };

        let classified = buffer.borrow_mut().accept(transition);
        match classified.timer {
            TimerOp::Arm => {
                let handle = Rc::clone(buffer);
                timers.add(
                    DOUBLE_TAP_TIMER_ID,
                    DOUBLE_TAP_TIMEOUT,
                    Box::new(move |_| {
                        handle.borrow_mut().flush().into_iter().map(Event::Key).collect()
                    }),
                );
            }
            TimerOp::Cancel => timers.delete(DOUBLE_TAP_TIMER_ID),
        }
        classified.events
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
