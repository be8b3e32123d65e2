//! Double-tap classification for key switch transitions.
//!
//! A double tap is press, release, press, release on the same slot, with
//! every gap shorter than [`DOUBLE_TAP_TIMEOUT`].  While a candidate
//! sequence is in flight its transitions are buffered, not delivered; the
//! moment the pattern completes they are replaced by a synthesized
//! [`Event::DoubleTap`] pair.  If the pattern breaks, or the drain timer
//! fires first, the buffered transitions are released as ordinary key
//! events.
//!
//! The buffer is deliberately pure: it never touches the timer registry
//! itself.  [`TapBuffer::accept`] reports what should happen to the drain
//! timer and the event source carries it out, which keeps every transition
//! here testable with plain values.

use std::collections::HashSet;
use std::time::Duration;

use tracing::debug;

use crate::domain::event::{Event, KeyTransition};

/// Window within which each next transition of a double tap must arrive.
pub const DOUBLE_TAP_TIMEOUT: Duration = Duration::from_millis(200);

/// Reserved timer id for the pending-buffer drain deadline.
pub const DOUBLE_TAP_TIMER_ID: &str = "_DRAIN_DOUBLE_TAP_BUFFER";

/// A flush releases at most this many buffered transitions.
///
/// A full press/release pair is the most that is ever worth replaying; a
/// third buffered press is dropped rather than delivered as a phantom
/// held key.
const MAX_FLUSH: usize = 2;

/// What the event source should do with the drain timer after a
/// classification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOp {
    /// (Re)arm the drain timer for a fresh [`DOUBLE_TAP_TIMEOUT`].
    Arm,
    /// Cancel the drain timer; nothing is buffered anymore.
    Cancel,
}

/// Outcome of classifying one key transition.
#[derive(Debug, PartialEq)]
pub struct Classified {
    /// Events to deliver this tick, in order.
    pub events: Vec<Event>,
    /// Required drain timer adjustment.
    pub timer: TimerOp,
}

/// The double-tap buffer for the currently focused app.
///
/// Tracks a fixed set of slots; transitions on any other slot pass through
/// untouched (after draining whatever was buffered, since any interleaved
/// key activity breaks a tap sequence).
pub struct TapBuffer {
    tracked: HashSet<usize>,
    pending: Vec<KeyTransition>,
}

impl TapBuffer {
    pub fn new(tracked: impl IntoIterator<Item = usize>) -> Self {
        Self { tracked: tracked.into_iter().collect(), pending: Vec::new() }
    }

    pub fn is_tracked(&self, slot: usize) -> bool {
        self.tracked.contains(&slot)
    }

    /// Whether nothing is currently buffered.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Classifies one transition.
    ///
    /// The pending buffer only ever holds one of the shapes `[P]`, `[P,R]`,
    /// `[P,R,P]` for a single slot.  A transition that extends the shape is
    /// buffered; the fourth transition completes the double tap; anything
    /// else drains the buffer into plain key events.
    pub fn accept(&mut self, event: KeyTransition) -> Classified {
        if !self.is_tracked(event.slot) {
            return self.flush_and_forward(event);
        }

        if self.pending.first().is_some_and(|first| first.slot != event.slot) {
            // A different tracked slot cancels the sequence in flight.  The
            // old buffer drains, then the new transition is classified
            // against an empty buffer so a press can open a fresh sequence.
            let mut events = self.flush_events();
            let tail = self.accept(event);
            events.extend(tail.events);
            return Classified { events, timer: tail.timer };
        }

        match (self.pending.len(), event.pressed) {
            (0, true) | (1, false) | (2, true) => {
                self.pending.push(event);
                Classified { events: Vec::new(), timer: TimerOp::Arm }
            }
            (3, false) => {
                self.pending.clear();
                debug!("double tap completed on slot {}", event.slot);
                Classified {
                    events: vec![
                        Event::DoubleTap { slot: event.slot, pressed: true },
                        Event::DoubleTap { slot: event.slot, pressed: false },
                    ],
                    timer: TimerOp::Cancel,
                }
            }
            _ => self.flush_and_forward(event),
        }
    }

    /// Drains the buffer into plain key transitions, truncated to
    /// [`MAX_FLUSH`].
    pub fn flush(&mut self) -> Vec<KeyTransition> {
        if self.pending.len() > MAX_FLUSH {
            debug!("dropping {} over-buffered transition(s) on flush", self.pending.len() - MAX_FLUSH);
            self.pending.truncate(MAX_FLUSH);
        }
        std::mem::take(&mut self.pending)
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn flush_events(&mut self) -> Vec<Event> {
        self.flush().into_iter().map(Event::Key).collect()
    }

    fn flush_and_forward(&mut self, event: KeyTransition) -> Classified {
        let mut events = self.flush_events();
        events.push(Event::Key(event));
        Classified { events, timer: TimerOp::Cancel }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
