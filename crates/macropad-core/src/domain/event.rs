//! Events produced by the engine's per-tick classification pass.
//!
//! Raw hardware state never reaches an app directly.  The event source
//! compares encoder and key switch state against the previous tick and emits
//! the differences as [`Event`] values; the double-tap classifier may replace
//! buffered key transitions with a synthesized [`Event::DoubleTap`] pair.

/// Number of key switches on the pad (3x4 grid).
pub const KEY_COUNT: usize = 12;

/// A single key switch changing state, identified by its slot index.
///
/// Slots are numbered 0..12 left-to-right, top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    /// Slot index in `0..KEY_COUNT`.
    pub slot: usize,
    /// `true` on press, `false` on release.
    pub pressed: bool,
}

impl KeyTransition {
    /// A press transition for `slot`.
    pub fn press(slot: usize) -> Self {
        Self { slot, pressed: true }
    }

    /// A release transition for `slot`.
    pub fn release(slot: usize) -> Self {
        Self { slot, pressed: false }
    }
}

/// One classified input event, delivered to the focused app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The rotary encoder detent position changed.
    ///
    /// Carries both the new and the prior position so the app can tell the
    /// direction without tracking state of its own.
    EncoderRotate { position: i32, previous_position: i32 },

    /// The encoder push switch changed state.  Emitted on edges only, never
    /// repeated while the switch is held.
    EncoderButton { pressed: bool },

    /// A key switch changed state and was not absorbed by the double-tap
    /// classifier.
    Key(KeyTransition),

    /// A completed double tap on a tracked slot.
    ///
    /// The classifier emits these in pairs within the same tick: first
    /// `pressed: true`, then `pressed: false`.
    DoubleTap { slot: usize, pressed: bool },
}
