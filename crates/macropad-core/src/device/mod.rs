//! Hardware abstraction for the macropad.
//!
//! The engine never touches USB, I2C, or GPIO directly.  Everything it needs
//! from the hardware is expressed by the [`Macropad`] trait: reading the
//! encoder and key switches, painting the OLED and per-key LEDs, and
//! emitting HID reports toward the host.
//!
//! # Testability
//!
//! The `Macropad` trait lets unit tests drive the whole engine against
//! [`mock::MockMacropad`], which replays scripted inputs and records every
//! output call in order.
//!
//! # Failure policy
//!
//! Methods are infallible by signature.  A device backend that hits a
//! transient transport error is expected to degrade to a no-op (and log)
//! rather than surface the failure, so one bad HID write can never wedge
//! the event loop.

use crate::domain::event::KeyTransition;
use crate::keymap::consumer::ConsumerCode;
use crate::keymap::hid::KeyCode;

pub mod mock;

/// A region of the OLED display.
///
/// The engine paints a title line plus one short label per key slot; how the
/// regions map to pixels is the backend's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayRegion {
    /// The header line, normally the focused app's name.
    Title,
    /// The label area above key slot `0..KEY_COUNT`.
    KeySlot(usize),
}

/// Mouse button identifier used by mouse actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Everything the engine needs from the physical pad.
///
/// Readers take `&mut self` because real backends debounce and latch state
/// while being read.  Display and LED writes are buffered: nothing is
/// visible until [`refresh_display`](Macropad::refresh_display) or
/// [`show_pixels`](Macropad::show_pixels) is called.
pub trait Macropad {
    // ── Inputs ────────────────────────────────────────────────────────────────

    /// Current detent position of the rotary encoder.
    fn encoder_position(&mut self) -> i32;

    /// Whether the encoder push switch is currently held.
    fn encoder_button_pressed(&mut self) -> bool;

    /// The next debounced key switch transition, if one is waiting.
    ///
    /// At most one transition is returned per call; the engine polls once
    /// per tick.
    fn poll_key_transition(&mut self) -> Option<KeyTransition>;

    // ── LEDs ──────────────────────────────────────────────────────────────────

    /// Stages a packed `0xRRGGBB` color for one key slot.
    fn set_pixel(&mut self, slot: usize, color: u32);

    /// Pushes all staged pixel colors to the LEDs.
    fn show_pixels(&mut self);

    // ── Display ───────────────────────────────────────────────────────────────

    /// Stages text for one display region.
    fn set_display_text(&mut self, region: DisplayRegion, text: &str);

    /// Pushes all staged text to the OLED.
    fn refresh_display(&mut self);

    // ── Keyboard HID ──────────────────────────────────────────────────────────

    fn press_key(&mut self, code: KeyCode);
    fn release_key(&mut self, code: KeyCode);
    fn release_all_keys(&mut self);

    /// Types a string by pressing and releasing the keys that produce it.
    fn type_text(&mut self, text: &str);

    // ── Consumer control HID ──────────────────────────────────────────────────

    fn press_consumer(&mut self, code: ConsumerCode);

    /// Releases whatever consumer code is currently pressed.
    fn release_consumer(&mut self);

    // ── Mouse HID ─────────────────────────────────────────────────────────────

    fn mouse_press(&mut self, button: MouseButton);
    fn mouse_release(&mut self, button: MouseButton);
    fn release_all_mouse(&mut self);

    /// Moves the pointer by a relative amount and scrolls the wheel.
    fn mouse_move(&mut self, x: i32, y: i32, wheel: i32);

    // ── Speaker ───────────────────────────────────────────────────────────────

    /// Starts a continuous tone at `frequency` Hz.
    fn start_tone(&mut self, frequency: u16);

    fn stop_tone(&mut self);

    /// Plays an audio file from device storage.
    fn play_file(&mut self, path: &str);
}
