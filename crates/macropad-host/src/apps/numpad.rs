//! Numpad: digits laid out keypad-style, with Enter in the corner.
//!
//! Digits type themselves as text, so they work regardless of the host's
//! Num Lock state.  The encoder button returns to the previous app.

use macropad_core::action::hid::{Press, TypeText};
use macropad_core::{Key, KeyCode, Layout, LayoutError, PreviousApp};

/// Builds the numpad layout.
///
/// # Errors
///
/// Returns [`LayoutError`] if a slot assignment is out of range.
pub fn layout() -> Result<Layout, LayoutError> {
    let mut builder = Layout::builder("Num");
    for (slot, digit) in ["7", "8", "9", "4", "5", "6", "1", "2", "3", "0", "."]
        .into_iter()
        .enumerate()
    {
        builder = builder.key(slot, Key::new(digit, "numpad", TypeText::new(digit)));
    }
    builder
        .key(11, Key::new("Entr", "numpad", Press::new([KeyCode::NumpadEnter])))
        .encoder_button(PreviousApp)
        .build()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
