//! Function keys F1 through F12, one per slot.
//!
//! Double-tapping F3 returns to the previous app; the other eleven keys
//! pass straight through, so repeated function presses stay snappy.

use macropad_core::action::hid::Press;
use macropad_core::{Key, KeyCode, Layout, LayoutError, PreviousApp};

/// Slot whose double tap navigates back.
const BACK_SLOT: usize = 2;

const FUNCTION_KEYS: [(&str, KeyCode); 12] = [
    ("F1", KeyCode::F1),
    ("F2", KeyCode::F2),
    ("F3", KeyCode::F3),
    ("F4", KeyCode::F4),
    ("F5", KeyCode::F5),
    ("F6", KeyCode::F6),
    ("F7", KeyCode::F7),
    ("F8", KeyCode::F8),
    ("F9", KeyCode::F9),
    ("F10", KeyCode::F10),
    ("F11", KeyCode::F11),
    ("F12", KeyCode::F12),
];

/// Builds the function-key layout.
///
/// # Errors
///
/// Returns [`LayoutError`] if a slot assignment is out of range.
pub fn layout() -> Result<Layout, LayoutError> {
    let mut builder = Layout::builder("Func");
    for (slot, (label, code)) in FUNCTION_KEYS.into_iter().enumerate() {
        let key = Key::new(label, "func", Press::new([code]));
        builder = if slot == BACK_SLOT {
            builder.key(slot, key.double_tap(PreviousApp))
        } else {
            builder.key(slot, key)
        };
    }
    builder.encoder_button(PreviousApp).build()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
