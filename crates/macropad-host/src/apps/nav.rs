//! Navigation cluster: paging, editing, and arrow keys.
//!
//! Home and End differ per OS: macOS has no dedicated keys, so the Mac
//! variants send Cmd+Arrow chords instead.  Double-tapping PgUp returns to
//! the previous app.

use macropad_core::action::hid::Press;
use macropad_core::{HostOs, Key, KeyCode, Layout, LayoutError, MacroKey, PreviousApp};

/// Builds the navigation layout.
///
/// # Errors
///
/// Returns [`LayoutError`] if a slot assignment is out of range.
pub fn layout() -> Result<Layout, LayoutError> {
    Layout::builder("Nav")
        .key(0, Key::new("PrtSc", "nav", Press::new([KeyCode::PrintScreen])))
        .key(
            1,
            MacroKey::new("Home", "nav", Press::new([KeyCode::Home]))
                .on(HostOs::Mac, Press::new([KeyCode::MetaLeft, KeyCode::ArrowLeft])),
        )
        .key(
            2,
            Key::new("PgUp", "nav", Press::new([KeyCode::PageUp])).double_tap(PreviousApp),
        )
        .key(3, Key::new("Del", "nav", Press::new([KeyCode::Delete])))
        .key(
            4,
            MacroKey::new("End", "nav", Press::new([KeyCode::End]))
                .on(HostOs::Mac, Press::new([KeyCode::MetaLeft, KeyCode::ArrowRight])),
        )
        .key(5, Key::new("PgDn", "nav", Press::new([KeyCode::PageDown])))
        .key(7, Key::new("Up", "nav", Press::new([KeyCode::ArrowUp])))
        .key(9, Key::new("Left", "nav", Press::new([KeyCode::ArrowLeft])))
        .key(10, Key::new("Down", "nav", Press::new([KeyCode::ArrowDown])))
        .key(11, Key::new("Right", "nav", Press::new([KeyCode::ArrowRight])))
        .build()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
