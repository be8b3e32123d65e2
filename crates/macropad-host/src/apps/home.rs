//! Home screen: OS indicator, app switchers, and media transport.
//!
//! The top-left key shows the active OS setting in the matching platform
//! color and opens the settings app.  The middle row switches to the other
//! bundled apps; the bottom row and the encoder drive media transport.

use macropad_core::action::hid::Media;
use macropad_core::{
    ConsumerCode, Key, Layout, LayoutError, SettingsValueKey, SwitchApp, OS_SETTING,
};

use crate::apps::SwitchTargets;

/// Builds the home layout pointing at the registered switch targets.
///
/// # Errors
///
/// Returns [`LayoutError`] if a slot assignment is out of range.
pub fn layout(targets: &SwitchTargets) -> Result<Layout, LayoutError> {
    Layout::builder("Home")
        .key(
            0,
            SettingsValueKey::new(OS_SETTING)
                .template("[ {value} ]")
                .map_color("MAC", "mac")
                .map_color("WIN", "windows")
                .map_color("LIN", "linux")
                .action(SwitchApp::new(targets.settings)),
        )
        .key(3, Key::new("Num", "apps", SwitchApp::new(targets.numpad)))
        .key(4, Key::new("Nav", "apps", SwitchApp::new(targets.nav)))
        .key(5, Key::new("Func", "apps", SwitchApp::new(targets.func)))
        .key(9, Key::new("<<", "media", Media::new(ConsumerCode::ScanPreviousTrack)))
        .key(10, Key::new(">||", "media", Media::new(ConsumerCode::PlayPause)))
        .key(11, Key::new(">>", "media", Media::new(ConsumerCode::ScanNextTrack)))
        .encoder_button(Media::new(ConsumerCode::Mute))
        .encoder_increase(Media::new(ConsumerCode::VolumeIncrement))
        .encoder_decrease(Media::new(ConsumerCode::VolumeDecrement))
        .build()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
