//! OS selection screen: a three-way select over the OS setting.
//!
//! Each key writes its OS value and immediately returns to the previous
//! app, so a visit is normally a single press.  The selected value carries
//! a `>` marker and its platform color; the others stay dark.

use macropad_core::{Layout, LayoutError, PreviousApp, SettingsSelectKey, OS_SETTING};

/// Builds the OS selection layout.
///
/// # Errors
///
/// Returns [`LayoutError`] if a slot assignment is out of range.
pub fn layout() -> Result<Layout, LayoutError> {
    Layout::builder("Settings")
        .key(
            0,
            SettingsSelectKey::new("MAC", "mac", OS_SETTING, "MAC").action(PreviousApp),
        )
        .key(
            1,
            SettingsSelectKey::new("WIN", "windows", OS_SETTING, "WIN").action(PreviousApp),
        )
        .key(
            2,
            SettingsSelectKey::new("LIN", "linux", OS_SETTING, "LIN").action(PreviousApp),
        )
        .encoder_button(PreviousApp)
        .build()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use macropad_core::device::mock::MockMacropad;
    use macropad_core::{App, AppRegistry, DisplayRegion, Dispatcher, HostOs, Settings};

    #[test]
    fn test_layout_builds() {
        assert!(layout().is_ok());
    }

    #[test]
    fn test_focus_marks_the_active_os() {
        // Arrange
        let mut registry = AppRegistry::new();
        let id = registry.register(App::new(layout().expect("settings layout")));
        let mut dispatcher = Dispatcher::new(
            MockMacropad::new(),
            Settings::new(),
            registry,
            id,
            || App::new(Layout::empty("Fallback")),
        )
        .expect("dispatcher");

        // Act
        dispatcher.start();

        // Assert – WIN is the default selection
        let device = dispatcher.device_mut();
        assert_eq!(device.display_text(DisplayRegion::KeySlot(0)), Some("  MAC"));
        assert_eq!(device.display_text(DisplayRegion::KeySlot(1)), Some("> WIN"));
        assert_eq!(device.display_text(DisplayRegion::KeySlot(2)), Some("  LIN"));
        assert_eq!(device.pixel(0), 0x000000);
        assert_eq!(device.pixel(1), 0x00A4EF);
    }

    #[test]
    fn test_select_writes_setting_and_repaints_siblings() {
        // Arrange
        let mut registry = AppRegistry::new();
        let id = registry.register(App::new(layout().expect("settings layout")));
        let mut dispatcher = Dispatcher::new(
            MockMacropad::new(),
            Settings::new(),
            registry,
            id,
            || App::new(Layout::empty("Fallback")),
        )
        .expect("dispatcher");
        dispatcher.start();

        // Act – select LIN (PreviousApp finds an empty stack and stays put)
        dispatcher
            .device_mut()
            .queue_key(macropad_core::KeyTransition::press(2));
        dispatcher.step();

        // Assert
        assert_eq!(dispatcher.settings().host_os(), HostOs::Linux);
        let device = dispatcher.device_mut();
        assert_eq!(device.display_text(DisplayRegion::KeySlot(1)), Some("  WIN"));
        assert_eq!(device.display_text(DisplayRegion::KeySlot(2)), Some("> LIN"));
        assert_eq!(device.pixel(1), 0x000000);
        assert_eq!(device.pixel(2), 0x25D366);
    }
}
