//! Integration tests for the event engine.
//!
//! These tests exercise the public surface end-to-end: `Dispatcher` +
//! `AppRegistry` + real layouts over the mock device, the way a host
//! frontend uses the crate.

use std::time::Duration;

use macropad_core::action::hid::{Media, Press, TypeText};
use macropad_core::device::mock::{DeviceCall, MockMacropad};
use macropad_core::{
    AppRegistry, ConsumerCode, Dispatcher, DisplayRegion, HostOs, Key, KeyCode, KeyTransition,
    Layout, MacroKey, PreviousApp, Settings, SettingsSelectKey, SwitchApp,
};

fn fallback() -> macropad_core::App {
    macropad_core::App::new(Layout::empty("Fallback"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_switch_walkthrough_repaints_and_previous_app_returns() {
    // Nav is registered first so Home's switcher key can capture its id.
    let mut registry = AppRegistry::new();
    let nav = registry.register(macropad_core::App::new(
        Layout::builder("Nav")
            .key(0, Key::new("PgUp", "nav", Press::new([KeyCode::PageUp])))
            .key(11, Key::new("<", "back", PreviousApp))
            .build()
            .expect("nav layout must build"),
    ));
    let home = registry.register(macropad_core::App::new(
        Layout::builder("Home")
            .key(4, Key::new("Nav", "apps", SwitchApp::new(nav)))
            .build()
            .expect("home layout must build"),
    ));

    let mut dispatcher =
        Dispatcher::new(MockMacropad::new(), Settings::new(), registry, home, fallback)
            .expect("dispatcher must build");
    dispatcher.start();
    assert_eq!(dispatcher.device_mut().display_text(DisplayRegion::Title), Some("Home"));

    // Switch to Nav.
    dispatcher.device_mut().queue_key(KeyTransition::press(4));
    dispatcher.step();
    assert_eq!(dispatcher.current(), nav);
    assert_eq!(dispatcher.device_mut().display_text(DisplayRegion::Title), Some("Nav"));
    assert_eq!(dispatcher.device_mut().display_text(DisplayRegion::KeySlot(0)), Some("PgUp"));
    assert_eq!(dispatcher.settings().previous_app_depth(), 1);

    // The release of the switcher key lands in Nav and must be harmless.
    dispatcher.device_mut().queue_key(KeyTransition::release(4));
    dispatcher.step();
    assert_eq!(dispatcher.current(), nav);

    // The back key returns to Home and pops the stack.
    dispatcher.device_mut().queue_key(KeyTransition::press(11));
    dispatcher.step();
    assert_eq!(dispatcher.current(), home);
    assert_eq!(dispatcher.settings().previous_app_depth(), 0);
    assert_eq!(dispatcher.device_mut().display_text(DisplayRegion::Title), Some("Home"));
}

#[test]
fn test_os_selection_changes_macro_key_resolution_across_apps() {
    // Settings app: select keys writing the OS setting.  Nav app: a macro
    // key whose chord depends on that setting.
    let mut registry = AppRegistry::new();
    let settings_app = {
        let layout = Layout::builder("Settings")
            .key(0, SettingsSelectKey::new("MAC", "mac", "OS", "MAC").action(PreviousApp))
            .key(1, SettingsSelectKey::new("WIN", "windows", "OS", "WIN").action(PreviousApp))
            .build()
            .expect("settings layout must build");
        macropad_core::App::new(layout)
    };
    let settings_id = registry.register(settings_app);

    let nav = registry.register(macropad_core::App::new(
        Layout::builder("Nav")
            .key(
                1,
                MacroKey::new("Home", "nav", Press::new([KeyCode::Home]))
                    .on(HostOs::Mac, Press::new([KeyCode::MetaLeft, KeyCode::ArrowLeft])),
            )
            .key(11, Key::new("<", "back", PreviousApp))
            .build()
            .expect("nav layout must build"),
    ));

    let home = registry.register(macropad_core::App::new(
        Layout::builder("Home")
            .key(0, Key::new("OS", "apps", SwitchApp::new(settings_id)))
            .key(5, Key::new("Nav", "apps", SwitchApp::new(nav)))
            .build()
            .expect("home layout must build"),
    ));

    let mut dispatcher =
        Dispatcher::new(MockMacropad::new(), Settings::new(), registry, home, fallback)
            .expect("dispatcher must build");
    dispatcher.start();

    // Default OS is Windows, so the macro key resolves to plain Home.
    dispatcher.device_mut().queue_key(KeyTransition::press(5));
    dispatcher.step();
    dispatcher.device_mut().queue_key(KeyTransition::release(5));
    dispatcher.step();
    dispatcher.device_mut().take_calls();
    dispatcher.device_mut().queue_key(KeyTransition::press(1));
    dispatcher.step();
    let calls = dispatcher.device_mut().take_calls();
    assert!(
        calls.contains(&DeviceCall::PressKey(KeyCode::Home)),
        "macro key must press Home while the OS is Windows"
    );
    dispatcher.device_mut().queue_key(KeyTransition::release(1));
    dispatcher.step();

    // Walk back home, then into the settings app.
    dispatcher.device_mut().queue_key(KeyTransition::press(11));
    dispatcher.step();
    dispatcher.device_mut().queue_key(KeyTransition::release(11));
    dispatcher.step();
    assert_eq!(dispatcher.current(), home);
    dispatcher.device_mut().queue_key(KeyTransition::press(0));
    dispatcher.step();
    assert_eq!(dispatcher.current(), settings_id);

    // Pick MAC; the select key's action returns to the previous app.
    dispatcher.device_mut().queue_key(KeyTransition::release(0));
    dispatcher.step();
    dispatcher.device_mut().queue_key(KeyTransition::press(0));
    dispatcher.step();
    assert_eq!(dispatcher.settings().host_os(), HostOs::Mac);
    assert_eq!(dispatcher.current(), home, "select key action must return to Home");

    // The same macro key now resolves to the macOS chord.
    dispatcher.device_mut().queue_key(KeyTransition::release(0));
    dispatcher.step();
    dispatcher.device_mut().queue_key(KeyTransition::press(5));
    dispatcher.step();
    dispatcher.device_mut().take_calls();
    dispatcher.device_mut().queue_key(KeyTransition::press(1));
    dispatcher.step();
    let calls = dispatcher.device_mut().take_calls();
    assert!(
        calls.contains(&DeviceCall::PressKey(KeyCode::MetaLeft))
            && calls.contains(&DeviceCall::PressKey(KeyCode::ArrowLeft)),
        "macro key must press Cmd+Left while the OS is macOS"
    );
    assert!(
        !calls.contains(&DeviceCall::PressKey(KeyCode::Home)),
        "the Windows chord must not fire on macOS"
    );
}

#[test]
fn test_double_tap_on_tracked_key_returns_to_previous_app() {
    let mut registry = AppRegistry::new();
    let nav = registry.register(macropad_core::App::new(
        Layout::builder("Nav")
            .key(
                3,
                Key::new("PgUp", "nav", Press::new([KeyCode::PageUp])).double_tap(PreviousApp),
            )
            .build()
            .expect("nav layout must build"),
    ));
    let home = registry.register(macropad_core::App::new(
        Layout::builder("Home")
            .key(0, Key::new("Nav", "apps", SwitchApp::new(nav)))
            .build()
            .expect("home layout must build"),
    ));

    let mut dispatcher =
        Dispatcher::new(MockMacropad::new(), Settings::new(), registry, home, fallback)
            .expect("dispatcher must build");
    dispatcher.start();
    dispatcher.device_mut().queue_key(KeyTransition::press(0));
    dispatcher.step();
    dispatcher.device_mut().queue_key(KeyTransition::release(0));
    dispatcher.step();
    assert_eq!(dispatcher.current(), nav);
    dispatcher.device_mut().take_calls();

    // Two quick taps on the tracked slot.
    for transition in [
        KeyTransition::press(3),
        KeyTransition::release(3),
        KeyTransition::press(3),
        KeyTransition::release(3),
    ] {
        dispatcher.device_mut().queue_key(transition);
        dispatcher.step();
    }

    assert_eq!(dispatcher.current(), home, "double tap must return to the previous app");
    assert_eq!(dispatcher.settings().previous_app_depth(), 0);
    assert!(
        !dispatcher.device_mut().calls().contains(&DeviceCall::PressKey(KeyCode::PageUp)),
        "taps classified as a double tap must not run the single-press action"
    );
}

#[test]
fn test_encoder_gestures_drive_media_actions() {
    let mut registry = AppRegistry::new();
    let home = registry.register(macropad_core::App::new(
        Layout::builder("Home")
            .encoder_button(Media::new(ConsumerCode::Mute))
            .encoder_increase(Media::new(ConsumerCode::VolumeIncrement))
            .encoder_decrease(Media::new(ConsumerCode::VolumeDecrement))
            .build()
            .expect("home layout must build"),
    ));
    let mut dispatcher =
        Dispatcher::new(MockMacropad::new(), Settings::new(), registry, home, fallback)
            .expect("dispatcher must build");
    dispatcher.start();
    dispatcher.device_mut().take_calls();

    // One clockwise detent: volume up, executed and undone in place.
    dispatcher.device_mut().set_encoder_position(1);
    dispatcher.step();
    assert_eq!(
        dispatcher.device_mut().take_calls(),
        vec![
            DeviceCall::ReleaseConsumer,
            DeviceCall::PressConsumer(ConsumerCode::VolumeIncrement),
            DeviceCall::ReleaseConsumer,
        ]
    );

    // Back one detent: volume down.
    dispatcher.device_mut().set_encoder_position(0);
    dispatcher.step();
    let calls = dispatcher.device_mut().take_calls();
    assert!(calls.contains(&DeviceCall::PressConsumer(ConsumerCode::VolumeDecrement)));

    // Push and release the encoder: mute held, then released.
    dispatcher.device_mut().set_encoder_button(true);
    dispatcher.step();
    assert_eq!(
        dispatcher.device_mut().take_calls(),
        vec![DeviceCall::ReleaseConsumer, DeviceCall::PressConsumer(ConsumerCode::Mute)]
    );
    dispatcher.device_mut().set_encoder_button(false);
    dispatcher.step();
    assert_eq!(dispatcher.device_mut().take_calls(), vec![DeviceCall::ReleaseConsumer]);
}

#[test]
fn test_pixel_timeout_darkens_leds_until_the_next_event() {
    let mut settings = Settings::new();
    settings.set_pixel_timeout(Some(Duration::ZERO));

    let mut registry = AppRegistry::new();
    let home = registry.register(macropad_core::App::new(
        Layout::builder("Home")
            .key(0, Key::new("T", 0x4E1C02, TypeText::new("typed")))
            .build()
            .expect("home layout must build"),
    ));
    let mut dispatcher = Dispatcher::new(MockMacropad::new(), settings, registry, home, fallback)
        .expect("dispatcher must build");
    dispatcher.start();
    assert_eq!(dispatcher.device_mut().pixel(0), 0x4E1C02);

    // The zero timeout expires on the next poll.
    dispatcher.step();
    assert!(dispatcher.settings().pixels_disabled(), "timeout must darken the LEDs");
    assert_eq!(dispatcher.device_mut().pixel(0), 0x000000);

    // The next key event wakes the LEDs before running its binding.
    dispatcher.device_mut().take_calls();
    dispatcher.device_mut().queue_key(KeyTransition::press(0));
    dispatcher.step();
    assert!(!dispatcher.settings().pixels_disabled(), "activity must relight the LEDs");
    assert_eq!(dispatcher.device_mut().pixel(0), 0x4E1C02);
    assert!(dispatcher.device_mut().calls().contains(&DeviceCall::TypeText("typed".into())));
}
