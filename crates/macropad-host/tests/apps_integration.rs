//! End-to-end walkthrough of the bundled app layouts.
//!
//! Drives the production registry (the same `apps::bundle()` wiring the
//! binary uses) against the recording mock device, covering the loop a real
//! user walks: change the OS from the settings screen, switch to the nav
//! app, send a per-OS chord, and double-tap back home.

use macropad_core::device::mock::{DeviceCall, MockMacropad};
use macropad_core::{
    App, ConsumerCode, DisplayRegion, Dispatcher, HostOs, KeyCode, KeyTransition, Layout, Settings,
};
use macropad_host::apps::{self, home, Bundle};

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn dispatcher() -> Dispatcher<MockMacropad> {
    let Bundle { registry, home: home_id, targets } = apps::bundle().expect("bundle must build");
    let mut dispatcher = Dispatcher::new(
        MockMacropad::new(),
        Settings::new(),
        registry,
        home_id,
        move || {
            home::layout(&targets)
                .map(App::new)
                .unwrap_or_else(|_| App::new(Layout::empty("Home")))
        },
    )
    .expect("dispatcher must build");
    dispatcher.start();
    dispatcher
}

fn press(dispatcher: &mut Dispatcher<MockMacropad>, slot: usize) {
    dispatcher.device_mut().queue_key(KeyTransition::press(slot));
    dispatcher.step();
}

fn release(dispatcher: &mut Dispatcher<MockMacropad>, slot: usize) {
    dispatcher.device_mut().queue_key(KeyTransition::release(slot));
    dispatcher.step();
}

fn title(dispatcher: &mut Dispatcher<MockMacropad>) -> String {
    dispatcher
        .device_mut()
        .display_text(DisplayRegion::Title)
        .unwrap_or_default()
        .to_string()
}

fn slot_label(dispatcher: &mut Dispatcher<MockMacropad>, slot: usize) -> String {
    dispatcher
        .device_mut()
        .display_text(DisplayRegion::KeySlot(slot))
        .unwrap_or_default()
        .to_string()
}

fn pressed_keys(device: &MockMacropad) -> Vec<KeyCode> {
    device
        .calls()
        .iter()
        .filter_map(|call| match call {
            DeviceCall::PressKey(code) => Some(*code),
            _ => None,
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_walkthrough_os_change_nav_chord_and_double_tap_home() {
    // Arrange – the binary's wiring, focused on home with the default OS
    let mut dispatcher = dispatcher();
    assert_eq!(title(&mut dispatcher), "Home");
    assert_eq!(slot_label(&mut dispatcher, 0), "[ WIN ]");

    // Act – the OS key opens the settings app
    press(&mut dispatcher, 0);
    assert_eq!(title(&mut dispatcher), "Settings");
    assert_eq!(slot_label(&mut dispatcher, 1), "> WIN");
    // The release lands on the settings app's MAC key and must do nothing
    release(&mut dispatcher, 0);
    assert_eq!(title(&mut dispatcher), "Settings");

    // Act – selecting MAC writes the setting and pops straight back home
    press(&mut dispatcher, 0);

    // Assert – home repainted with the new OS value and brand color
    assert_eq!(dispatcher.settings().host_os(), HostOs::Mac);
    assert_eq!(title(&mut dispatcher), "Home");
    assert_eq!(slot_label(&mut dispatcher, 0), "[ MAC ]");
    assert_eq!(dispatcher.device_mut().pixel(0), 0x555555);
    release(&mut dispatcher, 0);

    // Act – switch to the nav app and send its Home key
    press(&mut dispatcher, 4);
    assert_eq!(title(&mut dispatcher), "Nav");
    release(&mut dispatcher, 4);
    dispatcher.device_mut().take_calls();
    press(&mut dispatcher, 1);

    // Assert – the Mac chord, not the dedicated Home key
    assert_eq!(
        pressed_keys(dispatcher.device_mut()),
        vec![KeyCode::MetaLeft, KeyCode::ArrowLeft]
    );
    release(&mut dispatcher, 1);

    // Act – double-tap PgUp to come home, one transition per tick
    dispatcher.device_mut().take_calls();
    for transition in [
        KeyTransition::press(2),
        KeyTransition::release(2),
        KeyTransition::press(2),
        KeyTransition::release(2),
    ] {
        dispatcher.device_mut().queue_key(transition);
    }
    for _ in 0..4 {
        dispatcher.step();
    }

    // Assert – back home, no PageUp leaked, and the stack is balanced
    assert_eq!(title(&mut dispatcher), "Home");
    assert!(!pressed_keys(dispatcher.device_mut()).contains(&KeyCode::PageUp));
    assert_eq!(dispatcher.settings().previous_app_depth(), 0);
}

#[test]
fn test_home_encoder_drives_volume_and_mute() {
    // Arrange
    let mut dispatcher = dispatcher();
    dispatcher.device_mut().take_calls();

    // Act – one detent clockwise
    dispatcher.device_mut().set_encoder_position(1);
    dispatcher.step();

    // Assert – a complete volume-up pulse
    assert_eq!(
        dispatcher.device_mut().take_calls(),
        vec![
            DeviceCall::ReleaseConsumer,
            DeviceCall::PressConsumer(ConsumerCode::VolumeIncrement),
            DeviceCall::ReleaseConsumer,
        ]
    );

    // Act – knob press holds mute, knob release ends it
    dispatcher.device_mut().set_encoder_button(true);
    dispatcher.step();
    assert_eq!(
        dispatcher.device_mut().take_calls(),
        vec![
            DeviceCall::ReleaseConsumer,
            DeviceCall::PressConsumer(ConsumerCode::Mute),
        ]
    );
    dispatcher.device_mut().set_encoder_button(false);
    dispatcher.step();
    assert_eq!(
        dispatcher.device_mut().take_calls(),
        vec![DeviceCall::ReleaseConsumer]
    );
}
