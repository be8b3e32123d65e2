//! Mock macropad for unit testing.
//!
//! Replays scripted encoder and key switch state and records every output
//! call in order, so tests can assert on exact device interaction sequences
//! without hardware.

use std::collections::{HashMap, VecDeque};

use super::{DisplayRegion, Macropad, MouseButton};
use crate::domain::event::{KeyTransition, KEY_COUNT};
use crate::keymap::consumer::ConsumerCode;
use crate::keymap::hid::KeyCode;

/// One recorded output call, in the order the engine made it.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    SetPixel { slot: usize, color: u32 },
    ShowPixels,
    SetDisplayText { region: DisplayRegion, text: String },
    RefreshDisplay,
    PressKey(KeyCode),
    ReleaseKey(KeyCode),
    ReleaseAllKeys,
    TypeText(String),
    PressConsumer(ConsumerCode),
    ReleaseConsumer,
    MousePress(MouseButton),
    MouseRelease(MouseButton),
    ReleaseAllMouse,
    MouseMove { x: i32, y: i32, wheel: i32 },
    StartTone(u16),
    StopTone,
    PlayFile(String),
}

/// A scriptable, recording implementation of [`Macropad`].
pub struct MockMacropad {
    encoder_position: i32,
    encoder_button: bool,
    key_script: VecDeque<KeyTransition>,
    calls: Vec<DeviceCall>,
    pixels: [u32; KEY_COUNT],
    display: HashMap<DisplayRegion, String>,
}

impl MockMacropad {
    pub fn new() -> Self {
        Self {
            encoder_position: 0,
            encoder_button: false,
            key_script: VecDeque::new(),
            calls: Vec::new(),
            pixels: [0; KEY_COUNT],
            display: HashMap::new(),
        }
    }

    // ── Scripting ─────────────────────────────────────────────────────────────

    /// Sets the encoder position the next read will observe.
    pub fn set_encoder_position(&mut self, position: i32) {
        self.encoder_position = position;
    }

    /// Sets the encoder push switch state the next read will observe.
    pub fn set_encoder_button(&mut self, pressed: bool) {
        self.encoder_button = pressed;
    }

    /// Queues a key switch transition; polls pop them in FIFO order.
    pub fn queue_key(&mut self, transition: KeyTransition) {
        self.key_script.push_back(transition);
    }

    // ── Inspection ────────────────────────────────────────────────────────────

    /// Every output call recorded so far.
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Drains the recorded calls, so a test can assert per phase.
    pub fn take_calls(&mut self) -> Vec<DeviceCall> {
        std::mem::take(&mut self.calls)
    }

    /// The staged color of one key LED.
    pub fn pixel(&self, slot: usize) -> u32 {
        self.pixels.get(slot).copied().unwrap_or(0)
    }

    /// The staged text for one display region, if any was ever set.
    pub fn display_text(&self, region: DisplayRegion) -> Option<&str> {
        self.display.get(&region).map(String::as_str)
    }
}

impl Default for MockMacropad {
    fn default() -> Self {
        Self::new()
    }
}

impl Macropad for MockMacropad {
    fn encoder_position(&mut self) -> i32 {
        self.encoder_position
    }

    fn encoder_button_pressed(&mut self) -> bool {
        self.encoder_button
    }

    fn poll_key_transition(&mut self) -> Option<KeyTransition> {
        self.key_script.pop_front()
    }

    fn set_pixel(&mut self, slot: usize, color: u32) {
        self.calls.push(DeviceCall::SetPixel { slot, color });
        if let Some(pixel) = self.pixels.get_mut(slot) {
            *pixel = color;
        }
    }

    fn show_pixels(&mut self) {
        self.calls.push(DeviceCall::ShowPixels);
    }

    fn set_display_text(&mut self, region: DisplayRegion, text: &str) {
        self.calls.push(DeviceCall::SetDisplayText { region, text: text.to_owned() });
        self.display.insert(region, text.to_owned());
    }

    fn refresh_display(&mut self) {
        self.calls.push(DeviceCall::RefreshDisplay);
    }

    fn press_key(&mut self, code: KeyCode) {
        self.calls.push(DeviceCall::PressKey(code));
    }

    fn release_key(&mut self, code: KeyCode) {
        self.calls.push(DeviceCall::ReleaseKey(code));
    }

    fn release_all_keys(&mut self) {
        self.calls.push(DeviceCall::ReleaseAllKeys);
    }

    fn type_text(&mut self, text: &str) {
        self.calls.push(DeviceCall::TypeText(text.to_owned()));
    }

    fn press_consumer(&mut self, code: ConsumerCode) {
        self.calls.push(DeviceCall::PressConsumer(code));
    }

    fn release_consumer(&mut self) {
        self.calls.push(DeviceCall::ReleaseConsumer);
    }

    fn mouse_press(&mut self, button: MouseButton) {
        self.calls.push(DeviceCall::MousePress(button));
    }

    fn mouse_release(&mut self, button: MouseButton) {
        self.calls.push(DeviceCall::MouseRelease(button));
    }

    fn release_all_mouse(&mut self) {
        self.calls.push(DeviceCall::ReleaseAllMouse);
    }

    fn mouse_move(&mut self, x: i32, y: i32, wheel: i32) {
        self.calls.push(DeviceCall::MouseMove { x, y, wheel });
    }

    fn start_tone(&mut self, frequency: u16) {
        self.calls.push(DeviceCall::StartTone(frequency));
    }

    fn stop_tone(&mut self) {
        self.calls.push(DeviceCall::StopTone);
    }

    fn play_file(&mut self, path: &str) {
        self.calls.push(DeviceCall::PlayFile(path.to_owned()));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_replays_scripted_encoder_state() {
        // Arrange
        let mut device = MockMacropad::new();
        device.set_encoder_position(5);
        device.set_encoder_button(true);

        // Act & Assert
        assert_eq!(device.encoder_position(), 5);
        assert!(device.encoder_button_pressed());
    }

    #[test]
    fn test_mock_pops_queued_keys_in_fifo_order() {
        // Arrange
        let mut device = MockMacropad::new();
        device.queue_key(KeyTransition::press(3));
        device.queue_key(KeyTransition::release(3));

        // Act & Assert
        assert_eq!(device.poll_key_transition(), Some(KeyTransition::press(3)));
        assert_eq!(device.poll_key_transition(), Some(KeyTransition::release(3)));
        assert_eq!(device.poll_key_transition(), None);
    }

    #[test]
    fn test_mock_records_calls_in_order() {
        // Arrange
        let mut device = MockMacropad::new();

        // Act
        device.press_key(KeyCode::KeyA);
        device.release_all_keys();
        device.show_pixels();

        // Assert
        assert_eq!(
            device.calls(),
            &[
                DeviceCall::PressKey(KeyCode::KeyA),
                DeviceCall::ReleaseAllKeys,
                DeviceCall::ShowPixels,
            ]
        );
    }

    #[test]
    fn test_mock_stages_pixels_and_display_text() {
        // Arrange
        let mut device = MockMacropad::new();

        // Act
        device.set_pixel(4, 0x112A22);
        device.set_display_text(DisplayRegion::Title, "Home");

        // Assert
        assert_eq!(device.pixel(4), 0x112A22);
        assert_eq!(device.display_text(DisplayRegion::Title), Some("Home"));
    }

    #[test]
    fn test_take_calls_drains_the_log() {
        // Arrange
        let mut device = MockMacropad::new();
        device.stop_tone();

        // Act
        let calls = device.take_calls();

        // Assert
        assert_eq!(calls, vec![DeviceCall::StopTone]);
        assert!(device.calls().is_empty());
    }
}
