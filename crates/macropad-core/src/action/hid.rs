//! Actions that emit through the device: HID reports, pointer motion,
//! tones, and audio playback.
//!
//! These are the leaves most macros are built from.  Each one's undo is
//! written against its own execute, so sequences of them stay balanced
//! when a key is released.

use std::thread;
use std::time::Duration;

use super::{Action, EngineContext, SwitchRequest};
use crate::device::MouseButton;
use crate::keymap::consumer::ConsumerCode;
use crate::keymap::hid::KeyCode;

/// Holds keys down on press and releases them on release.
///
/// Undo releases in reverse order: for a Ctrl+C chord, C goes up before
/// Ctrl.
pub struct Press {
    codes: Vec<KeyCode>,
}

impl Press {
    pub fn new(codes: impl IntoIterator<Item = KeyCode>) -> Self {
        Self { codes: codes.into_iter().collect() }
    }
}

impl Action for Press {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        for code in &self.codes {
            ctx.device.press_key(*code);
        }
        None
    }

    fn undo(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        for code in self.codes.iter().rev() {
            ctx.device.release_key(*code);
        }
        None
    }
}

/// Releases keys that an earlier step left held.
pub struct Release {
    codes: Vec<KeyCode>,
}

impl Release {
    pub fn new(codes: impl IntoIterator<Item = KeyCode>) -> Self {
        Self { codes: codes.into_iter().collect() }
    }
}

impl Action for Release {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        for code in &self.codes {
            ctx.device.release_key(*code);
        }
        None
    }
}

/// Blocks for a fixed duration.
///
/// The engine is cooperative, so a wait inside a macro stalls all polling
/// until it returns.  Keep them short.
pub struct Wait {
    duration: Duration,
}

impl Wait {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Action for Wait {
    fn execute(&self, _ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        thread::sleep(self.duration);
        None
    }
}

/// Types a string on press.
pub struct TypeText {
    text: String,
}

impl TypeText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Action for TypeText {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        ctx.device.type_text(&self.text);
        None
    }
}

/// Presses a consumer control code.
///
/// Consumer reports carry one usage at a time, so whatever was pressed
/// before is released first.  Undo releases again, ending the press.
pub struct Media {
    code: ConsumerCode,
}

impl Media {
    pub fn new(code: ConsumerCode) -> Self {
        Self { code }
    }
}

impl Action for Media {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        ctx.device.release_consumer();
        ctx.device.press_consumer(self.code);
        None
    }

    fn undo(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        ctx.device.release_consumer();
        None
    }
}

/// Holds a mouse button on press and releases it on release.
pub struct MouseClick {
    button: MouseButton,
}

impl MouseClick {
    pub fn new(button: MouseButton) -> Self {
        Self { button }
    }
}

impl Action for MouseClick {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        ctx.device.mouse_press(self.button);
        None
    }

    fn undo(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        ctx.device.mouse_release(self.button);
        None
    }
}

/// Moves the pointer by a relative offset on press.
pub struct MouseMove {
    x: i32,
    y: i32,
}

impl MouseMove {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Action for MouseMove {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        ctx.device.mouse_move(self.x, self.y, 0);
        None
    }
}

/// Scrolls the wheel by a number of lines on press.
pub struct Scroll {
    lines: i32,
}

impl Scroll {
    pub fn new(lines: i32) -> Self {
        Self { lines }
    }
}

impl Action for Scroll {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        ctx.device.mouse_move(0, 0, self.lines);
        None
    }
}

/// Starts a tone on press and stops it on release.
///
/// Any tone already sounding is stopped first; the speaker plays one
/// frequency at a time.
pub struct Tone {
    frequency: u16,
}

impl Tone {
    pub fn new(frequency: u16) -> Self {
        Self { frequency }
    }
}

impl Action for Tone {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        ctx.device.stop_tone();
        ctx.device.start_tone(self.frequency);
        None
    }

    fn undo(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        ctx.device.stop_tone();
        None
    }
}

/// Plays an audio file from device storage on press.
pub struct PlayFile {
    path: String,
}

impl PlayFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Action for PlayFile {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        ctx.device.play_file(&self.path);
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
