//! Terminal-backed simulator implementing the [`Macropad`] trait.
//!
//! Stands in for real hardware during development: a background thread reads
//! stdin lines and turns them into encoder and key input, while display and
//! LED writes are rendered as log lines.
//!
//! # Input line protocol
//!
//! One command per line:
//!
//! | Line       | Meaning                                      |
//! |------------|----------------------------------------------|
//! | `p <slot>` | press the key switch in `slot` (0-11)        |
//! | `r <slot>` | release it                                   |
//! | `t <slot>` | tap: press then release                      |
//! | `d <slot>` | double tap: two taps                         |
//! | `+` / `-`  | rotate the encoder one detent (repeatable, `++` is two) |
//! | `b`        | click the encoder button (down then up)      |
//! | `bd` / `bu`| hold / release the encoder button            |
//! | `q`        | quit the host (EOF does the same)            |
//!
//! Key transitions and button level changes are queued and replayed one per
//! engine tick, so a `d 3` spans four ticks.  At the default 10 ms tick that
//! is well inside the double-tap pairing window.  Rotations merge into the
//! current position immediately, the same way a real encoder accumulates
//! detents between polls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use tracing::{debug, info, warn};

use macropad_core::{
    ConsumerCode, DisplayRegion, KeyCode, KeyTransition, Macropad, MouseButton, KEY_COUNT,
};

/// A parsed simulator input command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimInput {
    /// A key switch transition.
    Key(KeyTransition),
    /// Encoder detents, positive clockwise.
    Rotate(i32),
    /// Encoder push switch level.
    Button(bool),
}

/// Parses one stdin line into simulator inputs.
///
/// Returns `None` for lines that are not a recognized command and
/// `Some(vec![])` for blank lines and `#` comments.
fn parse_line(line: &str) -> Option<Vec<SimInput>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Some(Vec::new());
    }

    if line.chars().all(|c| c == '+') {
        return Some(vec![SimInput::Rotate(line.len() as i32)]);
    }
    if line.chars().all(|c| c == '-') {
        return Some(vec![SimInput::Rotate(-(line.len() as i32))]);
    }

    match line {
        "b" => return Some(vec![SimInput::Button(true), SimInput::Button(false)]),
        "bd" => return Some(vec![SimInput::Button(true)]),
        "bu" => return Some(vec![SimInput::Button(false)]),
        _ => {}
    }

    let (command, rest) = line.split_once(char::is_whitespace)?;
    let slot: usize = rest.trim().parse().ok()?;
    if slot >= KEY_COUNT {
        return None;
    }
    let inputs = match command {
        "p" => vec![SimInput::Key(KeyTransition::press(slot))],
        "r" => vec![SimInput::Key(KeyTransition::release(slot))],
        "t" => vec![
            SimInput::Key(KeyTransition::press(slot)),
            SimInput::Key(KeyTransition::release(slot)),
        ],
        "d" => vec![
            SimInput::Key(KeyTransition::press(slot)),
            SimInput::Key(KeyTransition::release(slot)),
            SimInput::Key(KeyTransition::press(slot)),
            SimInput::Key(KeyTransition::release(slot)),
        ],
        _ => return None,
    };
    Some(inputs)
}

/// Reads stdin until EOF or a quit command, feeding parsed inputs to `tx`.
///
/// Clears `running` on the way out so the main loop stops.
fn read_stdin_lines(tx: mpsc::Sender<SimInput>, running: Arc<AtomicBool>) {
    for line in std::io::stdin().lines() {
        let Ok(line) = line else { break };
        let trimmed = line.trim();
        if trimmed == "q" || trimmed == "quit" {
            break;
        }
        match parse_line(trimmed) {
            Some(inputs) => {
                for input in inputs {
                    if tx.send(input).is_err() {
                        return;
                    }
                }
            }
            None => warn!(
                "unrecognized input line {trimmed:?} (try: p/r/t/d <slot>, +, -, b, bd, bu, q)"
            ),
        }
    }
    info!("stdin closed, shutting down");
    running.store(false, Ordering::Relaxed);
}

// ── Terminal device ───────────────────────────────────────────────────────────

/// Simulated macropad reading from stdin and writing to the log.
///
/// Input ordering matters to the engine's edge detection, so the queues are
/// replayed conservatively: at most one key transition per
/// [`poll_key_transition`](Macropad::poll_key_transition) and at most one
/// button level change per
/// [`encoder_button_pressed`](Macropad::encoder_button_pressed) read.  A
/// `bd`/`bu` pair therefore always produces both edges even when both lines
/// arrive within one tick.
pub struct TerminalMacropad {
    inputs: mpsc::Receiver<SimInput>,
    position: i32,
    button_pressed: bool,
    button_changes: VecDeque<bool>,
    key_queue: VecDeque<KeyTransition>,
    title: String,
    labels: [String; KEY_COUNT],
    pixels: [u32; KEY_COUNT],
}

impl TerminalMacropad {
    /// Starts the stdin reader thread and returns the device.
    ///
    /// `running` is cleared when stdin reaches EOF or a quit command.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader thread cannot be spawned.
    pub fn spawn(running: Arc<AtomicBool>) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        std::thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || read_stdin_lines(tx, running))?;
        Ok(Self::new(rx))
    }

    fn new(inputs: mpsc::Receiver<SimInput>) -> Self {
        Self {
            inputs,
            position: 0,
            button_pressed: false,
            button_changes: VecDeque::new(),
            key_queue: VecDeque::new(),
            title: String::new(),
            labels: std::array::from_fn(|_| String::new()),
            pixels: [0; KEY_COUNT],
        }
    }

    /// Drains pending simulator inputs into the device state and queues.
    fn pump(&mut self) {
        while let Ok(input) = self.inputs.try_recv() {
            match input {
                SimInput::Rotate(delta) => self.position += delta,
                SimInput::Button(level) => self.button_changes.push_back(level),
                SimInput::Key(transition) => self.key_queue.push_back(transition),
            }
        }
    }
}

impl Macropad for TerminalMacropad {
    fn encoder_position(&mut self) -> i32 {
        self.pump();
        self.position
    }

    fn encoder_button_pressed(&mut self) -> bool {
        self.pump();
        if let Some(level) = self.button_changes.pop_front() {
            self.button_pressed = level;
        }
        self.button_pressed
    }

    fn poll_key_transition(&mut self) -> Option<KeyTransition> {
        self.pump();
        self.key_queue.pop_front()
    }

    fn set_pixel(&mut self, slot: usize, color: u32) {
        match self.pixels.get_mut(slot) {
            Some(pixel) => *pixel = color,
            None => warn!("pixel write to out-of-range slot {slot} ignored"),
        }
    }

    fn show_pixels(&mut self) {
        for chunk in self.pixels.chunks_exact(3) {
            if let [a, b, c] = chunk {
                debug!("leds: {a:06X} {b:06X} {c:06X}");
            }
        }
    }

    fn set_display_text(&mut self, region: DisplayRegion, text: &str) {
        match region {
            DisplayRegion::Title => self.title = text.to_string(),
            DisplayRegion::KeySlot(slot) => match self.labels.get_mut(slot) {
                Some(label) => *label = text.to_string(),
                None => warn!("label write to out-of-range slot {slot} ignored"),
            },
        }
    }

    fn refresh_display(&mut self) {
        info!("display: [{}]", self.title);
        for chunk in self.labels.chunks_exact(3) {
            if let [a, b, c] = chunk {
                info!("display:   {a:<7} {b:<7} {c:<7}");
            }
        }
    }

    fn press_key(&mut self, code: KeyCode) {
        info!("key down {code:?}");
    }

    fn release_key(&mut self, code: KeyCode) {
        info!("key up {code:?}");
    }

    fn release_all_keys(&mut self) {
        debug!("all keys released");
    }

    fn type_text(&mut self, text: &str) {
        info!("type {text:?}");
    }

    fn press_consumer(&mut self, code: ConsumerCode) {
        info!("consumer down {code:?}");
    }

    fn release_consumer(&mut self) {
        debug!("consumer released");
    }

    fn mouse_press(&mut self, button: MouseButton) {
        info!("mouse down {button:?}");
    }

    fn mouse_release(&mut self, button: MouseButton) {
        info!("mouse up {button:?}");
    }

    fn release_all_mouse(&mut self) {
        debug!("all mouse buttons released");
    }

    fn mouse_move(&mut self, x: i32, y: i32, wheel: i32) {
        info!("mouse move ({x}, {y}) wheel {wheel}");
    }

    fn start_tone(&mut self, frequency: u16) {
        info!("tone {frequency} Hz");
    }

    fn stop_tone(&mut self) {
        debug!("tone stopped");
    }

    fn play_file(&mut self, path: &str) {
        info!("play {path:?}");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> (TerminalMacropad, mpsc::Sender<SimInput>) {
        let (tx, rx) = mpsc::channel();
        (TerminalMacropad::new(rx), tx)
    }

    // ── Line parsing ──────────────────────────────────────────────────────────

    #[test]
    fn test_parse_press_release_tap_commands() {
        assert_eq!(
            parse_line("p 3"),
            Some(vec![SimInput::Key(KeyTransition::press(3))])
        );
        assert_eq!(
            parse_line("r 3"),
            Some(vec![SimInput::Key(KeyTransition::release(3))])
        );
        assert_eq!(
            parse_line("t 0"),
            Some(vec![
                SimInput::Key(KeyTransition::press(0)),
                SimInput::Key(KeyTransition::release(0)),
            ])
        );
    }

    #[test]
    fn test_parse_double_tap_expands_to_four_transitions() {
        let inputs = parse_line("d 5").expect("d must parse");
        assert_eq!(inputs.len(), 4);
        assert_eq!(inputs[0], SimInput::Key(KeyTransition::press(5)));
        assert_eq!(inputs[3], SimInput::Key(KeyTransition::release(5)));
    }

    #[test]
    fn test_parse_rotation_runs_accumulate() {
        assert_eq!(parse_line("+"), Some(vec![SimInput::Rotate(1)]));
        assert_eq!(parse_line("+++"), Some(vec![SimInput::Rotate(3)]));
        assert_eq!(parse_line("--"), Some(vec![SimInput::Rotate(-2)]));
    }

    #[test]
    fn test_parse_button_commands() {
        assert_eq!(
            parse_line("b"),
            Some(vec![SimInput::Button(true), SimInput::Button(false)])
        );
        assert_eq!(parse_line("bd"), Some(vec![SimInput::Button(true)]));
        assert_eq!(parse_line("bu"), Some(vec![SimInput::Button(false)]));
    }

    #[test]
    fn test_parse_blank_and_comment_lines_are_empty() {
        assert_eq!(parse_line(""), Some(Vec::new()));
        assert_eq!(parse_line("   "), Some(Vec::new()));
        assert_eq!(parse_line("# warm up the pad"), Some(Vec::new()));
    }

    #[test]
    fn test_parse_rejects_out_of_range_slot() {
        // Slots run 0..12
        assert_eq!(parse_line("p 12"), None);
        assert_eq!(parse_line("t 99"), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_line("x 1"), None);
        assert_eq!(parse_line("p"), None);
        assert_eq!(parse_line("p abc"), None);
        assert_eq!(parse_line("+-"), None);
    }

    // ── Input queue replay ────────────────────────────────────────────────────

    #[test]
    fn test_key_transitions_deliver_one_per_poll() {
        // Arrange
        let (mut pad, tx) = device();
        tx.send(SimInput::Key(KeyTransition::press(2))).unwrap();
        tx.send(SimInput::Key(KeyTransition::release(2))).unwrap();

        // Act / Assert – one transition per poll, in arrival order
        assert_eq!(pad.poll_key_transition(), Some(KeyTransition::press(2)));
        assert_eq!(pad.poll_key_transition(), Some(KeyTransition::release(2)));
        assert_eq!(pad.poll_key_transition(), None);
    }

    #[test]
    fn test_button_levels_apply_one_per_read() {
        // Arrange: a click arrives as two levels within one pump
        let (mut pad, tx) = device();
        tx.send(SimInput::Button(true)).unwrap();
        tx.send(SimInput::Button(false)).unwrap();

        // Act / Assert – both edges are observable on consecutive reads
        assert!(pad.encoder_button_pressed());
        assert!(!pad.encoder_button_pressed());
        assert!(!pad.encoder_button_pressed());
    }

    #[test]
    fn test_rotations_merge_into_position() {
        // Arrange
        let (mut pad, tx) = device();
        tx.send(SimInput::Rotate(1)).unwrap();
        tx.send(SimInput::Rotate(1)).unwrap();
        tx.send(SimInput::Rotate(-1)).unwrap();

        // Act / Assert
        assert_eq!(pad.encoder_position(), 1);
    }

    // ── Output staging ────────────────────────────────────────────────────────

    #[test]
    fn test_pixel_writes_stage_colors_and_ignore_out_of_range() {
        let (mut pad, _tx) = device();

        pad.set_pixel(0, 0x112233);
        pad.set_pixel(11, 0x445566);
        pad.set_pixel(99, 0xFFFFFF);

        assert_eq!(pad.pixels[0], 0x112233);
        assert_eq!(pad.pixels[11], 0x445566);
    }

    #[test]
    fn test_display_writes_stage_title_and_labels() {
        let (mut pad, _tx) = device();

        pad.set_display_text(DisplayRegion::Title, "Home");
        pad.set_display_text(DisplayRegion::KeySlot(4), "Nav");
        pad.set_display_text(DisplayRegion::KeySlot(50), "lost");

        assert_eq!(pad.title, "Home");
        assert_eq!(pad.labels[4], "Nav");
    }
}
