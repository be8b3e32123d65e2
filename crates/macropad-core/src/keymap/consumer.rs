//! Consumer control codes, USB HID usage page 0x0C.
//!
//! Media transport and volume controls live on a separate usage page from
//! the keyboard.  Consumer reports carry a single active usage, which is why
//! the device trait releases the previous code before pressing a new one.

/// A media or system control, identified by HID Usage ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ConsumerCode {
    BrightnessIncrement = 0x6F,
    BrightnessDecrement = 0x70,
    Record = 0xB2,
    FastForward = 0xB3,
    Rewind = 0xB4,
    ScanNextTrack = 0xB5,
    ScanPreviousTrack = 0xB6,
    Stop = 0xB7,
    Eject = 0xB8,
    PlayPause = 0xCD,
    Mute = 0xE2,
    VolumeIncrement = 0xE9,
    VolumeDecrement = 0xEA,
}

impl ConsumerCode {
    /// The HID Usage ID on page 0x0C.
    pub fn usage_id(self) -> u16 {
        self as u16
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
