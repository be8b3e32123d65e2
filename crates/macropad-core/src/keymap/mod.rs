//! USB HID usage tables for the reports a macropad emits.
//!
//! The pad talks to the host as a composite HID device: a keyboard (usage
//! page 0x07) and a consumer control (usage page 0x0C) for media keys.
//! Actions name keys through these enums; the device layer turns them into
//! whatever its transport needs.

pub mod consumer;
pub mod hid;

pub use consumer::ConsumerCode;
pub use hid::KeyCode;
