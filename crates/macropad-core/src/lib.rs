//! # macropad-core
//!
//! Engine library for a 12-key macropad with a rotary encoder: event
//! classification, named one-shot timers, undoable actions, and per-app key
//! layouts with focus dispatch.
//!
//! This crate is used by any host frontend that owns a concrete device.
//! It has zero dependencies on USB stacks, display drivers, or terminals;
//! hardware access goes through the [`device::Macropad`] trait.
//!
//! # Architecture overview (for beginners)
//!
//! A macropad is a small auxiliary keyboard: 12 keys in a 3x4 grid, a rotary
//! encoder with a push switch, a tiny OLED display, and one RGB LED per key.
//! Instead of fixed keycaps, the pad runs *apps*: a navigation cluster, a
//! numpad, a bank of function keys.  Pressing a switcher key jumps to another
//! app; the display and LEDs repaint to show the new meaning of every key.
//!
//! This crate (`macropad-core`) is the engine underneath.  It defines:
//!
//! - **`engine`** – The single-threaded event loop.  Every tick it reads the
//!   encoder and key switches, classifies raw transitions (including
//!   double-tap detection with a short buffering window), fires expired
//!   timers, and hands the resulting events to whichever app holds focus.
//!
//! - **`layout`** – Apps and key bindings.  A [`layout::Layout`] maps the 12
//!   slots plus the encoder to bindings; an [`layout::App`] is the live
//!   instance that paints the display and LEDs and routes events to them.
//!
//! - **`action`** – What keys do.  Actions execute on press and undo on
//!   release, compose into sequences, and can depend on a setting such as the
//!   host operating system.  Switching apps is an action result, not a
//!   control-flow exception.
//!
//! - **`domain`** – Events, settings, and colors shared by everything above.
//!
//! - **`device`** – The [`device::Macropad`] hardware trait and a recording
//!   mock for tests.
//!
//! - **`keymap`** – USB HID usage tables for the keyboard and consumer
//!   control pages.

// Declare the top-level modules.  Rust will look for each in a subdirectory
// with the same name (e.g., src/engine/mod.rs).
pub mod action;
pub mod device;
pub mod domain;
pub mod engine;
pub mod keymap;
pub mod layout;

// Re-export the most-used types at the crate root so callers can write
// `macropad_core::Dispatcher` instead of `macropad_core::engine::dispatcher::Dispatcher`.
pub use action::switching::{MacroAction, PreviousApp, SettingsDependent, SwitchApp};
pub use action::{Action, EngineContext, SwitchRequest};
pub use device::{DisplayRegion, Macropad, MouseButton};
pub use domain::color::{Color, ColorScheme};
pub use domain::event::{Event, KeyTransition, KEY_COUNT};
pub use domain::settings::{AppId, HostOs, SettingValue, Settings, OS_SETTING};
pub use engine::dispatcher::{AppRegistry, DispatchError, Dispatcher};
pub use engine::source::EventSource;
pub use engine::timer::{TimerContext, TimerRegistry};
pub use keymap::consumer::ConsumerCode;
pub use keymap::hid::KeyCode;
pub use layout::app::App;
pub use layout::binding::{Key, KeyBinding, MacroKey, SettingsSelectKey, SettingsValueKey};
pub use layout::{Layout, LayoutBuilder, LayoutError};
