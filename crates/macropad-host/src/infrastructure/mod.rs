//! Device backends for the host binary.
//!
//! The engine consumes the `macropad_core::Macropad` trait; this layer
//! provides the implementations.  The only backend shipped today is the
//! terminal simulator, which stands in for real hardware during development.

pub mod terminal;

pub use terminal::TerminalMacropad;
