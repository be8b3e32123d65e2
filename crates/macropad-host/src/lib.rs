//! macropad-host library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! The *host* is the runnable half of the workspace: it loads a TOML config,
//! builds the bundled app layouts, and drives the `macropad-core` dispatcher
//! against a device backend.  The only backend shipped here is a terminal
//! simulator, which turns stdin lines into encoder and key input and renders
//! display/LED state as log output.

/// Bundled app layouts: home, settings, navigation, numpad, function keys.
pub mod apps;

/// TOML configuration for the host binary.
pub mod config;

/// Device backends: the terminal simulator.
pub mod infrastructure;
