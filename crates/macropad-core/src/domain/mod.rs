//! Domain entities for the macropad engine.
//!
//! This module contains pure data types with no engine or device
//! dependencies: the event union produced by classification, the shared
//! settings store, and the color vocabulary used by layouts.
//!
//! Everything in here can be constructed and inspected in isolation, which
//! is what makes the classifier and dispatcher testable without hardware.

/// Classified events and key transitions.
pub mod event;

/// Color references and the named color scheme.
pub mod color;

/// The shared settings store and its well-known keys.
pub mod settings;
