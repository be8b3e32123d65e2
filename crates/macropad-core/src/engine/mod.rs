//! The single-threaded event engine.
//!
//! Everything here runs on one thread, driven by polling: each tick the
//! [`source::EventSource`] reads the device, routes key transitions through
//! the [`tap::TapBuffer`] classifier, fires any expired
//! [`timer::TimerRegistry`] entries, and the [`dispatcher::Dispatcher`]
//! delivers the resulting batch to the focused app.
//!
//! There is no interrupt handling and no async runtime.  An event "arrives"
//! when a poll observes a state change, which keeps the whole engine
//! deterministic under test: scripted device state in, exact event batches
//! out.

/// Named one-shot timers.
pub mod timer;

/// Double-tap classification.
pub mod tap;

/// Per-tick device polling and event ordering.
pub mod source;

/// Focus tracking and event delivery.
pub mod dispatcher;
